use apollo_compiler::{ExecutableDocument, Schema, ast::Document, validation::WithErrors};
use graphql_sample_operations::SynthesisError;
use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};

/// An error while sending a GraphQL request
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to send GraphQL request: {0}")]
    Request(reqwest::Error),

    #[error("Failed to read GraphQL response body: {0}")]
    ResponseBody(reqwest::Error),

    #[error("invalid header value: {0}")]
    HeaderValue(#[from] InvalidHeaderValue),
}

/// An error in an operation document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Could not parse GraphQL document: {0}")]
    GraphQLDocument(Box<WithErrors<Document>>),

    #[error("Invalid GraphQL operation: {0}")]
    GraphQLOperation(Box<WithErrors<ExecutableDocument>>),

    #[error("Only operations and fragments are allowed, found a type system definition")]
    TypeSystemDefinition,

    #[error("No operations defined")]
    NoOperations,
}

/// An error in the command line tool
#[derive(Debug, thiserror::Error)]
pub enum TesterError {
    #[error("Could not open file: {0}")]
    ReadFile(#[from] std::io::Error),

    #[error("Could not parse GraphQL schema: {0}")]
    GraphQLSchema(Box<WithErrors<Schema>>),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Variables must be a JSON object")]
    VariablesNotObject,

    #[error("invalid header name: {0}")]
    HeaderName(#[from] InvalidHeaderName),

    #[error("invalid header value: {0}")]
    HeaderValue(#[from] InvalidHeaderValue),

    #[error("invalid header: {0}")]
    Header(String),

    #[error("No GraphQL endpoint was supplied")]
    NoEndpoint,

    #[error("Unknown sample query: {0}")]
    UnknownSample(String),
}

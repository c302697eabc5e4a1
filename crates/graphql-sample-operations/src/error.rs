use apollo_compiler::{Schema, validation::WithErrors};

/// An error while synthesizing operations
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("Could not parse GraphQL schema: {0}")]
    SchemaParseFailure(Box<WithErrors<Schema>>),
}

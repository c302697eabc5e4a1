//! Client-side checks and formatting for operation documents

use apollo_compiler::ast::{Definition, Document};
use apollo_compiler::parser::Parser;
use apollo_compiler::validation::Valid;
use apollo_compiler::{ExecutableDocument, Schema};
use tracing::debug;

use crate::errors::DocumentError;

/// Source path reported in operation diagnostics
const OPERATION_PATH: &str = "operation.graphql";

/// Parse an executable document containing at least one operation
pub fn parse_operation(source_text: &str) -> Result<Document, DocumentError> {
    let document = Parser::new()
        .parse_ast(source_text, OPERATION_PATH)
        .map_err(|e| DocumentError::GraphQLDocument(Box::new(e)))?;

    let mut operations = 0;
    for definition in &document.definitions {
        match definition {
            Definition::OperationDefinition(_) => operations += 1,
            Definition::FragmentDefinition(_) => {}
            _ => return Err(DocumentError::TypeSystemDefinition),
        }
    }
    if operations == 0 {
        return Err(DocumentError::NoOperations);
    }

    debug!(operations, "Parsed operation document");
    Ok(document)
}

/// Check an operation, against a schema when one is given
pub fn validate_operation(
    source_text: &str,
    schema: Option<&Valid<Schema>>,
) -> Result<(), DocumentError> {
    parse_operation(source_text)?;

    if let Some(schema) = schema {
        ExecutableDocument::parse_and_validate(schema, source_text, OPERATION_PATH)
            .map_err(|e| DocumentError::GraphQLOperation(Box::new(e)))?;
    }

    Ok(())
}

/// Pretty-print an operation document with 2-space indentation
pub fn format_operation(source_text: &str) -> Result<String, DocumentError> {
    Ok(parse_operation(source_text)?.to_string())
}

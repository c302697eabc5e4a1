//! Synthesize sample GraphQL operations from a schema.
//!
//! Given the SDL of a schema, every field of the root Query and Mutation types
//! becomes an [`OperationEntry`] holding two operations:
//!
//! * `request` declares one variable per argument (input-object arguments are
//!   flattened into one variable per input field) and passes the variables to
//!   the field;
//! * `example` has the same shape with every variable replaced by a mock
//!   literal.
//!
//! Selections take the first three declared fields of the returned type, and
//! object fields are expanded one level deep at most. Example selections stay
//! flat.
//!
//! Schemas that fail to parse or validate produce an empty
//! [`GeneratedOperationSet`]; the cause is logged.

use apollo_compiler::Schema;
use apollo_compiler::ast::{FieldDefinition, OperationType};
use apollo_compiler::schema::Component;
use serde::Serialize;
use tracing::{debug, warn};

use arguments::expand_arguments;
use selection::{example_selection_set, render_field, selection_set};

mod arguments;
pub mod error;
mod mock;
mod selection;

pub use error::SynthesisError;
pub use mock::{MockValues, RandomMockValues};

/// Source path reported in schema diagnostics
const SCHEMA_PATH: &str = "schema.graphql";

/// A generated operation for a single root field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationEntry {
    /// The root field name
    pub name: String,

    /// The operation with variable declarations
    pub request: String,

    /// The operation with mock literals in place of variables
    pub example: String,
}

/// Operations generated from a schema, in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedOperationSet {
    pub queries: Vec<OperationEntry>,
    pub mutations: Vec<OperationEntry>,
}

impl GeneratedOperationSet {
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty() && self.mutations.is_empty()
    }
}

/// Generate operations using random mock values.
pub fn generate(schema_source: &str) -> GeneratedOperationSet {
    generate_with(schema_source, &mut RandomMockValues::from_entropy())
}

/// Generate operations drawing mock literals from `mocks`.
///
/// An invalid schema is logged and yields an empty set.
pub fn generate_with<M: MockValues + ?Sized>(
    schema_source: &str,
    mocks: &mut M,
) -> GeneratedOperationSet {
    try_generate_with(schema_source, mocks).unwrap_or_else(|error| {
        warn!("{error}");
        GeneratedOperationSet::default()
    })
}

/// Generate operations, reporting a schema that fails to parse or validate.
pub fn try_generate_with<M: MockValues + ?Sized>(
    schema_source: &str,
    mocks: &mut M,
) -> Result<GeneratedOperationSet, SynthesisError> {
    let schema = Schema::parse_and_validate(schema_source, SCHEMA_PATH)
        .map_err(|errors| SynthesisError::SchemaParseFailure(Box::new(errors)))?;

    let queries = root_fields(&schema, OperationType::Query)
        .map(|field| build_operation(&schema, OperationType::Query, field, mocks))
        .collect::<Vec<_>>();
    let mutations = root_fields(&schema, OperationType::Mutation)
        .map(|field| build_operation(&schema, OperationType::Mutation, field, mocks))
        .collect::<Vec<_>>();

    debug!(
        queries = queries.len(),
        mutations = mutations.len(),
        "Generated operations from schema"
    );

    Ok(GeneratedOperationSet { queries, mutations })
}

/// The fields of a root operation type, skipping introspection fields
fn root_fields(
    schema: &Schema,
    operation_type: OperationType,
) -> impl Iterator<Item = &Component<FieldDefinition>> {
    schema
        .root_operation(operation_type)
        .and_then(|root_name| schema.get_object(root_name))
        .into_iter()
        .flat_map(|root| root.fields.values())
        .filter(|field| !field.name.starts_with("__"))
}

fn build_operation<M: MockValues + ?Sized>(
    schema: &Schema,
    operation_type: OperationType,
    field: &FieldDefinition,
    mocks: &mut M,
) -> OperationEntry {
    let keyword = keyword(operation_type);
    let arguments = expand_arguments(schema, &field.arguments, mocks);

    let mut request = if arguments.signatures.is_empty() {
        format!("{keyword} {{\n")
    } else {
        format!("{keyword}({}) {{\n", arguments.signatures.join(", "))
    };
    render_field(
        &mut request,
        1,
        &invocation(&field.name, &arguments.bindings),
        selection_set(schema, &field.ty, 0).as_deref(),
    );
    request.push('}');

    let mut example = format!("{keyword} {{\n");
    render_field(
        &mut example,
        1,
        &invocation(&field.name, &arguments.mock_bindings),
        example_selection_set(schema, &field.ty).as_deref(),
    );
    example.push('}');

    OperationEntry {
        name: field.name.to_string(),
        request,
        example,
    }
}

fn invocation(name: &str, bindings: &[String]) -> String {
    if bindings.is_empty() {
        name.to_string()
    } else {
        format!("{name}({})", bindings.join(", "))
    }
}

fn keyword(operation_type: OperationType) -> &'static str {
    match operation_type {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    }
}

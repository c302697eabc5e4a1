//! JSON Schema for config fields whose Rust types don't match their YAML form

use std::collections::BTreeMap;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};

/// Header names mapped to header values
pub(super) fn header_map(generator: &mut SchemaGenerator) -> Schema {
    let mut schema = BTreeMap::<String, String>::json_schema(generator);
    schema.insert(
        "description".to_string(),
        "HTTP header names mapped to their values".into(),
    );
    schema
}

/// Level names accepted by `level_from_str`
pub(super) fn level(_generator: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "string",
        "enum": ["trace", "debug", "info", "warn", "error"],
    })
}

//! Prints the JSON Schema of the YAML config accepted by `graphql-tester --config`

// Only `runtime::Config` is needed here
#![allow(unused_imports, dead_code)]

use anyhow::Context;

mod runtime;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(runtime::Config);
    let pretty =
        serde_json::to_string_pretty(&schema).context("Could not serialize config schema")?;
    println!("{pretty}");
    Ok(())
}

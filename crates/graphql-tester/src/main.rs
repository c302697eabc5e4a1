use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use apollo_compiler::Schema;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Args as ClapArgs, Parser, Subcommand};
use graphql_sample_operations::{RandomMockValues, try_generate_with};
use graphql_tester::client::{GraphQLClient, Request};
use graphql_tester::document::{format_operation, validate_operation};
use graphql_tester::errors::TesterError;
use graphql_tester::listing::{render_generated, render_samples};
use graphql_tester::samples::{SAMPLE_QUERIES, sample_by_name};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{Level, debug, info, warn};
use url::Url;

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the GraphQL tester
#[derive(Debug, Parser)]
#[command(
    styles = STYLES,
    about = "GraphQL Tester - send GraphQL operations and generate samples from a schema",
)]
struct Args {
    /// Path to the YAML config file
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// The log level, overriding the configured one
    #[arg(long = "log", short = 'l', global = true)]
    log_level: Option<Level>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate sample operations for every root field of a schema
    Generate {
        /// The path to the GraphQL schema file
        #[arg(long, short = 's')]
        schema: PathBuf,

        /// Seed for reproducible mock values
        #[arg(long)]
        seed: Option<u64>,

        /// Print the operations as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in sample operations
    Samples {
        /// Only print the sample with this name
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Print the samples as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send an operation to a GraphQL endpoint
    Send {
        /// The GraphQL endpoint, overriding the configured one
        #[arg(long, short = 'e')]
        endpoint: Option<Url>,

        /// Bearer token, overriding the configured one
        #[arg(long, short = 't')]
        token: Option<String>,

        /// Headers to send to the endpoint
        #[arg(long = "header", action = clap::ArgAction::Append)]
        headers: Vec<String>,

        /// Variable values as a JSON object
        #[arg(long)]
        variables: Option<String>,

        #[command(flatten)]
        operation: OperationInput,
    },

    /// Check an operation, against a schema if one is given
    Validate {
        /// The path to the GraphQL schema file
        #[arg(long, short = 's')]
        schema: Option<PathBuf>,

        #[command(flatten)]
        operation: OperationInput,
    },

    /// Pretty-print an operation
    Format {
        #[command(flatten)]
        operation: OperationInput,
    },
}

/// Where to read the operation text from
#[derive(Debug, ClapArgs)]
#[group(required = true, multiple = false)]
struct OperationInput {
    /// The operation text
    #[arg(long, short = 'q')]
    query: Option<String>,

    /// A file containing the operation
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// The name of a built-in sample operation
    #[arg(long)]
    sample: Option<String>,
}

impl OperationInput {
    fn read(self) -> Result<String, TesterError> {
        if let Some(query) = self.query {
            Ok(query)
        } else if let Some(path) = self.file {
            Ok(std::fs::read_to_string(path)?)
        } else if let Some(name) = self.sample {
            sample_by_name(&name)
                .map(|sample| sample.query.to_string())
                .ok_or(TesterError::UnknownSample(name))
        } else {
            // clap requires one of the group
            Ok(String::new())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => runtime::read_config(path)?,
        None => runtime::read_config_from_env()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    let _guard = config.logging.init()?;

    info!(
        "GraphQL Tester v{} // Licensed under MIT",
        std::env!("CARGO_PKG_VERSION")
    );

    match args.command {
        Command::Generate { schema, seed, json } => {
            let source = std::fs::read_to_string(&schema)?;
            let operations = match seed {
                Some(seed) => try_generate_with(
                    &source,
                    &mut RandomMockValues::seeded(seed, chrono::Utc::now()),
                ),
                None => try_generate_with(&source, &mut RandomMockValues::from_entropy()),
            }
            .map_err(TesterError::from)?;

            if operations.is_empty() {
                warn!(schema = ?schema, "Schema has no query or mutation fields");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&operations)?);
            } else {
                print!("{}", render_generated(&operations));
            }
        }

        Command::Samples { name, json } => {
            let samples = match name {
                Some(name) => vec![
                    sample_by_name(&name).ok_or_else(|| TesterError::UnknownSample(name))?,
                ],
                None => SAMPLE_QUERIES.iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&samples)?);
            } else {
                print!("{}", render_samples(samples));
            }
        }

        Command::Send {
            endpoint,
            token,
            headers,
            variables,
            operation,
        } => {
            let endpoint = endpoint
                .or(config.endpoint)
                .ok_or(TesterError::NoEndpoint)?;
            let token = token.or_else(|| {
                config
                    .token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string())
            });

            let mut default_headers = config.headers;
            default_headers.extend(parse_headers(headers)?);

            let mut request = Request::new(operation.read()?);
            if let Some(variables) = variables {
                request = request.with_variables(parse_variables(&variables)?);
            }

            let client = GraphQLClient::new(endpoint)
                .with_headers(default_headers)
                .with_token(token.as_deref().unwrap_or_default())
                .map_err(TesterError::from)?;
            let response = client.send(&request).await.map_err(TesterError::from)?;

            println!("{response}");
            if !response.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Validate { schema, operation } => {
            let schema = schema.as_deref().map(read_schema).transpose()?;
            validate_operation(&operation.read()?, schema.as_ref()).map_err(TesterError::from)?;
            println!("Operation is valid");
        }

        Command::Format { operation } => {
            print!(
                "{}",
                format_operation(&operation.read()?).map_err(TesterError::from)?
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_schema(path: &Path) -> Result<apollo_compiler::validation::Valid<Schema>, TesterError> {
    debug!(schema = ?path, "Loading schema");
    let source = std::fs::read_to_string(path)?;
    Schema::parse_and_validate(source, path).map_err(|e| TesterError::GraphQLSchema(Box::new(e)))
}

fn parse_variables(variables: &str) -> Result<Value, TesterError> {
    match serde_json::from_str::<Value>(variables)? {
        Value::Null => Ok(Value::Null),
        object @ Value::Object(_) => Ok(object),
        _ => Err(TesterError::VariablesNotObject),
    }
}

fn parse_headers(headers: Vec<String>) -> Result<HeaderMap, TesterError> {
    let mut parsed = HeaderMap::new();
    for header in headers {
        let Some((name, value)) = header.split_once(':') else {
            return Err(TesterError::Header(header));
        };
        parsed.append(
            HeaderName::from_str(name.trim())?,
            HeaderValue::from_str(value.trim())?,
        );
    }
    Ok(parsed)
}

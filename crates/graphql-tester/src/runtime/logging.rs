//! Logging config and subscriber setup

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prefix of rolled log files
const LOG_FILE_PREFIX: &str = "graphql_tester";

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(deserialize_with = "level_from_str")]
    #[schemars(schema_with = "super::schemas::level")]
    pub level: Level,

    /// Directory to write log files to instead of stderr
    pub path: Option<PathBuf>,

    /// Log file rotation period, used with `path`
    pub rotation: LogRotation,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            path: None,
            rotation: LogRotation::Daily,
        }
    }
}

/// How often a new log file is started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(value: LogRotation) -> Self {
        match value {
            LogRotation::Minutely => Rotation::MINUTELY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

fn level_from_str<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let level = String::deserialize(deserializer)?;
    level.parse().map_err(serde::de::Error::custom)
}

impl Logging {
    /// `RUST_LOG` directives layered over the configured level
    pub fn env_filter(&self) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        if self.level >= Level::DEBUG {
            env_filter = env_filter
                .add_directive("hyper_util=info".parse()?)
                .add_directive("reqwest=info".parse()?);
        }
        Ok(env_filter)
    }

    /// Install the global subscriber, writing to a rolling file when a path is
    /// configured and to stderr otherwise
    pub fn init(&self) -> Result<Option<WorkerGuard>, anyhow::Error> {
        let env_filter = self.env_filter()?;

        match &self.path {
            Some(path) => setup_file_logging(path, self.rotation, env_filter),
            None => setup_stderr_logging(env_filter),
        }
    }
}

/// Sets up rolling file appender logging but falls back to stderr logging on failure
fn setup_file_logging(
    log_path: &Path,
    rotation: LogRotation,
    env_filter: EnvFilter,
) -> Result<Option<WorkerGuard>, anyhow::Error> {
    if let Err(error) = std::fs::create_dir_all(log_path) {
        eprintln!("Could not create log directory ({error}) - falling back to stderr");
        return setup_stderr_logging(env_filter);
    }

    let (non_blocking_writer, guard) = match RollingFileAppender::builder()
        .rotation(rotation.into())
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_path)
    {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(error) => {
            eprintln!("Log file setup failed ({error}) - falling back to stderr");
            return setup_stderr_logging(env_filter);
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()?;

    Ok(Some(guard))
}

/// Sets up stderr logging, leaving stdout to command output
fn setup_stderr_logging(env_filter: EnvFilter) -> Result<Option<WorkerGuard>, anyhow::Error> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LogRotation::Minutely, Rotation::MINUTELY)]
    #[case(LogRotation::Hourly, Rotation::HOURLY)]
    #[case(LogRotation::Daily, Rotation::DAILY)]
    #[case(LogRotation::Never, Rotation::NEVER)]
    fn it_maps_to_rotation_correctly(#[case] rotation: LogRotation, #[case] expected: Rotation) {
        let actual: Rotation = rotation.into();
        assert_eq!(expected, actual);
    }

    #[test]
    fn it_parses_levels_case_insensitively() {
        let logging: Logging =
            serde_json::from_str(r#"{ "level": "DEBUG", "rotation": "hourly" }"#).unwrap();

        assert_eq!(logging.level, Level::DEBUG);
        assert_eq!(logging.rotation, LogRotation::Hourly);
        assert_eq!(logging.path, None);
    }

    #[test]
    fn it_rejects_unknown_levels() {
        assert!(serde_json::from_str::<Logging>(r#"{ "level": "loud" }"#).is_err());
    }

    #[test]
    fn it_defaults_to_warnings_on_stderr() {
        let logging = Logging::default();

        assert_eq!(logging.level, Level::WARN);
        assert_eq!(logging.path, None);
        assert_eq!(logging.rotation, LogRotation::Daily);
    }
}

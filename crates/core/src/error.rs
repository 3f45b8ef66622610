use thiserror::Error;

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    MissingVar(&'static str),
}

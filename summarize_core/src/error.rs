use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream responded with status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

pub type FetchResult<T> = Result<T, FetchError>;

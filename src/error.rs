use thiserror::Error;

/// Errors produced while decoding inbound rule and event descriptions
///
/// Every variant is rejected before any monitor state is touched. There is
/// deliberately no variant for notification delivery failure: delivery has
/// no failure channel back to the caller.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("missing or invalid field: {0}")]
    MissingField(&'static str),

    #[error("unknown window kind: {0}")]
    UnknownWindowKind(String),

    #[error("unknown notifier kind: {0}")]
    UnknownNotifierKind(String),

    #[error("invalid field value: {0}")]
    InvalidValue(String),

    #[error("malformed request body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors that can occur during configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

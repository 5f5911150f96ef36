use thiserror::Error;

/// Errors raised while building [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Error returned when a string does not name a known [`crate::ObjectType`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown like object type: {0}")]
pub struct UnknownObjectType(pub String);

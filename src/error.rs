use thiserror::Error;

use crate::snackbar::LifecycleState;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Snackbar(#[from] SnackbarError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnackbarError {
    #[error("snackbar can only be reconfigured while idle (currently {state:?})")]
    NotIdle { state: LifecycleState },
    #[error("invalid duration {0:?}")]
    InvalidDuration(String),
    #[error("unknown animation style {0:?}")]
    UnknownAnimation(String),
}

impl Error {
    /// Whether the error stems from user-supplied configuration rather than
    /// runtime state.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

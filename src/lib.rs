#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod snackbar;
pub mod telemetry;
pub mod types;

pub use snackbar::{LifecycleState, Snackbar, SnackbarConfig};

pub type Result<T> = std::result::Result<T, error::Error>;

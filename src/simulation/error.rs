//! Error type shared by the fallible parts of the simulation.
//!
//! Stepping the simulation never fails; errors only come from validating
//! parameters, choosing a policy, and reading or writing files.

use thiserror::Error;

/// Errors raised while setting up a simulation or persisting its results.
#[derive(Error, Debug)]
pub enum SimError {
    /// Parameters that would make spawning or movement meaningless.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A policy name that does not match any known variant.
    #[error("Unknown simulation policy: {0}")]
    UnknownPolicy(String),

    /// Reading or writing a config or log file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON config or report could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SimError>;

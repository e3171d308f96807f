//! Error types for the training crate.

use thiserror::Error;

/// Errors produced while generating training circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainError {
    /// A caller-supplied argument, option, or configuration value is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input circuit contains an instruction outside the training basis.
    #[error("Unsupported instruction '{name}' at position {position}")]
    UnsupportedGate {
        /// Name of the offending instruction.
        name: String,
        /// Index of the instruction in the input circuit.
        position: usize,
    },

    /// Rebuilding a circuit failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] cdr_ir::IrError),

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrainError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TrainError::InvalidArgument(msg.into())
    }
}

/// Result type for training-circuit generation.
pub type TrainResult<T> = Result<T, TrainError>;

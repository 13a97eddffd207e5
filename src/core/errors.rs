// src/core/errors.rs

//! Defines the primary error type for the multiplexer.

use std::sync::Arc;
use thiserror::Error;

/// The main error enum, representing all failures the multiplexer can report.
/// `std::io::Error` is wrapped in an `Arc` so the enum stays cloneable.
#[derive(Error, Debug, Clone)]
pub enum MuxError {
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("Listener bring-up failed after {attempts} attempts: {last}")]
    BringUpFailed { attempts: u32, last: String },

    #[error("Action code 0 is reserved for 'no action' and cannot trigger a handler")]
    ReservedActionCode,
}

impl From<std::io::Error> for MuxError {
    fn from(e: std::io::Error) -> Self {
        MuxError::Io(Arc::new(e))
    }
}

impl PartialEq for MuxError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MuxError::Io(e1), MuxError::Io(e2)) => e1.to_string() == e2.to_string(),
            (
                MuxError::BringUpFailed {
                    attempts: a1,
                    last: l1,
                },
                MuxError::BringUpFailed {
                    attempts: a2,
                    last: l2,
                },
            ) => a1 == a2 && l1 == l2,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

//! Error types for the minhash-lsh engine.
//!
//! The engine only ever fails at construction time; `Add` and `FindSimilar`
//! have no error path. A reader that fails mid-document simply truncates the
//! shingle sequence rather than surfacing an error, so replicas driven by
//! the same committed log never diverge over an I/O hiccup. Internal
//! locking uses `parking_lot`, which does not poison on a panicking holder,
//! so there is no lock-poisoning variant to report here.

use thiserror::Error;

/// Result type for fallible engine operations (construction only).
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors raised by the similarity engine.
#[derive(Error, Debug)]
pub enum IndexError {
    /// A construction parameter was out of range.
    ///
    /// Raised by [`crate::core::config::IndexConfig::validate`] and by
    /// `MinHasher::new` before any hash family is built.
    #[error("invalid index parameter {field}: {message}")]
    InvalidParameter {
        /// Name of the offending field (`b`, `r`, or `n`).
        field: &'static str,
        /// Human-readable description of the violated constraint.
        message: String,
    },
}

impl IndexError {
    /// Construct an [`IndexError::InvalidParameter`].
    pub fn invalid_parameter(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_carries_field_name() {
        let err = IndexError::invalid_parameter("b", "must be >= 1");
        match err {
            IndexError::InvalidParameter { field, message } => {
                assert_eq!(field, "b");
                assert_eq!(message, "must be >= 1");
            }
            _ => panic!("expected InvalidParameter"),
        }
    }
}

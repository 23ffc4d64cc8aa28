//! Configuration for the similarity index.
//!
//! Mirrors the validation shape of the reference codebase's `LshConfig`
//! (`b`/`r`/`n` in place of its `num_bands`/`hashes-per-band`/`shingle_size`),
//! but without a `Default` impl: unlike the reference's richer analysis
//! configs, these three values are load-bearing algorithm parameters that
//! change the meaning of every stored signature, so callers must choose them
//! explicitly.

use serde::{Deserialize, Serialize};

use crate::core::errors::{IndexError, Result};

/// Construction parameters for a [`crate::index::MinHasher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Number of LSH bands.
    pub b: usize,
    /// Number of signature rows per band.
    pub r: usize,
    /// Shingle length, in whitespace-delimited tokens.
    pub n: usize,
}

impl IndexConfig {
    /// Construct a new configuration without validating it.
    ///
    /// Use [`IndexConfig::validate`] (or `MinHasher::new`, which validates
    /// internally) before relying on the values.
    pub fn new(b: usize, r: usize, n: usize) -> Self {
        Self { b, r, n }
    }

    /// Number of MinHash functions, `K = b * r`.
    pub fn num_hashes(&self) -> usize {
        self.b * self.r
    }

    /// Width of a band signature, `B = b * b`.
    pub fn band_width(&self) -> usize {
        self.b * self.b
    }

    /// Validate that `b`, `r`, and `n` are all positive.
    ///
    /// `K = b * r` is a multiple of `r` by construction, so that invariant
    /// never needs to be checked independently.
    pub fn validate(&self) -> Result<()> {
        if self.b == 0 {
            return Err(IndexError::invalid_parameter("b", "must be >= 1"));
        }
        if self.r == 0 {
            return Err(IndexError::invalid_parameter("r", "must be >= 1"));
        }
        if self.n == 0 {
            return Err(IndexError::invalid_parameter("n", "must be >= 1"));
        }
        Ok(())
    }
}

//! # minhash-lsh: near-duplicate text detection
//!
//! An in-memory engine for detecting near-duplicate text documents at
//! scale. A caller adds documents under its own identifiers; later, a query
//! document is compared against every document added so far, and the
//! identifiers of those exceeding a similarity threshold are returned.
//!
//! Similarity is Jaccard overlap on word-shingle sets, approximated by a
//! MinHash signature and accelerated with banded Locality-Sensitive Hashing
//! (LSH) so that a query need not compute exact Jaccard against every
//! stored document.
//!
//! ## Architecture
//!
//! ```text
//! reader ─▶ Shingler ─▶ Signature builder ─▶ Band compressor ─▶ MinHasher
//!                              │                                   │
//!                        (FNV-1a + universal                 matrix, band
//!                         hash family)                        cache, locks
//! ```
//!
//! - [`shingle::Shingler`]: lazy whitespace tokenization into word n-grams.
//! - [`hashing`]: deterministic universal hash families (seed fixed at 31).
//! - [`signature`]: MinHash signature construction (FNV-1a plus the hash family).
//! - [`band`]: LSH band compression.
//! - [`jaccard`]: set-Jaccard similarity between two band (or signature) vectors.
//! - [`index::MinHasher`]: the index (matrix, id-to-column mapping, band
//!   cache) and the query pipeline tying the above together.
//!
//! This crate is a pure library: it has no HTTP surface, no replicated log,
//! and no persistence. It is designed to sit behind a replication layer that
//! gives it ordered, single-writer semantics and replays a committed log of
//! `add` calls to rebuild the index from scratch after a restart.
//!
//! ## Quick start
//!
//! ```rust
//! use minhash_lsh::MinHasher;
//!
//! let index = MinHasher::new(10, 2, 2).expect("valid parameters");
//! index.add("doc-1", "Lorem ipsum dolor sit amet consectetur adipiscing elit".as_bytes());
//!
//! let matches = index.find_similar(
//!     "Lorem ipsum dolor sit amet consectetur adipiscing elit".as_bytes(),
//!     0.8,
//! );
//! assert!(matches.iter().any(|m| m.id == "doc-1"));
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod band;
pub mod core;
pub mod fnv1a;
pub mod hashing;
pub mod index;
pub mod jaccard;
pub mod shingle;
pub mod signature;

pub use core::config::IndexConfig;
pub use core::errors::{IndexError, Result};
pub use index::{Match, MinHasher};
pub use shingle::Shingler;

/// Library version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

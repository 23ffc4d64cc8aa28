//! The similarity index: owns the signature matrix, the id↔column mapping,
//! the cached band matrix, and the query pipeline.
//!
//! Concurrency follows the design notes' redesign of the reference
//! algorithm's two-read-write-lock dance: the band matrix lives behind an
//! [`ArcSwapOption`], so a reader that finds it present pays only an atomic
//! load, and a missing cache triggers a single-flight rebuild serialized by
//! `rebuild_lock` rather than a lock-upgrade. The signature matrix and the
//! column→id mapping are still guarded by one [`RwLock`] (`documents`), kept
//! together because the invariant `|matrix| = |column→id|` must never be
//! observed to differ.

use std::io::Read;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dashmap::DashSet;
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::band;
use crate::core::config::IndexConfig;
use crate::core::errors::Result;
use crate::hashing::{generate_hashers, UniversalHash, P1, P2};
use crate::jaccard::jaccard;
use crate::signature::{self, Signature};

type BandSignature = Vec<u32>;

/// A document the index considers similar to a query, with its Jaccard
/// similarity. Serde-derived so the out-of-scope HTTP layer can hand these
/// straight to a JSON encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// The identifier the document was `Add`-ed under.
    pub id: String,
    /// Jaccard similarity of the matched document's band signature to the
    /// query's, in `[0, 1]`.
    pub similarity: f64,
}

/// The signature matrix and the parallel column→id mapping, always updated
/// together so that `matrix.len() == column_to_id.len()` holds at every
/// observation.
struct Documents {
    matrix: Vec<Signature>,
    column_to_id: Vec<String>,
}

/// An in-memory near-duplicate text index.
///
/// Construct with [`MinHasher::new`], add documents with [`MinHasher::add`],
/// and query with [`MinHasher::find_similar`]. Safe to share across many
/// concurrent reader and writer threads via `&MinHasher` (wrap in an `Arc`
/// to move it across threads or a connection pool).
pub struct MinHasher {
    config: IndexConfig,
    hashers: Vec<UniversalHash>,
    band_hashers: Vec<UniversalHash>,
    documents: RwLock<Documents>,
    ids: DashSet<String>,
    band_cache: ArcSwapOption<Vec<BandSignature>>,
    rebuild_lock: Mutex<()>,
}

impl MinHasher {
    /// Construct a new index with `b` bands, `r` rows per band, and
    /// `n`-word shingles. Builds both hash families (`K = b*r` signature
    /// hashes, `b` band hashes) once, deterministically, from the fixed
    /// seed in [`crate::hashing`].
    ///
    /// Fails only if `b`, `r`, or `n` is zero (see [`IndexConfig::validate`]).
    pub fn new(b: usize, r: usize, n: usize) -> Result<Self> {
        let config = IndexConfig::new(b, r, n);
        config.validate()?;

        Ok(Self {
            hashers: generate_hashers(config.num_hashes(), P1),
            band_hashers: generate_hashers(b, P2),
            documents: RwLock::new(Documents {
                matrix: Vec::new(),
                column_to_id: Vec::new(),
            }),
            ids: DashSet::new(),
            band_cache: ArcSwapOption::from(None),
            rebuild_lock: Mutex::new(()),
            config,
        })
    }

    /// Construct an index from an already-validated [`IndexConfig`].
    pub fn from_config(config: IndexConfig) -> Result<Self> {
        Self::new(config.b, config.r, config.n)
    }

    /// The construction parameters this index was built with.
    pub fn config(&self) -> IndexConfig {
        self.config
    }

    /// Number of documents added so far.
    pub fn len(&self) -> usize {
        self.documents.read().matrix.len()
    }

    /// `true` if no document has been added yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a document under `id`, reading its body from `reader`.
    ///
    /// Accepts duplicate ids silently: the id set is a set, but the matrix
    /// grows on every call, so a duplicate id ends up backed by two
    /// distinct columns, both eligible to match. Uniqueness, if desired, is
    /// the caller's responsibility. Never fails: a reader that errors
    /// mid-document simply yields a signature over the tokens read so far.
    #[instrument(level = "debug", skip(self, reader, id))]
    pub fn add<R: Read>(&self, id: impl Into<String>, reader: R) {
        let id = id.into();
        let signature = signature::build(reader, self.config.n, &self.hashers);

        let column = {
            let mut docs = self.documents.write();
            docs.matrix.push(signature);
            docs.column_to_id.push(id.clone());
            docs.matrix.len() - 1
        };

        self.ids.insert(id);

        // Invalidated only after the append above is visible to readers
        // taking `documents` shared, so a rebuild triggered by a racing
        // reader always sees this document.
        self.band_cache.store(None);

        debug!(column, documents = column + 1, "document added");
    }

    /// Add several documents at once, computing their signatures in
    /// parallel before appending them to the matrix in order.
    ///
    /// Signature construction touches no shared state (§4.5), so it is the
    /// only part of `Add` worth parallelizing; the append itself is still
    /// serialized through the single matrix lock, one entry at a time, so
    /// that ids keep a deterministic, documents-call-order column
    /// assignment matching the order of `docs`.
    pub fn add_many(&self, docs: Vec<(String, Vec<u8>)>) {
        let signatures: Vec<(String, Signature)> = docs
            .into_par_iter()
            .map(|(id, body)| {
                let sig = signature::build(body.as_slice(), self.config.n, &self.hashers);
                (id, sig)
            })
            .collect();

        if signatures.is_empty() {
            return;
        }

        {
            let mut guard = self.documents.write();
            for (id, sig) in &signatures {
                guard.matrix.push(sig.clone());
                guard.column_to_id.push(id.clone());
            }
        }

        for (id, _) in signatures {
            self.ids.insert(id);
        }

        self.band_cache.store(None);
    }

    /// `true` if `id` has been `Add`-ed (possibly more than once).
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Find documents whose Jaccard similarity to the document read from
    /// `reader` is at least `threshold`.
    ///
    /// Results are returned in column (insertion) order; a single stored
    /// document produces at most one [`Match`] regardless of how many band
    /// positions it shares with the query. `threshold` is expected in
    /// `[0, 1]`; the engine does not itself validate the range (that is
    /// the out-of-scope HTTP boundary's job, per §7), so a threshold outside
    /// the range simply admits everything (below 0) or nothing (above 1).
    #[instrument(level = "debug", skip(self, reader))]
    pub fn find_similar<R: Read>(&self, reader: R, threshold: f64) -> Vec<Match> {
        let query_signature = signature::build(reader, self.config.n, &self.hashers);
        let query_band = band::compress(&query_signature, &self.band_hashers, self.config.r);

        let bands = self.band_matrix();
        let docs = self.documents.read();

        let mut matches = Vec::new();
        let mut hits = 0usize;

        for (i, candidate) in bands.iter().enumerate() {
            let shares_a_band = candidate
                .iter()
                .zip(query_band.iter())
                .any(|(a, b)| a == b);

            if !shares_a_band {
                continue;
            }
            hits += 1;

            let similarity = jaccard(candidate, &query_band);
            if similarity >= threshold {
                matches.push(Match {
                    id: docs.column_to_id[i].clone(),
                    similarity,
                });
            }
        }

        debug!(
            candidates_scanned = bands.len(),
            band_hits = hits,
            matches = matches.len(),
            "find_similar complete"
        );

        matches
    }

    /// Return the cached band matrix, rebuilding it first if it has been
    /// invalidated since the last read.
    ///
    /// Single-flight: concurrent callers that all observe a missing cache
    /// contend on `rebuild_lock`, but only the first to acquire it actually
    /// rebuilds; the rest find the freshly installed cache and return
    /// immediately. Lock order is band-handle-exclusive (`rebuild_lock`)
    /// then matrix-shared (`documents.read()`), matching `Add`'s order of
    /// matrix-exclusive-then-band-invalidate and so never deadlocking
    /// against it.
    fn band_matrix(&self) -> Arc<Vec<BandSignature>> {
        if let Some(cached) = self.band_cache.load_full() {
            return cached;
        }

        let _guard = self.rebuild_lock.lock();

        if let Some(cached) = self.band_cache.load_full() {
            return cached;
        }

        let rebuilt: Vec<BandSignature> = {
            let docs = self.documents.read();
            docs.matrix
                .iter()
                .map(|sig| band::compress(sig, &self.band_hashers, self.config.r))
                .collect()
        };

        let rebuilt = Arc::new(rebuilt);
        self.band_cache.store(Some(Arc::clone(&rebuilt)));
        rebuilt
    }
}

//! Set-Jaccard similarity between two equal-length band (or signature)
//! vectors, treated as multisets of distinct `u32` values.

use std::collections::HashSet;

/// Jaccard similarity `|A ∩ B| / |A ∪ B|` between `a` and `b`, each
/// interpreted as a set of distinct values (duplicates within a vector
/// collapse).
///
/// The engine never calls this with two empty vectors: every caller gates
/// it behind a length-`B` band signature, so the empty/empty case (which
/// would divide by zero) is left undefined here as in the design notes,
/// rather than special-cased.
pub fn jaccard(a: &[u32], b: &[u32]) -> f64 {
    let set_a: HashSet<u32> = a.iter().copied().collect();
    let set_b: HashSet<u32> = b.iter().copied().collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    intersection as f64 / union as f64
}

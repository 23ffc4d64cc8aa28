//! MinHash signature construction.
//!
//! A signature is a `K`-wide vector of `u32` minimums, one per hash function
//! in the signature family: for every shingle, each hash function's output
//! on the shingle's FNV-1a-32 value is compared against that function's
//! running minimum.

use std::io::Read;

use crate::fnv1a::fnv1a_32;
use crate::hashing::UniversalHash;
use crate::shingle::Shingler;

/// A MinHash signature: one `u32` minimum per hash function in the
/// signature family.
pub type Signature = Vec<u32>;

/// Build the `K`-wide MinHash signature for the document read from `reader`.
///
/// Shingles it into `n`-word windows, hashes each with 32-bit FNV-1a, and
/// folds the result through every function in `hashers`, keeping the
/// running minimum per function. An empty shingle sequence (fewer than `n`
/// tokens in the document) yields the all-`u32::MAX` signature, a
/// legitimate, comparable signature rather than an error, per the design
/// notes on empty documents.
pub fn build<R: Read>(reader: R, n: usize, hashers: &[UniversalHash]) -> Signature {
    let mut signature = vec![u32::MAX; hashers.len()];

    for shingle in Shingler::new(reader, n) {
        let x = fnv1a_32(shingle.as_bytes());

        for (slot, hasher) in signature.iter_mut().zip(hashers.iter()) {
            let hash = hasher.apply(&[x]);
            if hash < *slot {
                *slot = hash;
            }
        }
    }

    signature
}

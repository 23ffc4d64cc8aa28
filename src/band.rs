//! Band compression: reducing a MinHash signature to an LSH band signature.

use crate::hashing::UniversalHash;

/// Reduce a `K`-wide MinHash signature to a `B = b*b`-wide band signature.
///
/// Iterates the `b` band-hash functions; for each, walks the signature in
/// `r`-wide row-groups and hashes each group with that function. This
/// yields `b` hashes per band function, `b * b` scalars total, not the
/// textbook `b`. This is a deliberate property of this design (see the
/// design notes on band-compression arity): it increases the odds that any
/// two similar documents share at least one band-scalar position, which is
/// what candidate generation in [`crate::index`] scans for.
///
/// `signature.len()` must be an exact multiple of `r`; callers only ever
/// pass `K = b * r`-length signatures, so this always holds.
pub fn compress(signature: &[u32], band_hashers: &[UniversalHash], r: usize) -> Vec<u32> {
    debug_assert!(
        signature.len() % r == 0,
        "signature length must be a multiple of the row width"
    );

    let mut band = Vec::with_capacity(band_hashers.len() * (signature.len() / r));

    for hasher in band_hashers {
        for rows in signature.chunks(r) {
            band.push(hasher.apply(rows));
        }
    }

    band
}

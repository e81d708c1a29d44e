//! The variable-length hash function H′.

use crate::{Error, Result};
use blake2::{
    Blake2bVar,
    digest::{Update, VariableOutput},
};
use zeroize::Zeroizing;

/// Largest output of a single BLAKE2b invocation.
pub(crate) const DIGEST_LEN: usize = 64;

/// Bytes of every intermediate digest kept in the output.
const HALF_DIGEST_LEN: usize = DIGEST_LEN / 2;

/// Creates a BLAKE2b hasher for `output_len` (1..=64) bytes.
pub(crate) fn hasher(output_len: usize) -> Result<Blake2bVar> {
    Blake2bVar::new(output_len).map_err(|_| Error::OutputTooLong)
}

/// Finalizes `hasher` into `out`, whose length must match the one the
/// hasher was created with.
pub(crate) fn finish(hasher: Blake2bVar, out: &mut [u8]) -> Result<()> {
    hasher.finalize_variable(out).map_err(|_| Error::OutputTooLong)
}

/// H′: hashes the concatenation of `inputs` to `out.len()` bytes.
///
/// Outputs of up to 64 bytes are a single BLAKE2b call over
/// `LE32(len) || inputs`. Longer outputs chain 64-byte digests
/// `V_1 .. V_r` (with `r = ceil(len / 32) - 2`), keep the first 32 bytes
/// of each, and finish with one digest of the remaining `len - 32 r`
/// bytes taken from `V_r`.
pub(crate) fn blake2b_long(inputs: &[&[u8]], out: &mut [u8]) -> Result<()> {
    if out.is_empty() {
        return Err(Error::OutputTooShort);
    }

    let len_bytes = u32::try_from(out.len())
        .map_err(|_| Error::OutputTooLong)?
        .to_le_bytes();

    let mut digest = hasher(out.len().min(DIGEST_LEN))?;
    digest.update(&len_bytes);
    for input in inputs {
        digest.update(input);
    }

    if out.len() <= DIGEST_LEN {
        return finish(digest, out);
    }

    let rounds = out.len().div_ceil(HALF_DIGEST_LEN) - 2;
    let (head, last) = out.split_at_mut(rounds * HALF_DIGEST_LEN);

    let mut v = Zeroizing::new([0u8; DIGEST_LEN]);
    finish(digest, &mut v[..])?;

    for (i, chunk) in head.chunks_exact_mut(HALF_DIGEST_LEN).enumerate() {
        if i > 0 {
            let mut digest = hasher(DIGEST_LEN)?;
            digest.update(&v[..]);
            finish(digest, &mut v[..])?;
        }
        chunk.copy_from_slice(&v[..HALF_DIGEST_LEN]);
    }

    let mut digest = hasher(last.len())?;
    digest.update(&v[..]);
    finish(digest, last)
}

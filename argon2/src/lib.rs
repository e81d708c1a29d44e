#![no_std]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]

//! # Usage
//!
//! ```
//! use argon2::{Algorithm, Params};
//!
//! let params = Params::builder()
//!     .algorithm(Algorithm::Argon2id)
//!     .salt(b"somesalt")
//!     .iterations(1)
//!     .memory(8)
//!     .lanes(1)
//!     .build()?;
//!
//! let key = argon2::derive_key(b"password", &params, 32)?;
//! assert_eq!(key[..4], [0xf1, 0x37, 0xf8, 0xe1]);
//! # Ok::<(), argon2::Error>(())
//! ```

extern crate alloc;

#[cfg(feature = "parallel")]
extern crate std;

mod algorithm;
mod blake2b_long;
mod block;
mod error;
mod fill;
mod memory;
mod params;
mod version;

pub use crate::{
    algorithm::Algorithm,
    block::Block,
    error::{Error, Result},
    params::{Params, ParamsBuilder},
    version::Version,
};

use crate::{
    blake2b_long::{DIGEST_LEN, blake2b_long},
    memory::{Layout, Memory},
};
use alloc::{vec, vec::Vec};
use blake2::digest::Update;
use zeroize::Zeroizing;

/// Size of a memory block in bytes.
pub const BLOCK_SIZE: usize = Block::SIZE;

/// Number of synchronization points (slices) per pass.
pub const SYNC_POINTS: u32 = 4;

/// Minimum output length in bytes.
pub const MIN_OUTPUT_LEN: usize = 4;

/// Maximum number of lanes (2^24).
pub const MAX_LANES: u32 = 1 << 24;

/// Minimum number of lanes.
pub const MIN_LANES: u32 = 1;

/// Minimum number of passes.
pub const MIN_ITERATIONS: u32 = 1;

/// Derive a key of `output_len` bytes from `password`.
///
/// # Errors
/// Returns an error if `params` or `output_len` violate a precondition.
/// Nothing is allocated in that case.
pub fn derive_key(password: &[u8], params: &Params, output_len: usize) -> Result<Zeroizing<Vec<u8>>> {
    Argon2::new(params.clone()).derive_key(password, output_len)
}

/// Derive a key filling all of `out` from `password`.
///
/// # Errors
/// Returns an error if `params` or `out.len()` violate a precondition.
pub fn derive_key_into(password: &[u8], params: &Params, out: &mut [u8]) -> Result<()> {
    Argon2::new(params.clone()).derive_key_into(password, out)
}

/// Argon2 context: a set of validated [`Params`] that can derive any number
/// of keys.
#[derive(Clone, Debug)]
pub struct Argon2 {
    params: Params,
}

impl Argon2 {
    /// Create a new context.
    #[must_use]
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Parameters of this context.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Number of blocks [`Argon2::fill_memory`] needs.
    #[must_use]
    pub fn required_blocks(&self) -> usize {
        self.params.block_count()
    }

    /// Derive a key of `output_len` bytes from `password`.
    ///
    /// # Errors
    /// Returns an error if a parameter or `output_len` violate a
    /// precondition.
    pub fn derive_key(&self, password: &[u8], output_len: usize) -> Result<Zeroizing<Vec<u8>>> {
        self.validate(password, output_len)?;

        let mut out = Zeroizing::new(vec![0u8; output_len]);
        self.derive_key_into(password, &mut out)?;
        Ok(out)
    }

    /// Derive a key filling all of `out` from `password`.
    ///
    /// Allocates [`Argon2::required_blocks`] blocks, which are wiped before
    /// returning.
    ///
    /// # Errors
    /// Returns an error if a parameter or `out.len()` violate a
    /// precondition.
    pub fn derive_key_into(&self, password: &[u8], out: &mut [u8]) -> Result<()> {
        self.validate(password, out.len())?;

        let mut blocks = vec![Block::new(); self.required_blocks()];
        self.fill_memory(password, out, &mut blocks)
    }

    /// Derive a key filling all of `out`, using the caller's `blocks` as
    /// the memory matrix.
    ///
    /// Only the first [`Argon2::required_blocks`] blocks are used; they are
    /// wiped before returning.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooSmall`] if `blocks` is too short, or any
    /// parameter error.
    pub fn fill_memory(&self, password: &[u8], out: &mut [u8], blocks: &mut [Block]) -> Result<()> {
        self.validate(password, out.len())?;

        let params = &self.params;
        let mut memory = Memory::new(blocks, Layout::new(params))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            algorithm = %params.algorithm(),
            version = u32::from(params.version()),
            iterations = params.iterations(),
            memory = params.memory(),
            lanes = params.lanes(),
            blocks = memory.layout().block_count(),
            output_len = out.len(),
            "deriving key"
        );

        let h0 = self.initial_hash(password, out.len())?;
        initialize_lanes(&h0, &mut memory)?;

        for pass in 0..params.iterations() {
            for slice in 0..SYNC_POINTS {
                fill::fill_slice(params, &mut memory, pass, slice);
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(pass, "pass complete");
        }

        finalize(&memory, out)
    }

    fn validate(&self, password: &[u8], output_len: usize) -> Result<()> {
        self.params.validate()?;

        if output_len < MIN_OUTPUT_LEN {
            return Err(Error::OutputTooShort);
        }

        if u32::try_from(output_len).is_err() {
            return Err(Error::OutputTooLong);
        }

        if u32::try_from(password.len()).is_err() {
            return Err(Error::InputTooLong("password"));
        }

        Ok(())
    }

    /// H0: BLAKE2b-512 over the parameters and every input, each input
    /// prefixed with its length.
    fn initial_hash(&self, password: &[u8], output_len: usize) -> Result<Zeroizing<[u8; DIGEST_LEN]>> {
        let params = &self.params;
        let output_len = u32::try_from(output_len).map_err(|_| Error::OutputTooLong)?;

        let mut digest = blake2b_long::hasher(DIGEST_LEN)?;
        for word in [
            params.lanes(),
            output_len,
            params.memory(),
            params.iterations(),
            params.version().into(),
            params.algorithm().into(),
        ] {
            digest.update(&word.to_le_bytes());
        }

        for (name, input) in [
            ("password", password),
            ("salt", params.salt()),
            ("secret", params.secret()),
            ("associated data", params.associated_data()),
        ] {
            let len = u32::try_from(input.len()).map_err(|_| Error::InputTooLong(name))?;
            digest.update(&len.to_le_bytes());
            digest.update(input);
        }

        let mut h0 = Zeroizing::new([0u8; DIGEST_LEN]);
        blake2b_long::finish(digest, &mut h0[..])?;
        Ok(h0)
    }
}

/// Seeds columns 0 and 1 of every lane with `H′(H0 || column || lane)`.
fn initialize_lanes(h0: &[u8; DIGEST_LEN], memory: &mut Memory<'_>) -> Result<()> {
    let mut seed = Zeroizing::new([0u8; Block::SIZE]);

    for lane in 0..memory.layout().lanes {
        for column in 0..2u32 {
            blake2b_long(
                &[&h0[..], &column.to_le_bytes(), &lane.to_le_bytes()],
                &mut seed[..],
            )?;
            memory.block_mut(lane, column as usize).load(&seed);
        }
    }

    Ok(())
}

/// XORs the last block of every lane and expands it to `out.len()` bytes.
fn finalize(memory: &Memory<'_>, out: &mut [u8]) -> Result<()> {
    let layout = memory.layout();
    let last_column = layout.lane_length - 1;

    let mut acc = Zeroizing::new(*memory.block(0, last_column));
    for lane in 1..layout.lanes {
        *acc ^= memory.block(lane, last_column);
    }

    let bytes = Zeroizing::new(acc.to_bytes());
    blake2b_long(&[&bytes[..]], out)
}

//! Memory blocks and the compression function G.

use core::ops::{BitXor, BitXorAssign};
use zeroize::DefaultIsZeroes;

/// Number of 64-bit words in a block.
const WORDS: usize = 128;

/// Mask selecting the low 32 bits of a word.
const LOW_MASK: u64 = 0xFFFF_FFFF;

/// Structure for the (1 KiB) memory block implemented as 128 64-bit words.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(align(64))]
pub struct Block([u64; WORDS]);

impl Block {
    /// Memory block size in bytes
    pub const SIZE: usize = 1024;

    /// Returns a zero-initialized block.
    #[must_use]
    pub const fn new() -> Self {
        Self([0u64; WORDS])
    }

    /// Words of this block.
    #[must_use]
    pub fn as_words(&self) -> &[u64; WORDS] {
        &self.0
    }

    pub(crate) fn as_words_mut(&mut self) -> &mut [u64; WORDS] {
        &mut self.0
    }

    /// Loads the block from its little-endian serialization.
    pub fn load(&mut self, input: &[u8; Self::SIZE]) {
        for (word, chunk) in self.0.iter_mut().zip(input.chunks_exact(8)) {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            *word = u64::from_le_bytes(bytes);
        }
    }

    /// Serializes the block as 128 little-endian words.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// The compression function G.
    ///
    /// Computes `R = X ^ Y`, applies the permutation P to each of the eight
    /// 16-word rows of `R`, then to each of the eight columns (pairs of
    /// words taken from every 16-word row), and returns the result XORed
    /// with `R`.
    #[must_use]
    pub fn compress(x: &Self, y: &Self) -> Self {
        let r = *x ^ y;
        let mut q = r;

        let mut v = [0u64; 16];

        for row in q.0.chunks_exact_mut(16) {
            v.copy_from_slice(row);
            permute(&mut v);
            row.copy_from_slice(&v);
        }

        for i in 0..8 {
            for k in 0..8 {
                v[2 * k] = q.0[2 * i + 16 * k];
                v[2 * k + 1] = q.0[2 * i + 16 * k + 1];
            }

            permute(&mut v);

            for k in 0..8 {
                q.0[2 * i + 16 * k] = v[2 * k];
                q.0[2 * i + 16 * k + 1] = v[2 * k + 1];
            }
        }

        q ^= &r;
        q
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultIsZeroes for Block {}

impl BitXor<&Block> for Block {
    type Output = Block;

    fn bitxor(mut self, rhs: &Block) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl BitXorAssign<&Block> for Block {
    fn bitxor_assign(&mut self, rhs: &Block) {
        for (dst, src) in self.0.iter_mut().zip(rhs.0.iter()) {
            *dst ^= src;
        }
    }
}

/// Multiply-add with the low halves of both operands, modulo 2^64.
#[inline(always)]
fn blamka(x: u64, y: u64) -> u64 {
    let xy = (x & LOW_MASK) * (y & LOW_MASK);
    x.wrapping_add(y).wrapping_add(xy.wrapping_mul(2))
}

#[inline(always)]
fn quarter_round(a: usize, b: usize, c: usize, d: usize, v: &mut [u64; 16]) {
    v[a] = blamka(v[a], v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(32);

    v[c] = blamka(v[c], v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);

    v[a] = blamka(v[a], v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);

    v[c] = blamka(v[c], v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

#[inline(always)]
fn permute(v: &mut [u64; 16]) {
    // column rounds
    quarter_round(0, 4, 8, 12, v);
    quarter_round(1, 5, 9, 13, v);
    quarter_round(2, 6, 10, 14, v);
    quarter_round(3, 7, 11, 15, v);

    // diagonal rounds
    quarter_round(0, 5, 10, 15, v);
    quarter_round(1, 6, 11, 12, v);
    quarter_round(2, 7, 8, 13, v);
    quarter_round(3, 4, 9, 14, v);
}

//! Argon2 variants.

use crate::{Error, Result};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// Argon2 primitive type: variants of the algorithm.
///
/// The discriminant is the type code hashed into H0 and into every
/// address block.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub enum Algorithm {
    /// Data-dependent addressing. Fastest, but the memory access pattern
    /// depends on the password.
    Argon2d = 0,

    /// Data-independent addressing. Resists cache-timing side channels.
    #[default]
    Argon2i = 1,

    /// Hybrid: data-independent for the first half of the first pass,
    /// data-dependent afterwards.
    Argon2id = 2,
}

impl Algorithm {
    /// Parse an [`Algorithm`] from the provided identifier.
    ///
    /// # Errors
    /// Returns [`Error::AlgorithmInvalid`] for anything other than
    /// `argon2d`, `argon2i` or `argon2id`.
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        id.as_ref().parse()
    }

    /// Identifier string for this algorithm.
    #[must_use]
    pub const fn ident(self) -> &'static str {
        match self {
            Algorithm::Argon2d => "argon2d",
            Algorithm::Argon2i => "argon2i",
            Algorithm::Argon2id => "argon2id",
        }
    }

    /// Whether the segment at (`pass`, `slice`) draws its pseudo-random
    /// values from address blocks rather than from the previous block.
    #[must_use]
    pub const fn uses_data_independent_addressing(self, pass: u32, slice: u32) -> bool {
        match self {
            Algorithm::Argon2d => false,
            Algorithm::Argon2i => true,
            Algorithm::Argon2id => pass == 0 && slice < crate::SYNC_POINTS / 2,
        }
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        self.ident()
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Algorithm> {
        match s {
            "argon2d" => Ok(Algorithm::Argon2d),
            "argon2i" => Ok(Algorithm::Argon2i),
            "argon2id" => Ok(Algorithm::Argon2id),
            _ => Err(Error::AlgorithmInvalid),
        }
    }
}

impl From<Algorithm> for u32 {
    fn from(algorithm: Algorithm) -> u32 {
        algorithm as u32
    }
}

impl TryFrom<u32> for Algorithm {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Algorithm::Argon2d),
            1 => Ok(Algorithm::Argon2i),
            2 => Ok(Algorithm::Argon2id),
            _ => Err(Error::AlgorithmInvalid),
        }
    }
}

//! Version numbers.

use crate::{Error, Result};

/// Version of the algorithm.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Version {
    /// Version 16 (0x10 in hex)
    ///
    /// Performs overwrite internally
    V0x10 = 0x10,

    /// Version 19 (0x13 in hex, default)
    ///
    /// Performs XOR internally
    #[default]
    V0x13 = 0x13,
}

impl Version {
    /// Whether a block produced during `pass` is XORed into the block it
    /// replaces instead of overwriting it.
    #[must_use]
    pub const fn xors_existing_block(self, pass: u32) -> bool {
        pass > 0 && matches!(self, Version::V0x13)
    }
}

impl From<Version> for u32 {
    fn from(version: Version) -> u32 {
        version as u32
    }
}

impl TryFrom<u32> for Version {
    type Error = Error;

    fn try_from(version_id: u32) -> Result<Version> {
        match version_id {
            0x10 => Ok(Version::V0x10),
            0x13 => Ok(Version::V0x13),
            _ => Err(Error::VersionInvalid),
        }
    }
}

#[test]
fn version_codes() {
    assert_eq!(Version::try_from(0x10), Ok(Version::V0x10));
    assert_eq!(Version::try_from(0x13), Ok(Version::V0x13));
    assert_eq!(Version::try_from(0x12), Err(Error::VersionInvalid));
    assert!(!Version::V0x13.xors_existing_block(0));
    assert!(Version::V0x13.xors_existing_block(1));
    assert!(!Version::V0x10.xors_existing_block(2));
}

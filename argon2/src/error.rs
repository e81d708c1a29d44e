//! Error types.

use core::fmt;

/// Result type with the `argon2` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
///
/// Every variant is a precondition violation detected before any memory is
/// allocated, so retrying with the same inputs fails the same way.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Fewer than one lane requested.
    LanesTooSmall,

    /// More than [`MAX_LANES`][crate::MAX_LANES] lanes requested.
    LanesTooBig,

    /// Memory cost below `2 * lanes` KiB.
    MemoryTooSmall,

    /// Memory cost does not fit in 32 bits.
    MemoryTooLarge,

    /// Caller-supplied block buffer is shorter than the effective memory.
    BufferTooSmall,

    /// Fewer than one pass requested.
    IterationsTooSmall,

    /// Output shorter than [`MIN_OUTPUT_LEN`][crate::MIN_OUTPUT_LEN] bytes.
    OutputTooShort,

    /// Output longer than `u32::MAX` bytes.
    OutputTooLong,

    /// A required input was not provided.
    MissingRequiredInput(&'static str),

    /// A variable-length input is longer than `u32::MAX` bytes.
    InputTooLong(&'static str),

    /// Unknown algorithm identifier.
    AlgorithmInvalid,

    /// Unknown protocol version.
    VersionInvalid,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LanesTooSmall => f.write_str("too few lanes"),
            Error::LanesTooBig => f.write_str("too many lanes"),
            Error::MemoryTooSmall => f.write_str("memory too small for lane count"),
            Error::MemoryTooLarge => f.write_str("memory cost does not fit in 32 bits"),
            Error::BufferTooSmall => f.write_str("block buffer too small for memory cost"),
            Error::IterationsTooSmall => f.write_str("too few iterations"),
            Error::OutputTooShort => f.write_str("output too short"),
            Error::OutputTooLong => f.write_str("output too long"),
            Error::MissingRequiredInput(name) => write!(f, "missing required input: {name}"),
            Error::InputTooLong(name) => write!(f, "input too long: {name}"),
            Error::AlgorithmInvalid => f.write_str("invalid algorithm"),
            Error::VersionInvalid => f.write_str("invalid version"),
        }
    }
}

impl core::error::Error for Error {}

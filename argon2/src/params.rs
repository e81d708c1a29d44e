//! Argon2 parameters and their builder.

use crate::{Algorithm, Error, MAX_LANES, MIN_ITERATIONS, MIN_LANES, Result, SYNC_POINTS, Version};
use alloc::vec::Vec;
use core::fmt;
use zeroize::Zeroizing;

/// Argon2 parameters.
///
/// Immutable once built; obtain one through [`ParamsBuilder`]. Salt and
/// secret are wiped when the parameters are dropped.
#[derive(Clone)]
pub struct Params {
    algorithm: Algorithm,
    version: Version,
    salt: Zeroizing<Vec<u8>>,
    secret: Zeroizing<Vec<u8>>,
    associated_data: Vec<u8>,
    iterations: u32,
    memory: u32,
    lanes: u32,
}

impl Params {
    /// Default number of passes.
    pub const DEFAULT_ITERATIONS: u32 = 3;

    /// Default memory cost in KiB (2^12).
    pub const DEFAULT_MEMORY: u32 = 4096;

    /// Default number of lanes.
    pub const DEFAULT_LANES: u32 = 1;

    /// Start building parameters from the defaults.
    #[must_use]
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::new()
    }

    /// Algorithm variant.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Protocol version.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Salt.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Associated data.
    #[must_use]
    pub fn associated_data(&self) -> &[u8] {
        &self.associated_data
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Number of passes over memory (`t`).
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Requested memory cost in KiB (`m`).
    ///
    /// This is the value hashed into H0. The memory actually filled is
    /// [`Params::block_count`] blocks, which may be larger.
    #[must_use]
    pub fn memory(&self) -> u32 {
        self.memory
    }

    /// Degree of parallelism (`p`).
    #[must_use]
    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    /// Blocks per segment: the memory cost, raised to at least two blocks
    /// per segment, divided over `lanes * 4` segments.
    #[must_use]
    pub fn segment_length(&self) -> usize {
        let segments = self.lanes as usize * SYNC_POINTS as usize;
        let memory = (self.memory as usize).max(2 * segments);
        memory / segments
    }

    /// Blocks per lane.
    #[must_use]
    pub fn lane_length(&self) -> usize {
        self.segment_length() * SYNC_POINTS as usize
    }

    /// Effective number of 1 KiB blocks filled.
    ///
    /// `segment_length * lanes * 4`; this rounding can exceed the requested
    /// memory cost.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.lane_length() * self.lanes as usize
    }

    /// Checks every precondition that does not depend on the password or
    /// the output length.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.lanes < MIN_LANES {
            return Err(Error::LanesTooSmall);
        }

        if self.lanes > MAX_LANES {
            return Err(Error::LanesTooBig);
        }

        if self.memory < 2 * self.lanes {
            return Err(Error::MemoryTooSmall);
        }

        if self.iterations < MIN_ITERATIONS {
            return Err(Error::IterationsTooSmall);
        }

        check_len("salt", &self.salt)?;
        check_len("secret", &self.secret)?;
        check_len("associated data", &self.associated_data)?;
        Ok(())
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params")
            .field("algorithm", &self.algorithm)
            .field("version", &self.version)
            .field("salt_len", &self.salt.len())
            .field("secret_len", &self.secret.len())
            .field("associated_data_len", &self.associated_data.len())
            .field("iterations", &self.iterations)
            .field("memory", &self.memory)
            .field("lanes", &self.lanes)
            .finish()
    }
}

/// Builder for Argon2 [`Params`].
///
/// Defaults: Argon2i, version 0x13, `t = 3`, `m = 4096` KiB, `p = 1`, empty
/// secret and associated data. A salt must be supplied.
#[derive(Clone, Default)]
pub struct ParamsBuilder {
    algorithm: Algorithm,
    version: Version,
    salt: Option<Zeroizing<Vec<u8>>>,
    secret: Zeroizing<Vec<u8>>,
    associated_data: Vec<u8>,
    iterations: Option<u32>,
    memory: Option<u64>,
    lanes: Option<u32>,
}

impl ParamsBuilder {
    /// Create a new builder with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the algorithm variant.
    pub fn algorithm(&mut self, algorithm: Algorithm) -> &mut Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the protocol version.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = version;
        self
    }

    /// Set the salt.
    pub fn salt(&mut self, salt: &[u8]) -> &mut Self {
        self.salt = Some(Zeroizing::new(salt.to_vec()));
        self
    }

    /// Set the secret (key) input.
    pub fn secret(&mut self, secret: &[u8]) -> &mut Self {
        self.secret = Zeroizing::new(secret.to_vec());
        self
    }

    /// Set the associated data.
    pub fn associated_data(&mut self, associated_data: &[u8]) -> &mut Self {
        self.associated_data = associated_data.to_vec();
        self
    }

    /// Set the number of passes.
    pub fn iterations(&mut self, iterations: u32) -> &mut Self {
        self.iterations = Some(iterations);
        self
    }

    /// Set the memory cost in KiB.
    pub fn memory(&mut self, kib: u32) -> &mut Self {
        self.memory = Some(u64::from(kib));
        self
    }

    /// Set the memory cost to `2^exponent` KiB.
    pub fn memory_power_of_two(&mut self, exponent: u32) -> &mut Self {
        self.memory = Some(1u64.checked_shl(exponent).unwrap_or(u64::MAX));
        self
    }

    /// Set the number of lanes.
    pub fn lanes(&mut self, lanes: u32) -> &mut Self {
        self.lanes = Some(lanes);
        self
    }

    /// Validate and build the parameters.
    ///
    /// # Errors
    /// Returns the first violated precondition, checked in this order:
    /// lane count, memory cost, iterations, salt presence, field lengths.
    pub fn build(&self) -> Result<Params> {
        let memory = u32::try_from(self.memory.unwrap_or(u64::from(Params::DEFAULT_MEMORY)))
            .map_err(|_| Error::MemoryTooLarge)?;

        let mut params = Params {
            algorithm: self.algorithm,
            version: self.version,
            salt: Zeroizing::new(Vec::new()),
            secret: self.secret.clone(),
            associated_data: self.associated_data.clone(),
            iterations: self.iterations.unwrap_or(Params::DEFAULT_ITERATIONS),
            memory,
            lanes: self.lanes.unwrap_or(Params::DEFAULT_LANES),
        };

        params.validate()?;

        params.salt = self
            .salt
            .clone()
            .ok_or(Error::MissingRequiredInput("salt"))?;
        check_len("salt", &params.salt)?;

        Ok(params)
    }
}

impl fmt::Debug for ParamsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamsBuilder")
            .field("algorithm", &self.algorithm)
            .field("version", &self.version)
            .field("iterations", &self.iterations)
            .field("memory", &self.memory)
            .field("lanes", &self.lanes)
            .finish_non_exhaustive()
    }
}

fn check_len(name: &'static str, field: &[u8]) -> Result<()> {
    if u32::try_from(field.len()).is_err() {
        return Err(Error::InputTooLong(name));
    }
    Ok(())
}

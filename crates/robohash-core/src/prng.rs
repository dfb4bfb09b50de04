//! Chunked PRNG over a seeded digest.
//!
//! The digest is split into fixed-width big-endian chunks and each draw
//! consumes exactly one chunk:
//!
//! ```text
//! draw_i = u64_be(digest[8*i .. 8*(i+1)]) mod modulus
//! ```
//!
//! There is no re-seeding. Once every chunk is consumed the generator is
//! exhausted, so callers must size their draw count against
//! [`EntropyBudget::max_draws`] before starting.

use tracing::trace;

use crate::digest::{seeded_digest, Digest512, DIGEST_LEN};
use crate::error::{ConfigurationError, RobohashError};

/// Width of the digest and of each draw, and the resulting draw ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyBudget {
    /// Total digest width in bits.
    pub digest_bits: usize,
    /// Bits consumed per draw.
    pub chunk_bits: usize,
    /// Maximum number of draws one generator can serve.
    pub max_draws: usize,
}

impl EntropyBudget {
    /// One HMAC-SHA-512 digest consumed as eight 64-bit chunks.
    pub const SHA512: EntropyBudget = EntropyBudget {
        digest_bits: DIGEST_LEN * 8,
        chunk_bits: 64,
        max_draws: DIGEST_LEN * 8 / 64,
    };

    /// Builds a budget, checking that [`ChunkedPrng`] can serve it.
    ///
    /// The generator reads one HMAC-SHA-512 digest in 64-bit chunks; that is
    /// the only shape accepted.
    pub fn new(digest_bits: usize, chunk_bits: usize) -> Result<Self, ConfigurationError> {
        if chunk_bits == 0 || digest_bits == 0 {
            return Err(ConfigurationError::InvalidBudget(
                "digest and chunk widths must be non-zero".to_string(),
            ));
        }
        if digest_bits % chunk_bits != 0 {
            return Err(ConfigurationError::InvalidBudget(format!(
                "{} digest bits do not split into {}-bit chunks",
                digest_bits, chunk_bits
            )));
        }
        let budget = Self {
            digest_bits,
            chunk_bits,
            max_draws: digest_bits / chunk_bits,
        };
        budget.check_served()?;
        Ok(budget)
    }

    /// Fails unless this budget matches the digest [`ChunkedPrng`] draws from.
    pub fn check_served(&self) -> Result<(), ConfigurationError> {
        if *self != Self::SHA512 {
            return Err(ConfigurationError::InvalidBudget(format!(
                "generator serves {}-bit digests in {}-bit chunks ({} draws), got {}/{} ({} draws)",
                Self::SHA512.digest_bits,
                Self::SHA512.chunk_bits,
                Self::SHA512.max_draws,
                self.digest_bits,
                self.chunk_bits,
                self.max_draws
            )));
        }
        Ok(())
    }

    /// Checks that one color draw plus one draw per category fits.
    pub fn check_draws(&self, categories: usize) -> Result<(), ConfigurationError> {
        let required = categories + 1;
        if required > self.max_draws {
            return Err(ConfigurationError::TooManyCategories {
                categories,
                required,
                max_draws: self.max_draws,
            });
        }
        Ok(())
    }
}

impl Default for EntropyBudget {
    fn default() -> Self {
        Self::SHA512
    }
}

/// Deterministic bounded-integer generator backed by one digest.
///
/// Constructed fresh per generation request and discarded afterwards.
#[derive(Debug, Clone)]
pub struct ChunkedPrng {
    digest: Digest512,
    index: usize,
}

impl ChunkedPrng {
    /// Creates a generator positioned at the first chunk of `digest`.
    pub fn new(digest: Digest512) -> Self {
        Self { digest, index: 0 }
    }

    /// Computes the seeded digest of `(identifier, key)` and wraps it.
    pub fn from_input(identifier: &str, key: &str) -> Self {
        Self::new(seeded_digest(identifier, key))
    }

    /// Returns the next draw reduced into `[0, modulus)`.
    ///
    /// Fails with [`RobohashError::InvalidModulus`] for a zero modulus and
    /// with [`RobohashError::ExhaustedEntropy`] once every chunk is spent.
    /// A failed draw leaves the chunk index untouched.
    pub fn next_bounded(&mut self, modulus: u64) -> Result<u64, RobohashError> {
        if modulus == 0 {
            return Err(RobohashError::InvalidModulus(modulus));
        }
        let value = self
            .digest
            .chunk(self.index)
            .ok_or_else(|| RobohashError::ExhaustedEntropy {
                consumed: self.index,
            })?;

        let draw = value % modulus;
        trace!(chunk = self.index, modulus, draw, "digest draw");
        self.index += 1;
        Ok(draw)
    }

    /// Draws an index into a list of `len` options.
    pub fn next_index(&mut self, len: usize) -> Result<usize, RobohashError> {
        let draw = self.next_bounded(len as u64)?;
        // draw < len, so it fits back into usize
        Ok(draw as usize)
    }

    /// Number of chunks consumed so far.
    pub fn chunks_consumed(&self) -> usize {
        self.index
    }

    /// Number of draws still available.
    pub fn remaining(&self) -> usize {
        self.budget().max_draws.saturating_sub(self.index)
    }

    /// The budget this generator draws against.
    pub fn budget(&self) -> EntropyBudget {
        EntropyBudget::SHA512
    }

    /// The digest backing this generator.
    pub fn digest(&self) -> &Digest512 {
        &self.digest
    }
}

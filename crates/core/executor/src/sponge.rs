use serde::{Deserialize, Serialize};
use sha3_rocc_primitives::{
    consts::{bytes_to_lane_le, lanes_to_bytes_le, LANE_SIZE, STATE_BYTES, STATE_SIZE},
    keccak_f1600,
};
use thiserror::Error;

/// The phase of a [`SpongeState`].
///
/// A sponge starts out [`Phase::Absorbing`] and moves to [`Phase::Squeezing`] on the first squeeze.
/// The transition never reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Message words may be absorbed.
    Absorbing,
    /// The sponge has been finalized and only produces output.
    Squeezing,
}

/// An error raised by a [`SpongeState`] call.
///
/// Both variants are caller bugs. A failing call never mutates the sponge.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpongeError {
    /// The input or output length is not a whole number of 8-byte words (or rate blocks).
    #[error("length {len} is not a multiple of {multiple} bytes")]
    InvalidLength {
        /// The offending length in bytes.
        len: usize,
        /// The granularity the length must be a multiple of.
        multiple: usize,
    },
    /// `absorb` was called after the sponge started squeezing.
    #[error("cannot absorb into a sponge that is already squeezing")]
    InvalidState,
}

/// An incremental Keccak-f[1600] sponge.
///
/// The sponge accepts whole 8-byte words only; padding and domain separation are the caller's
/// job. A block that is filled exactly is permuted lazily, by the next call that needs the room,
/// so `pending_bytes` ranges over `0..=rate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpongeState {
    lanes: [u64; STATE_SIZE],
    rate: usize,
    phase: Phase,
    pending_bytes: usize,
}

impl SpongeState {
    /// Creates a zeroed sponge with a rate of `rate` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is not a multiple of 8 in `8..=200`.
    #[must_use]
    pub fn new(rate: usize) -> Self {
        assert!(
            rate % LANE_SIZE == 0 && (LANE_SIZE..=STATE_BYTES).contains(&rate),
            "invalid sponge rate: {rate}"
        );
        Self { lanes: [0; STATE_SIZE], rate, phase: Phase::Absorbing, pending_bytes: 0 }
    }

    /// Re-initializes the sponge in place, discarding all state.
    pub fn reset(&mut self, rate: usize) {
        *self = Self::new(rate);
    }

    /// The 25 state lanes.
    #[must_use]
    pub fn lanes(&self) -> &[u64; STATE_SIZE] {
        &self.lanes
    }

    /// The rate in bytes.
    #[must_use]
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The number of bytes XORed into the current block that have not been permuted yet.
    #[must_use]
    pub fn pending_bytes(&self) -> usize {
        self.pending_bytes
    }

    /// Absorbs `message` and returns the number of permutations performed.
    ///
    /// `message.len()` must be a multiple of 8. Bytes are XORed in little-endian words starting at
    /// the first lane of the current block that has not been written yet.
    pub fn absorb(&mut self, message: &[u8]) -> Result<usize, SpongeError> {
        if self.phase == Phase::Squeezing {
            return Err(SpongeError::InvalidState);
        }
        if message.len() % LANE_SIZE != 0 {
            return Err(SpongeError::InvalidLength { len: message.len(), multiple: LANE_SIZE });
        }

        let mut message = message;
        let mut permutations = 0;
        while self.pending_bytes + message.len() > self.rate {
            let (block, rest) = message.split_at(self.rate - self.pending_bytes);
            self.xor_words(block);
            keccak_f1600(&mut self.lanes);
            permutations += 1;
            self.pending_bytes = 0;
            message = rest;
        }

        self.xor_words(message);
        self.pending_bytes += message.len();

        tracing::trace!(permutations, pending_bytes = self.pending_bytes, "absorbed");
        Ok(permutations)
    }

    /// Squeezes `nblocks` rate-sized blocks and returns them with the number of permutations.
    ///
    /// The first squeeze finalizes the sponge: it flips the top bit of the last lane in the rate
    /// block and moves to [`Phase::Squeezing`].
    ///
    /// # Panics
    ///
    /// Panics if `nblocks * rate` overflows `usize`. The sponge is left untouched in that case.
    #[must_use]
    pub fn squeeze_blocks(&mut self, nblocks: usize) -> (Vec<u8>, usize) {
        let len = nblocks.checked_mul(self.rate).expect("output length overflows usize");
        let mut output = vec![0u8; len];
        let permutations = self.squeeze_into_blocks(&mut output);
        (output, permutations)
    }

    /// Squeezes `out.len() / rate` blocks into `out` and returns the number of permutations.
    ///
    /// `out.len()` must be a multiple of the rate.
    pub fn squeeze_blocks_into(&mut self, out: &mut [u8]) -> Result<usize, SpongeError> {
        if out.len() % self.rate != 0 {
            return Err(SpongeError::InvalidLength { len: out.len(), multiple: self.rate });
        }
        Ok(self.squeeze_into_blocks(out))
    }

    fn squeeze_into_blocks(&mut self, out: &mut [u8]) -> usize {
        if self.phase == Phase::Absorbing {
            self.finalize();
        }

        let rate_lanes = self.rate / LANE_SIZE;
        let mut permutations = 0;
        for block in out.chunks_exact_mut(self.rate) {
            keccak_f1600(&mut self.lanes);
            permutations += 1;
            lanes_to_bytes_le(&self.lanes[..rate_lanes], block);
        }

        tracing::trace!(permutations, "squeezed");
        permutations
    }

    fn finalize(&mut self) {
        self.lanes[self.rate / LANE_SIZE - 1] ^= 1 << 63;
        self.pending_bytes = 0;
        self.phase = Phase::Squeezing;
        tracing::trace!("finalized");
        self.trace_state();
    }

    /// XORs whole words into the state, starting at the first unwritten lane of the block.
    fn xor_words(&mut self, words: &[u8]) {
        let start = self.pending_bytes / LANE_SIZE;
        for (lane, word) in self.lanes[start..].iter_mut().zip(words.chunks_exact(LANE_SIZE)) {
            *lane ^= bytes_to_lane_le(word);
        }
    }

    /// Dumps the lanes at TRACE level, eight per line.
    pub fn trace_state(&self) {
        if !tracing::enabled!(tracing::Level::TRACE) {
            return;
        }
        for row in self.lanes.chunks(8) {
            let line = row.iter().map(|lane| format!("{lane:016X}")).collect::<Vec<_>>().join("  ");
            tracing::trace!("  {line}");
        }
    }
}

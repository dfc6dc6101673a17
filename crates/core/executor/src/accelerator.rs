use enum_map::Enum;
use serde::{Deserialize, Serialize};
use sha3_rocc_primitives::consts::{LANE_SIZE, STATE_BYTES};
use strum_macros::Display;
use thiserror::Error;

use crate::{AcceleratorOpts, AcceleratorReport, Charge, SpongeError, SpongeState};

/// The instructions the accelerator exposes to a CPU core.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Enum,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum AcceleratorOp {
    /// Zero the state and set the rate.
    Configure,
    /// Absorb a word-aligned message.
    Absorb,
    /// Squeeze a word-aligned amount of output.
    Squeeze,
}

/// An error raised by an [`Accelerator`] instruction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceleratorError {
    /// The underlying sponge rejected the request.
    #[error(transparent)]
    Sponge(#[from] SpongeError),
    /// `configure` was given a rate the sponge cannot use.
    #[error("invalid rate: {0} bytes")]
    InvalidRate(usize),
    /// `absorb` or `squeeze` was issued before `configure`.
    #[error("the accelerator has not been configured")]
    NotConfigured,
}

/// A functional and cycle-level model of the SHA-3 accelerator.
///
/// Every instruction returns a [`Charge`] computed by the configured [`crate::CostModel`], and is
/// accumulated into an [`AcceleratorReport`]. Failed instructions are neither charged nor
/// recorded.
#[derive(Debug, Clone, Default)]
pub struct Accelerator {
    opts: AcceleratorOpts,
    sponge: Option<SpongeState>,
    /// Whole squeezed blocks, before truncation to the requested length.
    scratch: Vec<u8>,
    report: AcceleratorReport,
}

impl Accelerator {
    /// Creates an unconfigured accelerator with the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unconfigured accelerator with the given options.
    #[must_use]
    pub fn with_opts(opts: AcceleratorOpts) -> Self {
        Self { opts, ..Self::default() }
    }

    /// The options in use.
    #[must_use]
    pub fn opts(&self) -> &AcceleratorOpts {
        &self.opts
    }

    /// The sponge, or `None` before the first `configure`.
    #[must_use]
    pub fn sponge(&self) -> Option<&SpongeState> {
        self.sponge.as_ref()
    }

    /// Everything executed so far.
    #[must_use]
    pub fn report(&self) -> &AcceleratorReport {
        &self.report
    }

    /// Resets the sponge to a zero state with a rate of `rate` bytes.
    pub fn configure(&mut self, rate: usize) -> Result<Charge, AcceleratorError> {
        let max_rate = if self.opts.require_capacity { STATE_BYTES - LANE_SIZE } else { STATE_BYTES };
        if rate % LANE_SIZE != 0 || !(LANE_SIZE..=max_rate).contains(&rate) {
            return Err(AcceleratorError::InvalidRate(rate));
        }

        match self.sponge.as_mut() {
            Some(sponge) => sponge.reset(rate),
            None => self.sponge = Some(SpongeState::new(rate)),
        }
        tracing::debug!(rate, "configure");

        let charge = Charge::default();
        self.report.record(AcceleratorOp::Configure, 0, charge);
        Ok(charge)
    }

    /// Absorbs `message`, whose length must be a multiple of 8.
    pub fn absorb(&mut self, message: &[u8]) -> Result<Charge, AcceleratorError> {
        let sponge = self.sponge.as_mut().ok_or(AcceleratorError::NotConfigured)?;
        let permutations = sponge.absorb(message)?;
        sponge.trace_state();

        let charge = Charge {
            permutations,
            cycles: self.opts.cost.absorb_cycles(message.len(), permutations),
        };
        tracing::debug!(len = message.len(), permutations, cycles = charge.cycles, "absorb");

        self.report.record(AcceleratorOp::Absorb, message.len(), charge);
        Ok(charge)
    }

    /// Fills `out`, whose length must be a multiple of 8, with squeezed output.
    ///
    /// Whole rate blocks are squeezed and the tail of the last block is discarded, so a length
    /// that is not a multiple of the rate still costs a full permutation for the last block.
    pub fn squeeze(&mut self, out: &mut [u8]) -> Result<Charge, AcceleratorError> {
        let sponge = self.sponge.as_mut().ok_or(AcceleratorError::NotConfigured)?;
        if out.len() % LANE_SIZE != 0 {
            return Err(SpongeError::InvalidLength { len: out.len(), multiple: LANE_SIZE }.into());
        }

        let nblocks = out.len().div_ceil(sponge.rate());
        self.scratch.clear();
        self.scratch.resize(nblocks * sponge.rate(), 0);
        let permutations = sponge.squeeze_blocks_into(&mut self.scratch)?;
        out.copy_from_slice(&self.scratch[..out.len()]);
        sponge.trace_state();

        let charge =
            Charge { permutations, cycles: self.opts.cost.squeeze_cycles(out.len(), permutations) };
        tracing::debug!(len = out.len(), permutations, cycles = charge.cycles, "squeeze");

        self.report.record(AcceleratorOp::Squeeze, out.len(), charge);
        Ok(charge)
    }
}

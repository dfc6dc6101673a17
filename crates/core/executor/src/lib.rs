//! A functional and cycle-level model of a SHA-3 (Keccak-f[1600]) RoCC accelerator.
//!
//! Data flows one way: a caller issues [`Accelerator`] instructions, the accelerator drives a
//! [`SpongeState`], and the sponge calls the permutation from `sha3-rocc-primitives`. Each
//! instruction reports the permutations it performed and the cycles the [`CostModel`] charges for
//! it.

#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unreadable_literal)]
#![warn(missing_docs)]

mod accelerator;
mod cost;
mod opts;
mod report;
mod sponge;
pub mod staging;
mod utils;

pub use accelerator::*;
pub use cost::*;
pub use opts::*;
pub use report::*;
pub use sponge::*;
pub use utils::*;

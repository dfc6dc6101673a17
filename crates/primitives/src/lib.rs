//! Keccak-f[1600] permutation and lane helpers shared by the SHA-3 accelerator model.

pub mod consts;
pub mod keccak;

pub use keccak::{keccak_f1600, lane_index};

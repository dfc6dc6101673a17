//! The Keccak-f[1600] permutation.
//!
//! The state is 25 lanes laid out row-major: lane `(x, y)` lives at index `x + 5 * y`, where `x`
//! is the column and `y` the row. Every step below operates in place on that layout, except
//! [`rho_pi`], which scatters into a fresh array because pi moves every lane but one.

use crate::consts::{NUM_ROUNDS, RC, RHO, STATE_SIZE};

/// The index of the lane at column `x` and row `y`.
#[inline]
#[must_use]
pub const fn lane_index(x: usize, y: usize) -> usize {
    x + 5 * y
}

/// Theta: XOR every lane with the parities of its two neighbouring columns.
#[inline]
pub fn theta(state: &mut [u64; STATE_SIZE]) {
    let mut parity = [0u64; 5];
    for (x, c) in parity.iter_mut().enumerate() {
        *c = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
    }

    for x in 0..5 {
        let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            state[lane_index(x, y)] ^= d;
        }
    }
}

/// Rho and pi: rotate each lane by its fixed offset and move it from `(x, y)` to
/// `(y, 2x + 3y mod 5)`.
#[inline]
#[must_use]
pub fn rho_pi(state: &[u64; STATE_SIZE]) -> [u64; STATE_SIZE] {
    let mut moved = [0u64; STATE_SIZE];
    for y in 0..5 {
        for x in 0..5 {
            let from = lane_index(x, y);
            moved[lane_index(y, (2 * x + 3 * y) % 5)] = state[from].rotate_left(RHO[from]);
        }
    }
    moved
}

/// Chi: the only nonlinear step, combining each lane with the next two along its row.
#[inline]
pub fn chi(state: &mut [u64; STATE_SIZE], moved: &[u64; STATE_SIZE]) {
    for y in 0..5 {
        for x in 0..5 {
            state[lane_index(x, y)] = moved[lane_index(x, y)]
                ^ (!moved[lane_index((x + 1) % 5, y)] & moved[lane_index((x + 2) % 5, y)]);
        }
    }
}

/// Iota: XOR the round constant into lane `(0, 0)`.
#[inline]
pub fn iota(state: &mut [u64; STATE_SIZE], round: usize) {
    state[0] ^= RC[round];
}

/// Runs round `round` of the permutation.
#[inline]
pub fn keccak_round(state: &mut [u64; STATE_SIZE], round: usize) {
    theta(state);
    let moved = rho_pi(state);
    chi(state, &moved);
    iota(state, round);
}

/// Applies the full 24-round Keccak-f[1600] permutation to `state`.
pub fn keccak_f1600(state: &mut [u64; STATE_SIZE]) {
    for round in 0..NUM_ROUNDS {
        keccak_round(state, round);
    }
}

/// The number of rounds in one Keccak-f[1600] permutation.
pub const NUM_ROUNDS: usize = 24;

/// The number of 64-bit lanes in the permutation state.
pub const STATE_SIZE: usize = 25;

/// The size of the permutation state in bytes.
pub const STATE_BYTES: usize = STATE_SIZE * LANE_SIZE;

/// The size of a lane in bytes.
pub const LANE_SIZE: usize = 8;

/// The Keccak round constants, XORed into lane (0, 0) by the iota step.
pub const RC: [u64; NUM_ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808A,
    0x8000000080008000,
    0x000000000000808B,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008A,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000A,
    0x000000008000808B,
    0x800000000000008B,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800A,
    0x800000008000000A,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// The rho rotation offsets, indexed by `x + 5 * y`.
pub const RHO: [u32; STATE_SIZE] = [
    0, 1, 62, 28, 27, //
    36, 44, 6, 55, 20, //
    3, 10, 43, 25, 39, //
    41, 45, 15, 21, 8, //
    18, 2, 61, 56, 14,
];

/// Loads a lane from 8 bytes in little endian.
#[inline]
#[must_use]
pub fn bytes_to_lane_le(bytes: &[u8]) -> u64 {
    debug_assert_eq!(bytes.len(), LANE_SIZE);
    let mut word = [0u8; LANE_SIZE];
    word.copy_from_slice(bytes);
    u64::from_le_bytes(word)
}

/// Writes lanes into `out` in little endian, 8 bytes per lane.
pub fn lanes_to_bytes_le(lanes: &[u64], out: &mut [u8]) {
    debug_assert_eq!(lanes.len() * LANE_SIZE, out.len());
    for (chunk, lane) in out.chunks_exact_mut(LANE_SIZE).zip(lanes) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
}

// Converts a num to a string with commas every 3 digits.
pub fn num_to_comma_separated<T: ToString>(value: T) -> String {
    value
        .to_string()
        .chars()
        .rev()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect()
}

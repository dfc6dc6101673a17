//! The FIPS-202 functions the CLI can run on the accelerator.
//!
//! The accelerator is padding-agnostic, so each variant supplies the rate to configure, the
//! domain-separation byte that starts the padding, and how many bytes of output to squeeze.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Variant {
    #[value(name = "sha3-224")]
    Sha3_224,
    #[value(name = "sha3-256")]
    Sha3_256,
    #[value(name = "sha3-384")]
    Sha3_384,
    #[value(name = "sha3-512")]
    Sha3_512,
    #[value(name = "shake128")]
    Shake128,
    #[value(name = "shake256")]
    Shake256,
    /// The pre-standard Keccak padding used by Ethereum.
    #[value(name = "keccak256")]
    Keccak256,
}

/// SHA-3 appends the bits `01` before the `10*1` padding.
const SHA3_PAD: u8 = 0x06;
/// SHAKE appends the bits `1111`.
const SHAKE_PAD: u8 = 0x1F;
const KECCAK_PAD: u8 = 0x01;

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::Sha3_224,
        Variant::Sha3_256,
        Variant::Sha3_384,
        Variant::Sha3_512,
        Variant::Shake128,
        Variant::Shake256,
        Variant::Keccak256,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Sha3_224 => "sha3-224",
            Variant::Sha3_256 => "sha3-256",
            Variant::Sha3_384 => "sha3-384",
            Variant::Sha3_512 => "sha3-512",
            Variant::Shake128 => "shake128",
            Variant::Shake256 => "shake256",
            Variant::Keccak256 => "keccak256",
        }
    }

    /// The rate in bytes: the state width minus twice the security strength.
    pub fn rate(self) -> usize {
        match self {
            Variant::Sha3_224 => 144,
            Variant::Sha3_256 | Variant::Shake256 | Variant::Keccak256 => 136,
            Variant::Sha3_384 => 104,
            Variant::Sha3_512 => 72,
            Variant::Shake128 => 168,
        }
    }

    /// The domain-separation byte placed right after the message.
    pub fn pad(self) -> u8 {
        match self {
            Variant::Sha3_224 | Variant::Sha3_256 | Variant::Sha3_384 | Variant::Sha3_512 => {
                SHA3_PAD
            }
            Variant::Shake128 | Variant::Shake256 => SHAKE_PAD,
            Variant::Keccak256 => KECCAK_PAD,
        }
    }

    /// The digest length, or the default output length of an XOF.
    pub fn default_out_len(self) -> usize {
        match self {
            Variant::Sha3_224 => 28,
            Variant::Sha3_256 | Variant::Shake128 | Variant::Keccak256 => 32,
            Variant::Sha3_384 => 48,
            Variant::Sha3_512 | Variant::Shake256 => 64,
        }
    }

    /// Whether the output length can be chosen freely.
    pub fn is_xof(self) -> bool {
        matches!(self, Variant::Shake128 | Variant::Shake256)
    }
}

//! Caller-side staging of byte messages into the whole words the accelerator accepts.
//!
//! The accelerator only absorbs 8-byte words and knows nothing about padding. A caller streams
//! bytes through a [`MessageStager`], which forwards every complete word and holds back a tail of
//! at most 7 bytes. [`MessageStager::finish`] then packs that tail together with the caller's
//! domain-separation byte into one last little-endian word. The final `0x80` bit of the padding
//! is not staged: the accelerator sets it when it switches to squeezing.

use sha3_rocc_primitives::consts::LANE_SIZE;

use crate::{Accelerator, AcceleratorError, Charge};

/// Packs a sub-word tail and the padding byte into the final message word.
///
/// # Panics
///
/// Panics if `tail` holds 8 bytes or more.
#[must_use]
pub fn pad_final_word(tail: &[u8], pad: u8) -> [u8; LANE_SIZE] {
    assert!(tail.len() < LANE_SIZE, "tail of {} bytes does not fit before the pad", tail.len());
    let mut word = [0u8; LANE_SIZE];
    word[..tail.len()].copy_from_slice(tail);
    word[tail.len()] = pad;
    word
}

/// Streams an arbitrary byte message into an [`Accelerator`] a whole word at a time.
#[derive(Debug, Clone, Default)]
pub struct MessageStager {
    tail: Vec<u8>,
    staged: Vec<u8>,
    charge: Charge,
}

impl MessageStager {
    /// Creates a stager with nothing held back.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes held back because they do not fill a whole word yet.
    #[must_use]
    pub fn tail(&self) -> &[u8] {
        &self.tail
    }

    /// Absorbs every complete word of `tail || bytes` and holds back the rest.
    pub fn push(&mut self, acc: &mut Accelerator, bytes: &[u8]) -> Result<Charge, AcceleratorError> {
        self.staged.clear();
        self.staged.extend_from_slice(&self.tail);
        self.staged.extend_from_slice(bytes);

        let aligned = self.staged.len() - self.staged.len() % LANE_SIZE;
        let charge =
            if aligned > 0 { acc.absorb(&self.staged[..aligned])? } else { Charge::default() };

        self.tail.clear();
        self.tail.extend_from_slice(&self.staged[aligned..]);
        self.charge += charge;
        Ok(charge)
    }

    /// Absorbs the held-back tail followed by `pad` as the last word of the message.
    pub fn finish(mut self, acc: &mut Accelerator, pad: u8) -> Result<Charge, AcceleratorError> {
        let charge = acc.absorb(&pad_final_word(&self.tail, pad))?;
        self.charge += charge;
        Ok(self.charge)
    }
}

/// Configures `acc` with `rate` and absorbs `message` followed by the padding byte `pad`.
///
/// Returns the summed charge of the absorb instructions. The accelerator is left ready to squeeze.
pub fn absorb_padded(
    acc: &mut Accelerator,
    rate: usize,
    message: &[u8],
    pad: u8,
) -> Result<Charge, AcceleratorError> {
    acc.configure(rate)?;
    let mut stager = MessageStager::new();
    stager.push(acc, message)?;
    stager.finish(acc, pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_final_word() {
        assert_eq!(pad_final_word(&[], 0x06), [0x06, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(pad_final_word(&[1, 2, 3], 0x1F), [1, 2, 3, 0x1F, 0, 0, 0, 0]);
        assert_eq!(pad_final_word(&[9; 7], 0x01), [9, 9, 9, 9, 9, 9, 9, 0x01]);
    }

    #[test]
    #[should_panic]
    fn test_pad_final_word_rejects_full_word() {
        let _ = pad_final_word(&[0; 8], 0x06);
    }

    #[test]
    fn test_push_holds_back_tail() {
        let mut acc = Accelerator::new();
        acc.configure(136).unwrap();
        let mut stager = MessageStager::new();

        assert_eq!(stager.push(&mut acc, &[1; 5]).unwrap(), Charge::default());
        assert_eq!(stager.tail(), &[1; 5]);
        assert_eq!(acc.report().bytes_absorbed, 0);

        stager.push(&mut acc, &[2; 12]).unwrap();
        assert_eq!(stager.tail(), &[2]);
        assert_eq!(acc.report().bytes_absorbed, 16);
        assert_eq!(acc.sponge().unwrap().pending_bytes(), 16);
    }

    #[test]
    fn test_finish_sums_charges() {
        let mut acc = Accelerator::new();
        let charge = absorb_padded(&mut acc, 72, &[0xAB; 100], 0x06).unwrap();
        // 96 aligned bytes cross one block, then the padded word.
        assert_eq!(charge.permutations, 1);
        assert_eq!(charge.cycles, (2 * 12 + 26 + 4) + (2 + 4));
        assert_eq!(acc.sponge().unwrap().pending_bytes(), 32);
    }

    #[test]
    fn test_finish_includes_every_push() {
        let mut acc = Accelerator::new();
        acc.configure(72).unwrap();
        let mut stager = MessageStager::new();
        let mut pushed = Charge::default();
        for chunk in [&[1u8; 70][..], &[2; 13], &[3; 40]] {
            pushed += stager.push(&mut acc, chunk).unwrap();
        }

        let total = stager.finish(&mut acc, 0x06).unwrap();
        assert_eq!(total.permutations, pushed.permutations);
        assert_eq!(total.cycles, pushed.cycles + 2 + 4);
        assert_eq!(total.cycles, acc.report().total_cycles());
    }

    #[test]
    fn test_chunked_matches_single_push() {
        let message: Vec<u8> = (0..=255).cycle().take(1000).collect();

        let mut single = Accelerator::new();
        absorb_padded(&mut single, 136, &message, 0x1F).unwrap();

        let mut chunked = Accelerator::new();
        chunked.configure(136).unwrap();
        let mut stager = MessageStager::new();
        for chunk in message.chunks(37) {
            stager.push(&mut chunked, chunk).unwrap();
        }
        stager.finish(&mut chunked, 0x1F).unwrap();

        assert_eq!(single.sponge(), chunked.sponge());
    }
}

use anchor_lang::prelude::*;
use solana_program::keccak::hashv;

use crate::constants::{MAX_BINGO_NUMBER, MAX_NUMBER, MIN_NUMBER, NUMBERS_PER_TICKET};
use crate::error::ErrorCode;

/// Source of the pseudorandom words driving the shuffle.
pub trait EntropySource {
    /// Mixes the caller seed with this source's environment data for step `counter`.
    fn mix(&self, seed: &[u8; 32], counter: u64) -> u64;
}

/// Entropy taken from the ledger at execution time: the revealed randomness
/// value of the bound randomness account plus the current slot and timestamp.
pub struct LedgerEntropy {
    pub randomness: [u8; 32],
    pub slot: u64,
    pub unix_timestamp: i64,
}

impl LedgerEntropy {
    pub fn new(clock: &Clock, randomness: [u8; 32]) -> Self {
        Self {
            randomness,
            slot: clock.slot,
            unix_timestamp: clock.unix_timestamp,
        }
    }
}

impl EntropySource for LedgerEntropy {
    fn mix(&self, seed: &[u8; 32], counter: u64) -> u64 {
        let digest = hashv(&[
            seed.as_ref(),
            self.randomness.as_ref(),
            &self.slot.to_le_bytes(),
            &self.unix_timestamp.to_le_bytes(),
            &counter.to_le_bytes(),
        ])
        .to_bytes();

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(word)
    }
}

/// `[lower, upper]` in ascending order.
pub fn ordered_range(lower: u8, upper: u8) -> Result<Vec<u8>> {
    require!(lower <= upper, ErrorCode::Range);
    Ok((lower..=upper).collect())
}

/// Draws `count` distinct values from `[lower, upper]` with a partial
/// Fisher-Yates shuffle. The result keeps shuffle order.
pub fn pick_unique<E: EntropySource + ?Sized>(
    entropy: &E,
    seed: &[u8; 32],
    lower: u8,
    upper: u8,
    count: usize,
) -> Result<Vec<u8>> {
    let mut values = ordered_range(lower, upper)?;
    let len = values.len();
    require!(count > 0 && count <= len, ErrorCode::Range);

    for i in 0..count {
        // j is taken from [i, len - 1)
        let span = (len - 1).saturating_sub(i) as u64;
        let j = if span == 0 {
            i
        } else {
            i + (entropy.mix(seed, i as u64) % span) as usize
        };
        values.swap(i, j);
    }

    values.truncate(count);
    Ok(values)
}

/// Shuffled `[1, max_number]`, used for bingo cards.
pub fn full_permutation<E: EntropySource + ?Sized>(
    entropy: &E,
    seed: &[u8; 32],
    max_number: u8,
) -> Result<Vec<u8>> {
    require!(
        max_number > 0 && max_number <= MAX_BINGO_NUMBER,
        ErrorCode::WrongMaxNumber
    );
    pick_unique(entropy, seed, 1, max_number, max_number as usize)
}

/// Six distinct numbers in `[1, 49]`.
pub fn lotto_numbers<E: EntropySource + ?Sized>(
    entropy: &E,
    seed: &[u8; 32],
) -> Result<[u8; NUMBERS_PER_TICKET]> {
    let drawn = pick_unique(entropy, seed, MIN_NUMBER, MAX_NUMBER, NUMBERS_PER_TICKET)?;
    let mut numbers = [0u8; NUMBERS_PER_TICKET];
    numbers.copy_from_slice(&drawn);
    Ok(numbers)
}

/// Replays a fixed list of words, cycling when exhausted.
#[cfg(test)]
pub struct FixedEntropy(pub Vec<u64>);

#[cfg(test)]
impl EntropySource for FixedEntropy {
    fn mix(&self, _seed: &[u8; 32], counter: u64) -> u64 {
        if self.0.is_empty() {
            return 0;
        }
        self.0[counter as usize % self.0.len()]
    }
}

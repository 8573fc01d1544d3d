use anchor_lang::prelude::*;

use crate::constants::NUMBERS_PER_TICKET;
use crate::random::{full_permutation, lotto_numbers, ordered_range, LedgerEntropy};

/// The generator views read nothing but the clock.
#[derive(Accounts)]
pub struct DataFeeds {}

fn clock_entropy() -> Result<LedgerEntropy> {
    let clock = Clock::get()?;
    Ok(LedgerEntropy::new(&clock, [0u8; 32]))
}

pub fn process_random_lotto_numbers(
    _ctx: Context<DataFeeds>,
    seed: [u8; 32],
) -> Result<[u8; NUMBERS_PER_TICKET]> {
    lotto_numbers(&clock_entropy()?, &seed)
}

/// Shuffled `[1, max_number]` for a bingo card. `max_number` is at most 96.
pub fn process_random_bingo_numbers(
    _ctx: Context<DataFeeds>,
    seed: [u8; 32],
    max_number: u8,
) -> Result<Vec<u8>> {
    full_permutation(&clock_entropy()?, &seed, max_number)
}

pub fn process_ordered_range(_ctx: Context<DataFeeds>, lower: u8, upper: u8) -> Result<Vec<u8>> {
    ordered_range(lower, upper)
}

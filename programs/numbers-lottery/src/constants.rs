use anchor_lang::prelude::*;

#[constant]
pub const CONFIG_SEED: &[u8] = b"lottery_config";

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

#[constant]
pub const TICKET_CREDIT_SEED: &[u8] = b"ticket_credit";

#[constant]
pub const LOTTERY_SEED: &[u8] = b"lottery";

#[constant]
pub const TICKET_BOOK_SEED: &[u8] = b"ticket_book";

/// Basis point denominator used by every percentage below.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Upper bound for the protocol fee retained on ticket sales.
pub const MAX_LOTTERY_FEE: u16 = 2_500;

/// Share of the jackpot allocated to a draw, by lottery kind.
pub const WEEKLY_SHARE_BPS: u64 = 350;
pub const MONTHLY_SHARE_BPS: u64 = 1_000;
pub const QUARTERLY_SHARE_BPS: u64 = 2_500;
pub const YEARLY_SHARE_BPS: u64 = 10_000;

/// Maximum share of a draw's pool per tier, indexed by `WinTier as usize`.
/// Tickets without a match never receive a prize.
pub const TIER_SHARE_BPS: [u64; TIER_COUNT] = [0, 500, 1_000, 2_000, 6_500];

pub const TIER_COUNT: usize = 5;

pub const NUMBERS_PER_TICKET: usize = 6;
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 49;

pub const MAX_BINGO_NUMBER: u8 = 96;

pub const MAX_ADMINS: usize = 8;

/// Return data is capped at 1 KiB, so queries are paged.
pub const MAX_LOTTERY_PAGE: u64 = 8;
pub const MAX_TICKET_PAGE: u64 = 16;

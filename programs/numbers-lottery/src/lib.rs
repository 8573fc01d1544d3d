use anchor_lang::prelude::*;
use instructions::*;

/// Program-wide constants such as PDA seeds, share tables,
/// number ranges and query page limits.
pub mod constants;

/// Custom error types returned via the Anchor framework when instructions fail.
pub mod error;

/// Events emitted on every ticket, lottery and configuration change.
pub mod events;

/// All instruction handlers for the program, such as buying and registering
/// tickets, drawing, calculating and claiming.
pub mod instructions;

/// Seeded unique-number generator shared by the draw and the bingo views.
pub mod random;

/// Role checks for admin-only instructions.
pub mod roles;

/// On-chain state structures for the program,
/// including the `LotteryConfig`, `Lottery` and `TicketBook` accounts.
pub mod state;

#[cfg(test)]
mod tests;

use constants::{NUMBERS_PER_TICKET, TIER_COUNT};
use roles::Role;
use state::{LotteryKind, LotteryView, TicketView};

declare_id!("DJyTadxhfMwLa9rPkuFApLzeAgAR4x8ttNpkm4QmL1HY");

#[program]
pub mod numbers_lottery {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        ticket_price: u64,
        lottery_fee: u16,
        data_feeds: Pubkey,
    ) -> Result<()> {
        process_initialize_config(ctx, ticket_price, lottery_fee, data_feeds)
    }

    pub fn grant_role(ctx: Context<UpdateConfig>, role: Role, account: Pubkey) -> Result<()> {
        process_grant_role(ctx, role, account)
    }

    pub fn revoke_role(ctx: Context<UpdateConfig>, role: Role, account: Pubkey) -> Result<()> {
        process_revoke_role(ctx, role, account)
    }

    pub fn set_ticket_price(ctx: Context<UpdateConfig>, ticket_price: u64) -> Result<()> {
        process_set_ticket_price(ctx, ticket_price)
    }

    pub fn set_fee(ctx: Context<UpdateConfig>, lottery_fee: u16) -> Result<()> {
        process_set_fee(ctx, lottery_fee)
    }

    pub fn set_data_feeds(ctx: Context<UpdateConfig>, data_feeds: Pubkey) -> Result<()> {
        process_set_data_feeds(ctx, data_feeds)
    }

    pub fn withdraw_fee(ctx: Context<WithdrawFee>) -> Result<()> {
        process_withdraw_fee(ctx)
    }

    pub fn buy_tickets(ctx: Context<BuyTickets>, count: u64) -> Result<()> {
        process_buy_tickets(ctx, count)
    }

    pub fn register_tickets(
        ctx: Context<RegisterTickets>,
        lottery_id: u64,
        numbers: Vec<[u8; NUMBERS_PER_TICKET]>,
    ) -> Result<()> {
        process_register_tickets(ctx, lottery_id, numbers)
    }

    pub fn init_lottery(ctx: Context<InitLottery>, kind: LotteryKind, draw_time: i64) -> Result<()> {
        process_init_lottery(ctx, kind, draw_time)
    }

    pub fn draw_lottery(ctx: Context<DrawLottery>, lottery_id: u64, seed: [u8; 32]) -> Result<()> {
        process_draw_lottery(ctx, lottery_id, seed)
    }

    pub fn calculate_lottery(
        ctx: Context<CalculateLottery>,
        lottery_id: u64,
        jackpot: u64,
        lottery_pool: u64,
        tier_counts: [u64; TIER_COUNT],
        tier_prizes: [u64; TIER_COUNT],
    ) -> Result<()> {
        process_calculate_lottery(ctx, lottery_id, jackpot, lottery_pool, tier_counts, tier_prizes)
    }

    pub fn claim_tickets(ctx: Context<ClaimTickets>, lottery_id: u64, indices: Vec<u64>) -> Result<()> {
        process_claim_tickets(ctx, lottery_id, indices)
    }

    pub fn get_lottery(ctx: Context<GetLottery>, from: u64, to: u64) -> Result<Vec<LotteryView>> {
        process_get_lottery(ctx, from, to)
    }

    pub fn get_ticket(
        ctx: Context<GetTicket>,
        lottery_id: u64,
        from: u64,
        to: u64,
    ) -> Result<Vec<TicketView>> {
        process_get_ticket(ctx, lottery_id, from, to)
    }

    pub fn random_lotto_numbers(
        ctx: Context<DataFeeds>,
        seed: [u8; 32],
    ) -> Result<[u8; NUMBERS_PER_TICKET]> {
        process_random_lotto_numbers(ctx, seed)
    }

    pub fn random_bingo_numbers(
        ctx: Context<DataFeeds>,
        seed: [u8; 32],
        max_number: u8,
    ) -> Result<Vec<u8>> {
        process_random_bingo_numbers(ctx, seed, max_number)
    }

    pub fn ordered_range(ctx: Context<DataFeeds>, lower: u8, upper: u8) -> Result<Vec<u8>> {
        process_ordered_range(ctx, lower, upper)
    }
}

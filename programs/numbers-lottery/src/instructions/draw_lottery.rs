use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::LotteryDrawn;
use crate::random::{lotto_numbers, EntropySource, LedgerEntropy};
use crate::roles::{require_role, Role};
use crate::state::{
    load_account, store_account, Lottery, LotteryConfig, LotteryStatus, TicketBook, WinTier,
};

/// Accounts required to draw a lottery.
///
/// This ensures that:
/// 1. Only a lottery admin can draw.
/// 2. The randomness account is the one bound in the configuration.
/// 3. The registration window is closed.
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct DrawLottery<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = lottery_config.bump,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,

    /// CHECK: Address checked by seeds; contents read with `load_account`.
    #[account(
        mut,
        seeds = [LOTTERY_SEED, &lottery_id.to_le_bytes()],
        bump,
    )]
    pub lottery: UncheckedAccount<'info>,

    /// CHECK: Address checked by seeds; contents read with `load_account`.
    #[account(
        mut,
        seeds = [TICKET_BOOK_SEED, &lottery_id.to_le_bytes()],
        bump,
    )]
    pub ticket_book: UncheckedAccount<'info>,

    /// The randomness oracle account providing the revealed value.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Number of ticket numbers that appear among the winning numbers.
/// Compares every pair; both sides hold distinct values.
pub fn count_matches(
    winning: &[u8; NUMBERS_PER_TICKET],
    ticket: &[u8; NUMBERS_PER_TICKET],
) -> u8 {
    let mut matches = 0u8;
    for w in winning {
        for t in ticket {
            if w == t {
                matches += 1;
            }
        }
    }
    matches
}

/// Stores `winning`, sets every ticket's tier and the lottery's tier counts,
/// then moves the lottery to `Drawn`.
pub fn classify_tickets(
    lottery: &mut Lottery,
    book: &mut TicketBook,
    winning: [u8; NUMBERS_PER_TICKET],
) -> Result<()> {
    require!(lottery.status == LotteryStatus::Init, ErrorCode::NotInit);

    let mut counts = [0u64; TIER_COUNT];
    for ticket in book.tickets.iter_mut() {
        let tier = WinTier::from_matches(count_matches(&winning, &ticket.numbers));
        ticket.tier = tier;
        counts[tier.index()] += 1;
    }

    lottery.winning_numbers = winning;
    for (result, count) in lottery.results.iter_mut().zip(counts) {
        result.count = count;
    }
    lottery.status = LotteryStatus::Drawn;

    Ok(())
}

/// Picks the winning numbers and classifies every registered ticket.
pub fn draw_with<E: EntropySource + ?Sized>(
    config: &LotteryConfig,
    admin: &Pubkey,
    lottery: &mut Lottery,
    book: &mut TicketBook,
    entropy: &E,
    seed: &[u8; 32],
    now: i64,
) -> Result<[u8; NUMBERS_PER_TICKET]> {
    require_role(config, admin, Role::LotteryAdmin)?;
    require!(lottery.status == LotteryStatus::Init, ErrorCode::NotInit);
    if now < lottery.draw_time {
        msg!("Current time: {}", now);
        msg!("Draw time: {}", lottery.draw_time);
        return err!(ErrorCode::NotOver);
    }

    let winning = lotto_numbers(entropy, seed)?;
    classify_tickets(lottery, book, winning)?;
    Ok(winning)
}

/// Draws lottery `lottery_id`.
///
/// # Arguments
/// * `ctx` - Context holding the DrawLottery accounts
/// * `lottery_id` - Lottery to draw
/// * `seed` - Caller seed mixed with the revealed randomness and the clock
pub fn process_draw_lottery(ctx: Context<DrawLottery>, lottery_id: u64, seed: [u8; 32]) -> Result<()> {
    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();
    let config = &ctx.accounts.lottery_config;
    let lottery_info = ctx.accounts.lottery.to_account_info();
    let book_info = ctx.accounts.ticket_book.to_account_info();

    let mut lottery: Lottery = load_account(&lottery_info, ctx.program_id)?.unwrap_or_default();
    let mut book: TicketBook = load_account(&book_info, ctx.program_id)?.unwrap_or_default();

    require_keys_eq!(
        ctx.accounts.randomness_account_data.key(),
        config.data_feeds,
        ErrorCode::IncorrectRandomnessAccount
    );

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| ErrorCode::IncorrectRandomnessAccount)?;
    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| ErrorCode::RandomnessNotResolved)?;

    let entropy = LedgerEntropy::new(&clock, revealed_random_value);
    let winning = draw_with(
        config,
        &admin,
        &mut lottery,
        &mut book,
        &entropy,
        &seed,
        clock.unix_timestamp,
    )?;

    store_account(&lottery_info, &lottery)?;
    store_account(&book_info, &book)?;

    msg!("Lottery {} drawn: {:?}", lottery_id, winning);

    emit!(LotteryDrawn {
        lottery_id,
        winning_numbers: winning,
        tier_counts: lottery.tier_counts(),
    });

    Ok(())
}

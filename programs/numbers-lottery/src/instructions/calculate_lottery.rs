use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::LotteryCalculated;
use crate::roles::{require_role, Role};
use crate::state::{bps_of, load_account, store_account, Lottery, LotteryConfig, LotteryStatus};

/// Accounts required to commit the prize split of a drawn lottery.
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct CalculateLottery<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
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
}

/// Checks a submitted prize split against the drawn tallies and the pool caps,
/// then moves `lottery_pool` from the jackpot into unpaid winnings.
pub fn reconcile_pool(
    config: &mut LotteryConfig,
    admin: &Pubkey,
    lottery: &mut Lottery,
    jackpot: u64,
    lottery_pool: u64,
    tier_counts: &[u64; TIER_COUNT],
    tier_prizes: &[u64; TIER_COUNT],
) -> Result<()> {
    require_role(&*config, admin, Role::LotteryAdmin)?;
    require!(lottery.status == LotteryStatus::Drawn, ErrorCode::NotDrawn);
    require!(jackpot == config.total_jackpot, ErrorCode::WrongPoolValue);
    require!(
        *tier_counts == lottery.tier_counts(),
        ErrorCode::WrongTicketCount
    );

    let pre_lottery_pool = bps_of(jackpot, lottery.kind.share_bps())?;
    require!(lottery_pool <= pre_lottery_pool, ErrorCode::PoolTooLarge);

    let mut total = 0u64;
    for tier in 0..TIER_COUNT {
        let tier_pool = tier_prizes[tier]
            .checked_mul(tier_counts[tier])
            .ok_or(ErrorCode::PoolTooLarge)?;
        require!(
            tier_pool <= bps_of(pre_lottery_pool, TIER_SHARE_BPS[tier])?,
            ErrorCode::PoolTooLarge
        );
        total = total.checked_add(tier_pool).ok_or(ErrorCode::MathOverflow)?;
    }
    require!(total == lottery_pool, ErrorCode::WrongPoolValue);

    config.total_jackpot = config
        .total_jackpot
        .checked_sub(lottery_pool)
        .ok_or(ErrorCode::MathOverflow)?;
    config.unpaid_winnings = config
        .unpaid_winnings
        .checked_add(lottery_pool)
        .ok_or(ErrorCode::MathOverflow)?;

    for (result, prize) in lottery.results.iter_mut().zip(tier_prizes) {
        result.prize = *prize;
    }
    lottery.jackpot = jackpot;
    lottery.status = LotteryStatus::Calculated;

    Ok(())
}

/// Commits the prize table of lottery `lottery_id`.
///
/// # Arguments
/// * `ctx` - Context holding the CalculateLottery accounts
/// * `lottery_id` - Drawn lottery to settle
/// * `jackpot` - Jackpot value the split was computed from; must be current
/// * `lottery_pool` - Total paid out by this lottery
/// * `tier_counts` - Winners per tier; must equal the drawn tallies
/// * `tier_prizes` - Prize per ticket, per tier
pub fn process_calculate_lottery(
    ctx: Context<CalculateLottery>,
    lottery_id: u64,
    jackpot: u64,
    lottery_pool: u64,
    tier_counts: [u64; TIER_COUNT],
    tier_prizes: [u64; TIER_COUNT],
) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let lottery_info = ctx.accounts.lottery.to_account_info();
    let mut lottery: Lottery = load_account(&lottery_info, ctx.program_id)?.unwrap_or_default();

    reconcile_pool(
        &mut ctx.accounts.lottery_config,
        &admin,
        &mut lottery,
        jackpot,
        lottery_pool,
        &tier_counts,
        &tier_prizes,
    )?;
    store_account(&lottery_info, &lottery)?;

    msg!(
        "Lottery {} calculated: pool {} of jackpot {}",
        lottery_id,
        lottery_pool,
        jackpot
    );

    emit!(LotteryCalculated {
        lottery_id,
        jackpot,
        lottery_pool,
        tier_counts,
        tier_prizes,
    });

    Ok(())
}

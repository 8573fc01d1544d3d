use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::LotteryInitialized;
use crate::roles::{require_role, Role};
use crate::state::{Lottery, LotteryConfig, LotteryKind, LotteryStatus, TicketBook};

/// Accounts required to open a new lottery under the next sequential id.
#[derive(Accounts)]
pub struct InitLottery<'info> {
    /// Lottery admin; pays for the new accounts.
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = lottery_config.bump,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,

    #[account(
        init,
        payer = admin,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED, &lottery_config.lottery_count.to_le_bytes()],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// Empty ticket list; grows as tickets get registered.
    #[account(
        init,
        payer = admin,
        space = TicketBook::space(0),
        seeds = [TICKET_BOOK_SEED, &lottery_config.lottery_count.to_le_bytes()],
        bump
    )]
    pub ticket_book: Account<'info, TicketBook>,

    pub system_program: Program<'info, System>,
}

/// Builds lottery `lottery_count` in `Init` state and advances the counter.
pub fn open_lottery(
    config: &mut LotteryConfig,
    admin: &Pubkey,
    kind: LotteryKind,
    draw_time: i64,
) -> Result<Lottery> {
    require_role(&*config, admin, Role::LotteryAdmin)?;

    let lottery_id = config.lottery_count;
    config.lottery_count = lottery_id
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(Lottery {
        id: lottery_id,
        status: LotteryStatus::Init,
        kind,
        draw_time,
        ..Default::default()
    })
}

/// Creates lottery `lottery_count` in `Init` state.
///
/// # Arguments
/// * `ctx` - Context holding the InitLottery accounts
/// * `kind` - Periodicity class, fixing the jackpot share of this draw
/// * `draw_time` - Unix timestamp closing registration and opening the draw
pub fn process_init_lottery(ctx: Context<InitLottery>, kind: LotteryKind, draw_time: i64) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let lottery = open_lottery(&mut ctx.accounts.lottery_config, &admin, kind, draw_time)?;
    let lottery_id = lottery.id;

    ctx.accounts.lottery.set_inner(Lottery {
        bump: ctx.bumps.lottery,
        ..lottery
    });

    ctx.accounts.ticket_book.set_inner(TicketBook {
        bump: ctx.bumps.ticket_book,
        lottery_id,
        tickets: Vec::new(),
    });

    msg!("Lottery {} initialized, draw at {}", lottery_id, draw_time);

    emit!(LotteryInitialized {
        lottery_id,
        kind,
        draw_time,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn test_open_lottery_assigns_sequential_ids() {
        let admin = Pubkey::new_unique();
        let mut config = LotteryConfig::with_admin(admin);

        let first = open_lottery(&mut config, &admin, LotteryKind::Weekly, 100).unwrap();
        let second = open_lottery(&mut config, &admin, LotteryKind::Yearly, 200).unwrap();

        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(second.status, LotteryStatus::Init);
        assert_eq!(second.kind, LotteryKind::Yearly);
        assert_eq!(second.draw_time, 200);
        assert_eq!(second.ticket_count, 0);
        assert_eq!(config.lottery_count, 2);
    }

    #[test]
    fn test_open_lottery_needs_admin() {
        let mut config = LotteryConfig::with_admin(Pubkey::new_unique());

        assert_eq!(
            open_lottery(&mut config, &Pubkey::new_unique(), LotteryKind::Weekly, 100).unwrap_err(),
            Error::from(ErrorCode::Unauthorized)
        );
        assert_eq!(config.lottery_count, 0);
    }
}

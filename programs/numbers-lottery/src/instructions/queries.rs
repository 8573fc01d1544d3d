use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::state::{load_account, Lottery, LotteryConfig, LotteryView, TicketBook, TicketView};

/// Accounts for reading a range of lotteries.
/// The `Lottery` accounts of existing ids in the range are passed as
/// remaining accounts, in any order.
#[derive(Accounts)]
pub struct GetLottery<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = lottery_config.bump,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,
}

/// Accounts for reading a range of tickets of one lottery.
/// A lottery that was never created reads as zeroed tickets.
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct GetTicket<'info> {
    /// CHECK: Address checked by seeds; contents read with `load_account`.
    #[account(
        seeds = [LOTTERY_SEED, &lottery_id.to_le_bytes()],
        bump,
    )]
    pub lottery: UncheckedAccount<'info>,

    /// CHECK: Address checked by seeds; contents read with `load_account`.
    #[account(
        seeds = [TICKET_BOOK_SEED, &lottery_id.to_le_bytes()],
        bump,
    )]
    pub ticket_book: UncheckedAccount<'info>,
}

fn check_page(from: u64, to: u64, max_page: u64) -> Result<()> {
    require!(from <= to, ErrorCode::IndexRange);
    require!(to - from < max_page, ErrorCode::QueryTooLarge);
    Ok(())
}

/// Views of lotteries `from..=to`. Ids not created yet yield a zeroed
/// `NotExist` record; existing ones are read through `load`.
pub fn collect_lottery_views<F>(
    from: u64,
    to: u64,
    lottery_count: u64,
    mut load: F,
) -> Result<Vec<LotteryView>>
where
    F: FnMut(u64) -> Result<Lottery>,
{
    check_page(from, to, MAX_LOTTERY_PAGE)?;

    (from..=to)
        .map(|id| {
            if id < lottery_count {
                load(id).map(|lottery| lottery.view())
            } else {
                Ok(LotteryView::default())
            }
        })
        .collect()
}

/// Views of tickets `from..=to`. Indices past the last ticket yield a zeroed,
/// inactive ticket.
pub fn collect_ticket_views(
    lottery: &Lottery,
    book: &TicketBook,
    from: u64,
    to: u64,
) -> Result<Vec<TicketView>> {
    check_page(from, to, MAX_TICKET_PAGE)?;

    Ok((from..=to)
        .map(|index| {
            let ticket = usize::try_from(index)
                .ok()
                .and_then(|i| book.tickets.get(i))
                .copied()
                .unwrap_or_default();
            TicketView {
                ticket,
                prize: lottery.prize_for(ticket.tier),
            }
        })
        .collect())
}

/// Finds and decodes the `Lottery` account of `id` among `accounts`.
fn load_lottery(accounts: &[AccountInfo], program_id: &Pubkey, id: u64) -> Result<Lottery> {
    let (address, _) = Pubkey::find_program_address(&[LOTTERY_SEED, &id.to_le_bytes()], program_id);
    let account = accounts
        .iter()
        .find(|account| account.key() == address)
        .ok_or(ErrorCode::LotteryAccountMissing)?;
    require_keys_eq!(*account.owner, *program_id, ErrorCode::LotteryAccountMissing);

    let lottery = load_account(account, program_id)?.ok_or(ErrorCode::LotteryAccountMissing)?;
    Ok(lottery)
}

pub fn process_get_lottery(ctx: Context<GetLottery>, from: u64, to: u64) -> Result<Vec<LotteryView>> {
    let program_id = ctx.program_id;
    let accounts = ctx.remaining_accounts;

    collect_lottery_views(from, to, ctx.accounts.lottery_config.lottery_count, |id| {
        load_lottery(accounts, program_id, id)
    })
}

pub fn process_get_ticket(
    ctx: Context<GetTicket>,
    _lottery_id: u64,
    from: u64,
    to: u64,
) -> Result<Vec<TicketView>> {
    let lottery: Lottery = load_account(&ctx.accounts.lottery.to_account_info(), ctx.program_id)?
        .unwrap_or_default();
    let book: TicketBook = load_account(&ctx.accounts.ticket_book.to_account_info(), ctx.program_id)?
        .unwrap_or_default();

    collect_ticket_views(&lottery, &book, from, to)
}

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::TicketRegistered;
use crate::state::{
    load_account, store_account, Lottery, LotteryStatus, Ticket, TicketBook, TicketCredit, WinTier,
};

/// Accounts required to register bought tickets to a lottery.
/// The lottery and its ticket book are read by hand so that an id that was
/// never created reports `NotInit`.
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct RegisterTickets<'info> {
    /// Ticket owner; pays for the extra ticket book space.
    #[account(mut)]
    pub owner: Signer<'info>,

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

    #[account(
        mut,
        seeds = [TICKET_CREDIT_SEED, owner.key().as_ref()],
        bump = ticket_credit.bump,
    )]
    pub ticket_credit: Account<'info, TicketCredit>,

    pub system_program: Program<'info, System>,
}

/// Checks that a ticket holds six distinct numbers in `[1, 49]`.
/// Range is checked for all numbers before duplicates.
pub fn validate_numbers(numbers: &[u8; NUMBERS_PER_TICKET]) -> Result<()> {
    require!(
        numbers
            .iter()
            .all(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n)),
        ErrorCode::WrongNumber
    );

    for (i, a) in numbers.iter().enumerate() {
        for b in &numbers[i + 1..] {
            require!(a != b, ErrorCode::DuplicateNumber);
        }
    }

    Ok(())
}

/// Appends one ticket per entry of `numbers`, spending the owner's credit.
/// Nothing is written unless every entry is valid.
///
/// Returns the index of the first new ticket.
pub fn register_numbers(
    lottery: &mut Lottery,
    book: &mut TicketBook,
    credit: &mut TicketCredit,
    owner: Pubkey,
    numbers: &[[u8; NUMBERS_PER_TICKET]],
    now: i64,
) -> Result<u64> {
    require!(lottery.status == LotteryStatus::Init, ErrorCode::NotInit);
    require!(now < lottery.draw_time, ErrorCode::TimeOver);
    require!(!numbers.is_empty(), ErrorCode::ZeroCount);

    let count = numbers.len() as u64;
    require!(count <= credit.amount, ErrorCode::InsufficientCredit);

    for entry in numbers {
        validate_numbers(entry)?;
    }

    let first_index = lottery.ticket_count;
    book.tickets.extend(numbers.iter().map(|entry| Ticket {
        active: true,
        paid: false,
        numbers: *entry,
        owner,
        tier: WinTier::None,
    }));

    credit.amount -= count;
    lottery.ticket_count = first_index
        .checked_add(count)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(first_index)
}

/// Registers one ticket per entry of `numbers` to lottery `lottery_id`.
///
/// # Arguments
/// * `ctx` - Context holding the RegisterTickets accounts
/// * `lottery_id` - Lottery the tickets take part in
/// * `numbers` - Six numbers per ticket, each in `[1, 49]` and distinct
pub fn process_register_tickets(
    ctx: Context<RegisterTickets>,
    lottery_id: u64,
    numbers: Vec<[u8; NUMBERS_PER_TICKET]>,
) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();
    let lottery_info = ctx.accounts.lottery.to_account_info();
    let book_info = ctx.accounts.ticket_book.to_account_info();

    let mut lottery: Lottery = load_account(&lottery_info, ctx.program_id)?.unwrap_or_default();
    let mut book: TicketBook = load_account(&book_info, ctx.program_id)?.unwrap_or_default();

    let first_index = register_numbers(
        &mut lottery,
        &mut book,
        &mut ctx.accounts.ticket_credit,
        owner,
        &numbers,
        clock.unix_timestamp,
    )?;

    grow_ticket_book(
        &book_info,
        &ctx.accounts.owner,
        &ctx.accounts.system_program,
        TicketBook::space(book.tickets.len()),
    )?;
    store_account(&lottery_info, &lottery)?;
    store_account(&book_info, &book)?;

    msg!(
        "Registered {} tickets to lottery {}",
        numbers.len(),
        lottery_id
    );

    for (offset, entry) in numbers.iter().enumerate() {
        emit!(TicketRegistered {
            lottery_id,
            index: first_index + offset as u64,
            owner,
            numbers: *entry,
        });
    }

    Ok(())
}

/// Resizes the ticket book to `new_len`, topping up rent from `payer`.
fn grow_ticket_book<'info>(
    book: &AccountInfo<'info>,
    payer: &Signer<'info>,
    system: &Program<'info, System>,
    new_len: usize,
) -> Result<()> {
    if new_len <= book.data_len() {
        return Ok(());
    }

    let top_up = Rent::get()?
        .minimum_balance(new_len)
        .saturating_sub(book.lamports());
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system.to_account_info(),
                system_program::Transfer {
                    from: payer.to_account_info(),
                    to: book.clone(),
                },
            ),
            top_up,
        )?;
    }

    book.realloc(new_len, false)?;
    Ok(())
}

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::TicketClaimed;
use crate::state::{
    load_account, store_account, Lottery, LotteryConfig, LotteryStatus, TicketBook,
};

use super::vault::pay_from_vault;

/// Accounts required to claim prizes of winning tickets.
/// Handles:
/// - Ownership and tier checks per ticket
/// - Marking tickets as paid
/// - Paying the total out of the vault
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct ClaimTickets<'info> {
    /// Owner of the tickets being claimed.
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = lottery_config.bump,
        has_one = mint @ ErrorCode::WrongMint,
        has_one = vault,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,

    /// CHECK: Address checked by seeds; contents read with `load_account`.
    #[account(
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

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Receives the prizes.
    #[account(
        mut,
        token::mint = mint,
        token::authority = claimant,
        token::token_program = token_program,
    )]
    pub claimant_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// A ticket paid by a claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaidTicket {
    pub index: u64,
    pub prize: u64,
}

/// Marks every ticket in `indices` as paid and releases the prizes from
/// unpaid winnings. Every ticket is checked before the first one is marked.
///
/// Returns the paid tickets and their total.
pub fn settle_claims(
    config: &mut LotteryConfig,
    lottery: &Lottery,
    book: &mut TicketBook,
    claimant: &Pubkey,
    indices: &[u64],
) -> Result<(Vec<PaidTicket>, u64)> {
    require!(
        lottery.status == LotteryStatus::Calculated,
        ErrorCode::NotCalculated
    );
    require!(!indices.is_empty(), ErrorCode::ZeroCount);

    let mut paid = Vec::with_capacity(indices.len());
    let mut total_prize = 0u64;

    for (position, &index) in indices.iter().enumerate() {
        let ticket = usize::try_from(index)
            .ok()
            .and_then(|i| book.tickets.get(i))
            .filter(|ticket| ticket.active)
            .ok_or(ErrorCode::NotActive)?;

        require_keys_eq!(ticket.owner, *claimant, ErrorCode::WrongOwner);
        require!(ticket.tier.is_winning(), ErrorCode::NotWinning);
        require!(
            !ticket.paid && !indices[..position].contains(&index),
            ErrorCode::AlreadyPaid
        );

        let prize = lottery.prize_for(ticket.tier);
        total_prize = total_prize
            .checked_add(prize)
            .ok_or(ErrorCode::MathOverflow)?;
        paid.push(PaidTicket { index, prize });
    }

    config.unpaid_winnings = config
        .unpaid_winnings
        .checked_sub(total_prize)
        .ok_or(ErrorCode::MathOverflow)?;
    for entry in &paid {
        book.tickets[entry.index as usize].paid = true;
    }

    Ok((paid, total_prize))
}

/// Pays the caller the prizes of `indices` in lottery `lottery_id`.
///
/// # Arguments
/// * `ctx` - Context holding the ClaimTickets accounts
/// * `lottery_id` - Calculated lottery the tickets belong to
/// * `indices` - Ticket indices, each owned by the caller and winning
pub fn process_claim_tickets(
    ctx: Context<ClaimTickets>,
    lottery_id: u64,
    indices: Vec<u64>,
) -> Result<()> {
    let claimant = ctx.accounts.claimant.key();
    let book_info = ctx.accounts.ticket_book.to_account_info();

    let lottery: Lottery =
        load_account(&ctx.accounts.lottery.to_account_info(), ctx.program_id)?.unwrap_or_default();
    let mut book: TicketBook = load_account(&book_info, ctx.program_id)?.unwrap_or_default();

    let (paid, total_prize) = settle_claims(
        &mut ctx.accounts.lottery_config,
        &lottery,
        &mut book,
        &claimant,
        &indices,
    )?;
    store_account(&book_info, &book)?;

    if total_prize > 0 {
        pay_from_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.vault,
            &ctx.accounts.mint,
            &ctx.accounts.claimant_token_account,
            ctx.accounts.lottery_config.to_account_info(),
            ctx.accounts.lottery_config.bump,
            total_prize,
        )?;
    }

    msg!(
        "Claimed {} tickets of lottery {}: {}",
        paid.len(),
        lottery_id,
        total_prize
    );

    for ticket in paid {
        emit!(TicketClaimed {
            lottery_id,
            index: ticket.index,
            owner: claimant,
            prize: ticket.prize,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Ticket, WinTier};
    use anchor_lang::error::Error;

    struct Fixture {
        config: LotteryConfig,
        lottery: Lottery,
        book: TicketBook,
        alice: Pubkey,
        bob: Pubkey,
    }

    fn fixture() -> Fixture {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        let ticket = |owner: Pubkey, tier: WinTier| Ticket {
            active: true,
            paid: false,
            numbers: [1, 2, 3, 4, 5, 6],
            owner,
            tier,
        };

        let mut lottery = Lottery {
            status: LotteryStatus::Calculated,
            ticket_count: 4,
            ..Default::default()
        };
        lottery.results[WinTier::Three.index()].prize = 10;
        lottery.results[WinTier::Four.index()].prize = 100;

        Fixture {
            config: LotteryConfig {
                bump: 255,
                vault_bump: 254,
                authority: alice,
                admins: vec![],
                mint: Pubkey::new_unique(),
                vault: Pubkey::new_unique(),
                data_feeds: Pubkey::new_unique(),
                ticket_price: 1,
                lottery_fee: 0,
                total_jackpot: 0,
                unpaid_winnings: 120,
                lottery_count: 1,
            },
            lottery,
            book: TicketBook {
                bump: 255,
                lottery_id: 0,
                tickets: vec![
                    ticket(alice, WinTier::Four),
                    ticket(alice, WinTier::None),
                    ticket(bob, WinTier::Three),
                    ticket(alice, WinTier::Three),
                ],
            },
            alice,
            bob,
        }
    }

    #[test]
    fn test_claim_pays_once() {
        let mut f = fixture();

        let (paid, total) =
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.alice, &[0, 3]).unwrap();
        assert_eq!(
            paid,
            vec![
                PaidTicket { index: 0, prize: 100 },
                PaidTicket { index: 3, prize: 10 }
            ]
        );
        assert_eq!(total, 110);
        assert_eq!(f.config.unpaid_winnings, 10);
        assert!(f.book.tickets[0].paid && f.book.tickets[3].paid);

        assert_eq!(
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.alice, &[0]).unwrap_err(),
            Error::from(ErrorCode::AlreadyPaid)
        );
        assert_eq!(f.config.unpaid_winnings, 10);
    }

    #[test]
    fn test_claim_batch_is_all_or_nothing() {
        let mut f = fixture();

        assert_eq!(
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.alice, &[0, 2]).unwrap_err(),
            Error::from(ErrorCode::WrongOwner)
        );
        assert_eq!(
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.alice, &[0, 1]).unwrap_err(),
            Error::from(ErrorCode::NotWinning)
        );
        assert_eq!(
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.alice, &[0, 9]).unwrap_err(),
            Error::from(ErrorCode::NotActive)
        );
        assert_eq!(
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.alice, &[0, 0]).unwrap_err(),
            Error::from(ErrorCode::AlreadyPaid)
        );

        assert!(f.book.tickets.iter().all(|t| !t.paid));
        assert_eq!(f.config.unpaid_winnings, 120);
    }

    #[test]
    fn test_claim_preconditions() {
        let mut f = fixture();

        assert_eq!(
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.bob, &[]).unwrap_err(),
            Error::from(ErrorCode::ZeroCount)
        );

        f.lottery.status = LotteryStatus::Drawn;
        assert_eq!(
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.bob, &[2]).unwrap_err(),
            Error::from(ErrorCode::NotCalculated)
        );

        f.lottery.status = LotteryStatus::Calculated;
        let (_, total) =
            settle_claims(&mut f.config, &f.lottery, &mut f.book, &f.bob, &[2]).unwrap();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_claim_unknown_lottery() {
        let mut f = fixture();
        let missing = Lottery::default();

        assert_eq!(
            settle_claims(&mut f.config, &missing, &mut TicketBook::default(), &f.alice, &[0])
                .unwrap_err(),
            Error::from(ErrorCode::NotCalculated)
        );
    }
}

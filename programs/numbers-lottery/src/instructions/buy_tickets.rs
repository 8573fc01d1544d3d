use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::TicketsBought;
use crate::state::{LotteryConfig, TicketCredit};

use super::vault::deposit_to_vault;

/// Accounts required to buy ticket credit.
/// Handles:
/// - Payment transfer into the vault
/// - Jackpot and fee accounting
/// - The buyer's unregistered ticket balance
#[derive(Accounts)]
pub struct BuyTickets<'info> {
    /// The account paying for the tickets.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Lottery configuration holding price, fee and jackpot.
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = lottery_config.bump,
        has_one = mint @ ErrorCode::WrongMint,
        has_one = vault,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,

    /// Tickets bought but not yet registered; created on first purchase.
    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + TicketCredit::INIT_SPACE,
        seeds = [TICKET_CREDIT_SEED, buyer.key().as_ref()],
        bump
    )]
    pub ticket_credit: Account<'info, TicketCredit>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// Source of the payment.
    #[account(
        mut,
        token::mint = mint,
        token::authority = buyer,
        token::token_program = token_program,
    )]
    pub buyer_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Token program interface
    pub token_program: Interface<'info, TokenInterface>,

    /// System program interface
    pub system_program: Program<'info, System>,
}

/// Buys `count` tickets for the caller.
///
/// Steps performed:
/// 1. Price the purchase and split it between jackpot and fee.
/// 2. Transfer the cost from the buyer to the vault.
/// 3. Credit the buyer with `count` unregistered tickets.
///
/// # Arguments
/// * `ctx` - Context containing BuyTickets accounts
/// * `count` - Number of tickets to buy
pub fn process_buy_tickets(ctx: Context<BuyTickets>, count: u64) -> Result<()> {
    let split = ctx.accounts.lottery_config.record_sale(count)?;

    deposit_to_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.buyer_token_account,
        &ctx.accounts.buyer,
        &ctx.accounts.mint,
        &ctx.accounts.vault,
        split.cost,
    )?;

    let buyer = ctx.accounts.buyer.key();
    let credit = &mut ctx.accounts.ticket_credit;
    credit.bump = ctx.bumps.ticket_credit;
    credit.owner = buyer;
    credit.amount = credit
        .amount
        .checked_add(count)
        .ok_or(ErrorCode::MathOverflow)?;

    msg!("Bought {} tickets for {}", count, split.cost);

    emit!(TicketsBought {
        buyer,
        count,
        cost: split.cost,
        fee: split.fee,
    });

    Ok(())
}

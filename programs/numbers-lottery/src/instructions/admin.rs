use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::*;
use crate::roles::{require_role, Role};
use crate::state::LotteryConfig;

use super::vault::pay_from_vault;

/// Accounts required to initialize the lottery configuration.
/// Creates the config account and the vault holding every token the lottery controls.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// The account paying for account creation; becomes the default admin.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Program-wide settings and money counters.
    #[account(
        init,
        payer = payer,
        space = 8 + LotteryConfig::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub lottery_config: Box<Account<'info, LotteryConfig>>,

    /// Mint tickets are paid with.
    #[account(mint::token_program = token_program)]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault token account, owned by the config PDA.
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED],
        bump,
        token::mint = mint,
        token::authority = lottery_config,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Initializes the lottery configuration with the ticket price, the protocol fee
/// and the randomness account draws are mixed with.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeConfig accounts
/// * `ticket_price` - Price of one ticket in base units of the mint
/// * `lottery_fee` - Share of every sale kept as fee, in basis points
/// * `data_feeds` - Randomness account used by draws
pub fn process_initialize_config(
    ctx: Context<InitializeConfig>,
    ticket_price: u64,
    lottery_fee: u16,
    data_feeds: Pubkey,
) -> Result<()> {
    let payer = ctx.accounts.payer.key();
    let config = &mut ctx.accounts.lottery_config;

    config.bump = ctx.bumps.lottery_config;
    config.vault_bump = ctx.bumps.vault;
    config.authority = payer;
    config.admins = vec![payer];
    config.mint = ctx.accounts.mint.key();
    config.vault = ctx.accounts.vault.key();
    config.total_jackpot = 0;
    config.unpaid_winnings = 0;
    config.lottery_count = 0;
    config.set_ticket_price(ticket_price)?;
    config.set_fee(lottery_fee)?;
    config.set_data_feeds(data_feeds)?;

    msg!(
        "Lottery configured: price {}, fee {} bps",
        ticket_price,
        lottery_fee
    );

    Ok(())
}

/// Accounts shared by every configuration update.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// The account requesting the change; its role is checked by the handler.
    pub admin: Signer<'info>,

    /// The configuration being updated.
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = lottery_config.bump,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,
}

/// Grants `role` to `account`. Granting the default admin hands it over.
/// Returns `false` when `account` already held the lottery admin role.
pub fn add_role(
    config: &mut LotteryConfig,
    sender: &Pubkey,
    role: Role,
    account: Pubkey,
) -> Result<bool> {
    require_role(&*config, sender, Role::DefaultAdmin)?;

    match role {
        Role::LotteryAdmin => config.grant_admin(account),
        Role::DefaultAdmin => {
            config.authority = account;
            Ok(true)
        }
    }
}

pub fn remove_role(
    config: &mut LotteryConfig,
    sender: &Pubkey,
    role: Role,
    account: &Pubkey,
) -> Result<()> {
    require_role(&*config, sender, Role::DefaultAdmin)?;

    // The default admin can only be handed over, never left empty.
    require!(role == Role::LotteryAdmin, ErrorCode::RoleNotFound);
    config.revoke_admin(account)
}

pub fn change_ticket_price(config: &mut LotteryConfig, admin: &Pubkey, ticket_price: u64) -> Result<()> {
    require_role(&*config, admin, Role::LotteryAdmin)?;
    config.set_ticket_price(ticket_price)
}

pub fn change_fee(config: &mut LotteryConfig, admin: &Pubkey, lottery_fee: u16) -> Result<()> {
    require_role(&*config, admin, Role::LotteryAdmin)?;
    config.set_fee(lottery_fee)
}

pub fn change_data_feeds(config: &mut LotteryConfig, admin: &Pubkey, data_feeds: Pubkey) -> Result<()> {
    require_role(&*config, admin, Role::LotteryAdmin)?;
    config.set_data_feeds(data_feeds)
}

/// Fee `admin` may withdraw from a vault holding `vault_balance`.
pub fn fee_for_withdrawal(config: &LotteryConfig, admin: &Pubkey, vault_balance: u64) -> Result<u64> {
    require_role(&*config, admin, Role::LotteryAdmin)?;
    config.take_fee(vault_balance)
}

pub fn process_grant_role(ctx: Context<UpdateConfig>, role: Role, account: Pubkey) -> Result<()> {
    let sender = ctx.accounts.admin.key();

    if add_role(&mut ctx.accounts.lottery_config, &sender, role, account)? {
        emit!(RoleGranted {
            role,
            account,
            sender,
        });
    }

    Ok(())
}

pub fn process_revoke_role(ctx: Context<UpdateConfig>, role: Role, account: Pubkey) -> Result<()> {
    let sender = ctx.accounts.admin.key();
    remove_role(&mut ctx.accounts.lottery_config, &sender, role, &account)?;

    emit!(RoleRevoked {
        role,
        account,
        sender,
    });

    Ok(())
}

pub fn process_set_ticket_price(ctx: Context<UpdateConfig>, ticket_price: u64) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    change_ticket_price(&mut ctx.accounts.lottery_config, &admin, ticket_price)?;

    emit!(TicketPriceUpdated {
        admin,
        ticket_price,
    });

    Ok(())
}

pub fn process_set_fee(ctx: Context<UpdateConfig>, lottery_fee: u16) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    change_fee(&mut ctx.accounts.lottery_config, &admin, lottery_fee)?;

    emit!(FeeUpdated { admin, lottery_fee });

    Ok(())
}

pub fn process_set_data_feeds(ctx: Context<UpdateConfig>, data_feeds: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    change_data_feeds(&mut ctx.accounts.lottery_config, &admin, data_feeds)?;

    emit!(DataFeedsUpdated { admin, data_feeds });

    Ok(())
}

/// Accounts required to withdraw the retained protocol fee.
#[derive(Accounts)]
pub struct WithdrawFee<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = lottery_config.bump,
        has_one = mint @ ErrorCode::WrongMint,
        has_one = vault,
    )]
    pub lottery_config: Account<'info, LotteryConfig>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Receives the fee.
    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program,
    )]
    pub recipient: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Sends everything in the vault that is neither jackpot nor unpaid winnings
/// to `recipient`.
pub fn process_withdraw_fee(ctx: Context<WithdrawFee>) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let config = &ctx.accounts.lottery_config;
    let fee = fee_for_withdrawal(config, &admin, ctx.accounts.vault.amount)?;

    pay_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.mint,
        &ctx.accounts.recipient,
        config.to_account_info(),
        config.bump,
        fee,
    )?;

    msg!("Fee withdrawn: {}", fee);

    emit!(FeeWithdrawn {
        to: ctx.accounts.recipient.key(),
        amount: fee,
    });

    Ok(())
}

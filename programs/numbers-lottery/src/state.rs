use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;

/// Lifecycle of a single lottery. Transitions only move forward.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug, InitSpace)]
pub enum LotteryStatus {
    #[default]
    NotExist,
    Init,
    Drawn,
    Calculated,
}

/// Periodicity class of a draw. Fixes the share of the jackpot it may pay out.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug, InitSpace)]
pub enum LotteryKind {
    #[default]
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl LotteryKind {
    pub fn share_bps(self) -> u64 {
        match self {
            LotteryKind::Weekly => WEEKLY_SHARE_BPS,
            LotteryKind::Monthly => MONTHLY_SHARE_BPS,
            LotteryKind::Quarterly => QUARTERLY_SHARE_BPS,
            LotteryKind::Yearly => YEARLY_SHARE_BPS,
        }
    }
}

/// How many of a ticket's numbers matched the draw.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug, InitSpace)]
pub enum WinTier {
    #[default]
    None,
    Three,
    Four,
    Five,
    Six,
}

impl WinTier {
    pub fn from_matches(matches: u8) -> Self {
        match matches {
            3 => WinTier::Three,
            4 => WinTier::Four,
            5 => WinTier::Five,
            6 => WinTier::Six,
            _ => WinTier::None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_winning(self) -> bool {
        self != WinTier::None
    }
}

/// Program-wide settings and the shared money counters.
#[account]
#[derive(InitSpace)]
pub struct LotteryConfig {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Bump of the vault token account, which is owned by this config PDA.
    pub vault_bump: u8,

    /// Holder of the default admin role; manages the admin list.
    pub authority: Pubkey,

    /// Accounts holding the lottery admin role.
    #[max_len(MAX_ADMINS)]
    pub admins: Vec<Pubkey>,

    /// Mint of the token tickets are paid and prizes are settled in.
    pub mint: Pubkey,

    /// Token account holding the jackpot, unpaid winnings and retained fees.
    pub vault: Pubkey,

    /// Randomness account mixed into every draw.
    pub data_feeds: Pubkey,

    /// Price of a single ticket in base units of `mint`.
    pub ticket_price: u64,

    /// Share of every sale retained as protocol fee, in basis points.
    pub lottery_fee: u16,

    /// Funds available to be allocated to future or ongoing draws.
    pub total_jackpot: u64,

    /// Funds reserved for calculated prizes that have not been claimed yet.
    pub unpaid_winnings: u64,

    /// Number of lotteries created; also the id of the next one.
    pub lottery_count: u64,
}

/// Cost of a ticket purchase split between the jackpot and the protocol fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaleSplit {
    pub cost: u64,
    pub fee: u64,
    pub to_jackpot: u64,
}

impl LotteryConfig {
    pub fn set_ticket_price(&mut self, price: u64) -> Result<()> {
        require!(price > 0, ErrorCode::WrongPrice);
        self.ticket_price = price;
        Ok(())
    }

    pub fn set_fee(&mut self, fee: u16) -> Result<()> {
        require!(fee <= MAX_LOTTERY_FEE, ErrorCode::WrongFee);
        self.lottery_fee = fee;
        Ok(())
    }

    pub fn set_data_feeds(&mut self, data_feeds: Pubkey) -> Result<()> {
        require!(data_feeds != Pubkey::default(), ErrorCode::WrongDataFeeds);
        self.data_feeds = data_feeds;
        Ok(())
    }

    /// Prices `count` tickets and credits the jackpot with everything but the fee.
    pub fn record_sale(&mut self, count: u64) -> Result<SaleSplit> {
        require!(count > 0, ErrorCode::ZeroCount);

        let cost = count
            .checked_mul(self.ticket_price)
            .ok_or(ErrorCode::MathOverflow)?;
        let fee = bps_of(cost, self.lottery_fee as u64)?;
        let to_jackpot = cost.checked_sub(fee).ok_or(ErrorCode::MathOverflow)?;

        self.total_jackpot = self
            .total_jackpot
            .checked_add(to_jackpot)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(SaleSplit {
            cost,
            fee,
            to_jackpot,
        })
    }

    /// Vault balance that belongs to neither the jackpot nor unpaid winnings.
    pub fn withdrawable_fee(&self, vault_balance: u64) -> u64 {
        vault_balance
            .saturating_sub(self.total_jackpot)
            .saturating_sub(self.unpaid_winnings)
    }

    /// Like `withdrawable_fee`, but fails with `NoFee` when nothing can be withdrawn.
    pub fn take_fee(&self, vault_balance: u64) -> Result<u64> {
        let fee = self.withdrawable_fee(vault_balance);
        require!(fee > 0, ErrorCode::NoFee);
        Ok(fee)
    }

    /// Adds a lottery admin. Returns `false` when the account already was one.
    pub fn grant_admin(&mut self, account: Pubkey) -> Result<bool> {
        if self.admins.contains(&account) {
            return Ok(false);
        }
        require!(self.admins.len() < MAX_ADMINS, ErrorCode::AdminListFull);
        self.admins.push(account);
        Ok(true)
    }

    pub fn revoke_admin(&mut self, account: &Pubkey) -> Result<()> {
        let position = self
            .admins
            .iter()
            .position(|admin| admin == account)
            .ok_or(ErrorCode::RoleNotFound)?;
        self.admins.remove(position);
        Ok(())
    }
}

#[cfg(test)]
impl LotteryConfig {
    /// Config where `admin` holds both roles; price 1, no fee.
    pub fn with_admin(admin: Pubkey) -> Self {
        LotteryConfig {
            bump: 255,
            vault_bump: 254,
            authority: admin,
            admins: vec![admin],
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            data_feeds: Pubkey::new_unique(),
            ticket_price: 1,
            lottery_fee: 0,
            total_jackpot: 0,
            unpaid_winnings: 0,
            lottery_count: 0,
        }
    }
}

/// `amount * bps / 10000`, rounded down.
pub fn bps_of(amount: u64, bps: u64) -> Result<u64> {
    let scaled = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(ErrorCode::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(scaled).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Tickets bought by an account that have not been registered to a lottery yet.
#[account]
#[derive(InitSpace)]
pub struct TicketCredit {
    pub bump: u8,
    pub owner: Pubkey,
    pub amount: u64,
}

/// Winner count and per-ticket prize of one tier.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug, InitSpace)]
pub struct TierResult {
    /// Tickets in this tier, counted while drawing.
    pub count: u64,
    /// Prize paid per ticket, committed at calculation.
    pub prize: u64,
}

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Lottery {
    pub bump: u8,
    pub id: u64,
    pub status: LotteryStatus,
    pub kind: LotteryKind,

    /// Registration closes and drawing opens at this unix timestamp.
    pub draw_time: i64,

    /// Zeroed until drawn.
    pub winning_numbers: [u8; NUMBERS_PER_TICKET],

    pub ticket_count: u64,

    /// Jackpot value the prize split was calculated against.
    pub jackpot: u64,

    /// Indexed by `WinTier`.
    pub results: [TierResult; TIER_COUNT],
}

impl Lottery {
    pub fn tier_counts(&self) -> [u64; TIER_COUNT] {
        self.results.map(|result| result.count)
    }

    /// Prize owed to a ticket of `tier`. Zero until the lottery is calculated.
    pub fn prize_for(&self, tier: WinTier) -> u64 {
        if self.status == LotteryStatus::Calculated {
            self.results[tier.index()].prize
        } else {
            0
        }
    }

    pub fn view(&self) -> LotteryView {
        LotteryView {
            status: self.status,
            kind: self.kind,
            draw_time: self.draw_time,
            winning_numbers: self.winning_numbers,
            ticket_count: self.ticket_count,
            jackpot: self.jackpot,
            results: self.results,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug, InitSpace)]
pub struct Ticket {
    pub active: bool,
    pub paid: bool,
    pub numbers: [u8; NUMBERS_PER_TICKET],
    pub owner: Pubkey,
    pub tier: WinTier,
}

/// Registered tickets of one lottery, in registration order.
/// A ticket's index is its position in `tickets`.
#[account]
#[derive(Default)]
pub struct TicketBook {
    pub bump: u8,
    pub lottery_id: u64,
    pub tickets: Vec<Ticket>,
}

impl TicketBook {
    /// Account size, discriminator included, for a book holding `tickets` entries.
    pub fn space(tickets: usize) -> usize {
        8 + 1 + 8 + 4 + tickets * Ticket::INIT_SPACE
    }
}

/// Reads a program account that may not have been created yet.
/// Returns `None` for an empty address; the caller has already checked it
/// against its PDA seeds.
pub fn load_account<T: AccountDeserialize>(
    info: &AccountInfo,
    program_id: &Pubkey,
) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, *program_id, ErrorCode::WrongAccountOwner);

    let data = info.try_borrow_data()?;
    let value = T::try_deserialize(&mut &data[..])?;
    Ok(Some(value))
}

/// Writes `value`, discriminator included, back into `info`.
pub fn store_account<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data;
    value.try_serialize(&mut writer)
}

/// Lottery record as returned by `get_lottery`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct LotteryView {
    pub status: LotteryStatus,
    pub kind: LotteryKind,
    pub draw_time: i64,
    pub winning_numbers: [u8; NUMBERS_PER_TICKET],
    pub ticket_count: u64,
    pub jackpot: u64,
    pub results: [TierResult; TIER_COUNT],
}

/// Ticket record as returned by `get_ticket`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct TicketView {
    pub ticket: Ticket,
    pub prize: u64,
}

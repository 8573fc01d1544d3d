use anchor_lang::prelude::*;

use crate::roles::Role;
use crate::state::LotteryKind;

#[event]
#[derive(Debug)]
pub struct TicketsBought {
    pub buyer: Pubkey,
    pub count: u64,
    pub cost: u64,
    pub fee: u64,
}

#[event]
#[derive(Debug)]
pub struct TicketRegistered {
    pub lottery_id: u64,
    pub index: u64,
    pub owner: Pubkey,
    pub numbers: [u8; 6],
}

#[event]
pub struct LotteryInitialized {
    pub lottery_id: u64,
    pub kind: LotteryKind,
    pub draw_time: i64,
}

#[event]
pub struct LotteryDrawn {
    pub lottery_id: u64,
    pub winning_numbers: [u8; 6],
    pub tier_counts: [u64; 5],
}

#[event]
pub struct LotteryCalculated {
    pub lottery_id: u64,
    pub jackpot: u64,
    pub lottery_pool: u64,
    pub tier_counts: [u64; 5],
    pub tier_prizes: [u64; 5],
}

#[event]
#[derive(Debug)]
pub struct TicketClaimed {
    pub lottery_id: u64,
    pub index: u64,
    pub owner: Pubkey,
    pub prize: u64,
}

#[event]
pub struct TicketPriceUpdated {
    pub admin: Pubkey,
    pub ticket_price: u64,
}

#[event]
pub struct FeeUpdated {
    pub admin: Pubkey,
    pub lottery_fee: u16,
}

#[event]
pub struct DataFeedsUpdated {
    pub admin: Pubkey,
    pub data_feeds: Pubkey,
}

#[event]
pub struct FeeWithdrawn {
    pub to: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RoleGranted {
    pub role: Role,
    pub account: Pubkey,
    pub sender: Pubkey,
}

#[event]
pub struct RoleRevoked {
    pub role: Role,
    pub account: Pubkey,
    pub sender: Pubkey,
}

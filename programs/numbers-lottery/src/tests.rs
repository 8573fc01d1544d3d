//! Full lottery lifecycle driven through the program's state transitions:
//! buy, register, draw, calculate and claim.

use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::instructions::*;
use crate::random::FixedEntropy;
use crate::state::*;

const TICKET_PRICE: u64 = 1_000_000;
const LOTTERY_FEE: u16 = 1_000;
const DRAW_TIME: i64 = 1_700_000_000;

// Words [5, 3, 9] shuffle [1, 49] into 6, 5, 12, 9, 8, 15.
const WINNING: [u8; NUMBERS_PER_TICKET] = [6, 5, 12, 9, 8, 15];

struct World {
    config: LotteryConfig,
    lottery: Lottery,
    book: TicketBook,
    admin: Pubkey,
    alice: Pubkey,
    alice_credit: TicketCredit,
    vault_balance: u64,
}

impl World {
    fn new() -> Self {
        let admin = Pubkey::new_unique();
        let alice = Pubkey::new_unique();

        let mut config = LotteryConfig {
            bump: 255,
            vault_bump: 254,
            authority: admin,
            admins: vec![admin],
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            data_feeds: Pubkey::new_unique(),
            ticket_price: 0,
            lottery_fee: 0,
            total_jackpot: 0,
            unpaid_winnings: 0,
            lottery_count: 0,
        };
        config.set_ticket_price(TICKET_PRICE).unwrap();
        config.set_fee(LOTTERY_FEE).unwrap();

        let lottery = open_lottery(&mut config, &admin, LotteryKind::Yearly, DRAW_TIME).unwrap();

        World {
            config,
            lottery,
            book: TicketBook {
                bump: 252,
                lottery_id: 0,
                tickets: vec![],
            },
            admin,
            alice,
            alice_credit: TicketCredit {
                bump: 251,
                owner: alice,
                amount: 0,
            },
            vault_balance: 0,
        }
    }

    fn buy(&mut self, count: u64) -> SaleSplit {
        let split = self.config.record_sale(count).unwrap();
        self.vault_balance += split.cost;
        self.alice_credit.amount += count;
        split
    }

    fn register(&mut self, numbers: &[[u8; NUMBERS_PER_TICKET]], now: i64) -> Result<u64> {
        register_numbers(
            &mut self.lottery,
            &mut self.book,
            &mut self.alice_credit,
            self.alice,
            numbers,
            now,
        )
    }

    fn draw(&mut self, now: i64) -> Result<[u8; NUMBERS_PER_TICKET]> {
        draw_with(
            &self.config,
            &self.admin,
            &mut self.lottery,
            &mut self.book,
            &FixedEntropy(vec![5, 3, 9]),
            &[0x42; 32],
            now,
        )
    }

    fn claim(&mut self, claimant: Pubkey, indices: &[u64]) -> Result<u64> {
        let (_, total) = settle_claims(
            &mut self.config,
            &self.lottery,
            &mut self.book,
            &claimant,
            indices,
        )?;
        self.vault_balance -= total;
        Ok(total)
    }
}

/// The 100 tickets Alice registers. The first four hit tiers Six to Three;
/// the rest share at most two numbers with the draw.
fn hundred_tickets() -> Vec<[u8; NUMBERS_PER_TICKET]> {
    let mut tickets = vec![
        [6, 5, 12, 9, 8, 15],
        [5, 6, 8, 9, 12, 40],
        [15, 12, 9, 8, 41, 42],
        [5, 6, 8, 30, 31, 32],
        [0x01, 0x02, 0x03, 0x04, 0x05, 0x06],
    ];
    for k in 5..100u8 {
        let base = 16 + k % 28;
        tickets.push([base, base + 1, base + 2, base + 3, base + 4, base + 5]);
    }
    tickets
}

#[test]
fn test_full_lifecycle() {
    let mut world = World::new();

    let split = world.buy(100);
    assert_eq!(split.cost, 100 * TICKET_PRICE);
    assert_eq!(split.fee, 10 * TICKET_PRICE);
    assert_eq!(world.config.total_jackpot, 90 * TICKET_PRICE);

    let tickets = hundred_tickets();
    assert_eq!(world.register(&tickets, DRAW_TIME - 60).unwrap(), 0);
    assert_eq!(world.lottery.ticket_count, 100);
    assert_eq!(world.alice_credit.amount, 0);

    // Registration closes at draw time; drawing opens there.
    assert_eq!(
        world.register(&tickets[..1], DRAW_TIME).unwrap_err(),
        Error::from(ErrorCode::TimeOver)
    );
    assert_eq!(
        world.draw(DRAW_TIME - 1).unwrap_err(),
        Error::from(ErrorCode::NotOver)
    );

    let winning = world.draw(DRAW_TIME).unwrap();
    assert_eq!(winning, WINNING);
    assert_eq!(world.lottery.status, LotteryStatus::Drawn);

    let tiers: Vec<WinTier> = world.book.tickets[..5].iter().map(|t| t.tier).collect();
    assert_eq!(
        tiers,
        vec![
            WinTier::Six,
            WinTier::Five,
            WinTier::Four,
            WinTier::Three,
            WinTier::None
        ]
    );
    let counts = world.lottery.tier_counts();
    assert_eq!(counts, [96, 1, 1, 1, 1]);
    assert_eq!(counts.iter().sum::<u64>(), world.lottery.ticket_count);

    // Prizes are hidden until the pool is committed.
    let views = collect_ticket_views(&world.lottery, &world.book, 0, 3).unwrap();
    assert!(views.iter().all(|view| view.prize == 0));

    let jackpot_before = world.config.total_jackpot;
    let unpaid_before = world.config.unpaid_winnings;
    let prizes = [0, 1_000_000, 5_000_000, 10_000_000, 50_000_000];
    let lottery_pool = 66_000_000;

    let admin = world.admin;
    reconcile_pool(
        &mut world.config,
        &admin,
        &mut world.lottery,
        jackpot_before,
        lottery_pool,
        &counts,
        &prizes,
    )
    .unwrap();

    assert_eq!(jackpot_before - world.config.total_jackpot, lottery_pool);
    assert_eq!(world.config.unpaid_winnings - unpaid_before, lottery_pool);
    assert_eq!(world.lottery.jackpot, jackpot_before);

    let jackpot_after = world.config.total_jackpot;
    assert_eq!(
        reconcile_pool(
            &mut world.config,
            &admin,
            &mut world.lottery,
            jackpot_after,
            0,
            &counts,
            &[0; TIER_COUNT],
        )
        .unwrap_err(),
        Error::from(ErrorCode::NotDrawn)
    );

    // The four-number ticket pays exactly the Four prize, once.
    let unpaid_before_claim = world.config.unpaid_winnings;
    let alice = world.alice;
    assert_eq!(world.claim(alice, &[2]).unwrap(), 5_000_000);
    assert!(world.book.tickets[2].paid);
    assert_eq!(world.config.unpaid_winnings, unpaid_before_claim - 5_000_000);

    assert_eq!(
        world.claim(alice, &[2]).unwrap_err(),
        Error::from(ErrorCode::AlreadyPaid)
    );
    assert_eq!(world.config.unpaid_winnings, unpaid_before_claim - 5_000_000);

    assert_eq!(
        world.claim(alice, &[4]).unwrap_err(),
        Error::from(ErrorCode::NotWinning)
    );
    assert_eq!(
        world.claim(Pubkey::new_unique(), &[0]).unwrap_err(),
        Error::from(ErrorCode::WrongOwner)
    );

    // What stays in the vault beyond jackpot and reserved winnings is the fee.
    assert_eq!(
        fee_for_withdrawal(&world.config, &admin, world.vault_balance).unwrap(),
        split.fee
    );
    assert_eq!(
        fee_for_withdrawal(&world.config, &alice, world.vault_balance).unwrap_err(),
        Error::from(ErrorCode::Unauthorized)
    );

    let views = collect_ticket_views(&world.lottery, &world.book, 0, 4).unwrap();
    assert_eq!(views[2].prize, 5_000_000);
    assert!(views[2].ticket.paid);
    assert_eq!(views[0].prize, 50_000_000);
    assert_eq!(views[4].prize, 0);
}

#[test]
fn test_lottery_query_after_draw() {
    let mut world = World::new();
    world.buy(3);
    world.register(&hundred_tickets()[..3], 0).unwrap();
    world.draw(DRAW_TIME).unwrap();

    let stored = world.lottery.clone();
    let views = collect_lottery_views(0, 2, world.config.lottery_count, |_| Ok(stored.clone()))
        .unwrap();

    assert_eq!(views[0].status, LotteryStatus::Drawn);
    assert_eq!(views[0].winning_numbers, WINNING);
    assert_eq!(views[0].ticket_count, 3);
    assert_eq!(views[1].status, LotteryStatus::NotExist);
    assert_eq!(views[2], LotteryView::default());
}

#[test]
fn test_only_admins_draw() {
    let mut world = World::new();
    world.admin = Pubkey::new_unique();

    assert_eq!(
        world.draw(DRAW_TIME).unwrap_err(),
        Error::from(ErrorCode::Unauthorized)
    );
    assert_eq!(world.lottery.status, LotteryStatus::Init);
}

#[test]
fn test_register_needs_credit() {
    let mut world = World::new();
    world.buy(1);

    assert_eq!(
        world.register(&hundred_tickets()[..2], 0).unwrap_err(),
        Error::from(ErrorCode::InsufficientCredit)
    );
    assert_eq!(world.register(&hundred_tickets()[..1], 0).unwrap(), 0);
    assert_eq!(
        world.register(&hundred_tickets()[1..2], 0).unwrap_err(),
        Error::from(ErrorCode::InsufficientCredit)
    );
}

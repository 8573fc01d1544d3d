use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Authorization
    #[msg("Caller does not hold the required role")]
    Unauthorized,
    #[msg("Admin list is full")]
    AdminListFull,
    #[msg("Account does not hold this role")]
    RoleNotFound,

    // Lottery state machine
    #[msg("Lottery not init")]
    NotInit,
    #[msg("Lottery time is over")]
    TimeOver,
    #[msg("Lottery is not over")]
    NotOver,
    #[msg("Lottery not drawn")]
    NotDrawn,
    #[msg("Lottery not calculated")]
    NotCalculated,

    // Input validation
    #[msg("Ticket count must be greater than zero")]
    ZeroCount,
    #[msg("Not enough tickets")]
    InsufficientCredit,
    #[msg("Ticket number out of range")]
    WrongNumber,
    #[msg("Ticket contains the same number twice")]
    DuplicateNumber,
    #[msg("Wrong indexes")]
    IndexRange,
    #[msg("Wrong ticket price")]
    WrongPrice,
    #[msg("Wrong fee value")]
    WrongFee,
    #[msg("Wrong datafeeds address")]
    WrongDataFeeds,
    #[msg("Wrong range borders")]
    Range,
    #[msg("Wrong max number")]
    WrongMaxNumber,
    #[msg("Query page is too large")]
    QueryTooLarge,
    #[msg("Lottery account missing from query")]
    LotteryAccountMissing,
    #[msg("Token account mint does not match the lottery mint")]
    WrongMint,
    #[msg("Account is not owned by the lottery program")]
    WrongAccountOwner,

    // Reconciliation
    #[msg("Wrong pool value")]
    WrongPoolValue,
    #[msg("Wrong tickets count")]
    WrongTicketCount,
    #[msg("Lottery pool is too much")]
    PoolTooLarge,

    // Claims and fees
    #[msg("Ticket not active")]
    NotActive,
    #[msg("Wrong ticket owner")]
    WrongOwner,
    #[msg("Ticket is not winning")]
    NotWinning,
    #[msg("Ticket is already paid")]
    AlreadyPaid,
    #[msg("No fee")]
    NoFee,

    // Randomness
    #[msg("Incorrect randomness account")]
    IncorrectRandomnessAccount,
    #[msg("Randomness not resolved")]
    RandomnessNotResolved,

    #[msg("Math overflow occurred")]
    MathOverflow,
}

pub mod admin;
pub mod buy_tickets;
pub mod calculate_lottery;
pub mod claim_tickets;
pub mod data_feeds;
pub mod draw_lottery;
pub mod init_lottery;
pub mod queries;
pub mod register_tickets;
pub mod vault;

pub use admin::*;
pub use buy_tickets::*;
pub use calculate_lottery::*;
pub use claim_tickets::*;
pub use data_feeds::*;
pub use draw_lottery::*;
pub use init_lottery::*;
pub use queries::*;
pub use register_tickets::*;

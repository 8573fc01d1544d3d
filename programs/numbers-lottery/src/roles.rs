use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::state::LotteryConfig;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    /// Manages the admin list.
    DefaultAdmin,
    /// Runs lotteries and manages pricing, fees and the randomness source.
    LotteryAdmin,
}

/// Answers "does this account hold this role".
pub trait RoleAuthority {
    fn has_role(&self, account: &Pubkey, role: Role) -> bool;
}

impl RoleAuthority for LotteryConfig {
    fn has_role(&self, account: &Pubkey, role: Role) -> bool {
        match role {
            Role::DefaultAdmin => self.authority == *account,
            Role::LotteryAdmin => self.admins.contains(account),
        }
    }
}

/// Fails with `Unauthorized` unless `caller` holds `role`.
/// The (caller, role) pair goes to the program log.
pub fn require_role<A: RoleAuthority + ?Sized>(
    authority: &A,
    caller: &Pubkey,
    role: Role,
) -> Result<()> {
    if !authority.has_role(caller, role) {
        msg!("Account {} is missing role {:?}", caller, role);
        return err!(ErrorCode::Unauthorized);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    struct StaticRoles {
        admin: Pubkey,
    }

    impl RoleAuthority for StaticRoles {
        fn has_role(&self, account: &Pubkey, role: Role) -> bool {
            role == Role::LotteryAdmin && *account == self.admin
        }
    }

    #[test]
    fn test_require_role() {
        let admin = Pubkey::new_unique();
        let roles = StaticRoles { admin };

        assert!(require_role(&roles, &admin, Role::LotteryAdmin).is_ok());
        assert_eq!(
            require_role(&roles, &admin, Role::DefaultAdmin).unwrap_err(),
            Error::from(ErrorCode::Unauthorized)
        );
        assert_eq!(
            require_role(&roles, &Pubkey::new_unique(), Role::LotteryAdmin).unwrap_err(),
            Error::from(ErrorCode::Unauthorized)
        );
    }

    #[test]
    fn test_config_roles() {
        let authority = Pubkey::new_unique();
        let admin = Pubkey::new_unique();
        let config = LotteryConfig {
            bump: 0,
            vault_bump: 0,
            authority,
            admins: vec![admin],
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            data_feeds: Pubkey::new_unique(),
            ticket_price: 1,
            lottery_fee: 0,
            total_jackpot: 0,
            unpaid_winnings: 0,
            lottery_count: 0,
        };

        assert!(config.has_role(&authority, Role::DefaultAdmin));
        assert!(!config.has_role(&authority, Role::LotteryAdmin));
        assert!(config.has_role(&admin, Role::LotteryAdmin));
        assert!(!config.has_role(&admin, Role::DefaultAdmin));
    }
}

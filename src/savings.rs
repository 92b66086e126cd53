use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LendingConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::MemberId;

/// one signed row in the savings ledger
///
/// deposits are positive, withdrawals negative; `balance` snapshots the
/// running total after the row was applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingEntry {
    pub id: Uuid,
    pub member_id: MemberId,
    pub amount: Money,
    pub balance: Money,
    pub interest_rate: Rate,
    pub created_at: DateTime<Utc>,
}

impl SavingEntry {
    pub fn is_deposit(&self) -> bool {
        !self.amount.is_negative()
    }
}

/// a member's savings ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub member_id: MemberId,
    pub entries: Vec<SavingEntry>,
}

impl SavingsAccount {
    pub fn new(member_id: MemberId) -> Self {
        Self {
            member_id,
            entries: Vec::new(),
        }
    }

    /// sum of signed amounts, floored at zero for display
    pub fn total_balance(&self) -> Money {
        self.entries
            .iter()
            .map(|entry| entry.amount)
            .fold(Money::ZERO, |acc, x| acc + x)
            .max(Money::ZERO)
    }

    /// record a deposit
    pub fn deposit(
        &mut self,
        amount: Money,
        config: &LendingConfig,
        as_of: DateTime<Utc>,
    ) -> Result<SavingEntry> {
        if amount.is_zero() || amount.is_negative() {
            return Err(LedgerError::InvalidAmount { amount });
        }

        let entry = SavingEntry {
            id: Uuid::new_v4(),
            member_id: self.member_id,
            amount,
            balance: self.total_balance() + amount,
            interest_rate: config.savings_interest_rate,
            created_at: as_of,
        };
        self.entries.push(entry.clone());

        Ok(entry)
    }

    /// record a withdrawal as a negative row
    pub fn withdraw(
        &mut self,
        amount: Money,
        config: &LendingConfig,
        as_of: DateTime<Utc>,
    ) -> Result<SavingEntry> {
        if amount.is_zero() || amount.is_negative() {
            return Err(LedgerError::InvalidAmount { amount });
        }

        let available = self.total_balance();
        if amount > available {
            return Err(LedgerError::InsufficientSavings {
                available,
                requested: amount,
            });
        }

        let entry = SavingEntry {
            id: Uuid::new_v4(),
            member_id: self.member_id,
            amount: Money::ZERO - amount,
            balance: available - amount,
            interest_rate: config.savings_interest_rate,
            created_at: as_of,
        };
        self.entries.push(entry.clone());

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account() -> (SavingsAccount, LendingConfig) {
        (SavingsAccount::new(Uuid::new_v4()), LendingConfig::standard())
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_deposit_and_withdraw_flow() {
        let (mut account, config) = account();

        account.deposit(Money::from_major(5_000), &config, day(1)).unwrap();
        account.deposit(Money::from_major(2_500), &config, day(2)).unwrap();
        assert_eq!(account.total_balance(), Money::from_major(7_500));

        let withdrawal = account
            .withdraw(Money::from_major(3_000), &config, day(3))
            .unwrap();
        assert_eq!(withdrawal.amount, Money::from_major(-3_000));
        assert_eq!(withdrawal.balance, Money::from_major(4_500));
        assert!(!withdrawal.is_deposit());

        assert_eq!(account.total_balance(), Money::from_major(4_500));
        assert_eq!(account.entries.len(), 3);
    }

    #[test]
    fn test_balance_snapshots_track_running_total() {
        let (mut account, config) = account();

        let first = account.deposit(Money::from_major(1_000), &config, day(1)).unwrap();
        assert_eq!(first.balance, Money::from_major(1_000));

        let second = account.deposit(Money::from_major(500), &config, day(2)).unwrap();
        assert_eq!(second.balance, Money::from_major(1_500));
        assert_eq!(second.interest_rate, config.savings_interest_rate);
    }

    #[test]
    fn test_withdrawal_refused_beyond_balance() {
        let (mut account, config) = account();
        account.deposit(Money::from_major(1_000), &config, day(1)).unwrap();

        let err = account
            .withdraw(Money::from_major(1_001), &config, day(2))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientSavings { .. }));

        // the ledger is untouched after a refused withdrawal
        assert_eq!(account.entries.len(), 1);
        assert_eq!(account.total_balance(), Money::from_major(1_000));

        // withdrawing the exact balance is allowed
        account.withdraw(Money::from_major(1_000), &config, day(3)).unwrap();
        assert_eq!(account.total_balance(), Money::ZERO);
    }

    #[test]
    fn test_non_positive_amounts_refused() {
        let (mut account, config) = account();

        assert!(account.deposit(Money::ZERO, &config, day(1)).is_err());
        assert!(account.deposit(Money::from_major(-5), &config, day(1)).is_err());
        assert!(account.withdraw(Money::ZERO, &config, day(1)).is_err());
        assert!(account.withdraw(Money::from_major(-5), &config, day(1)).is_err());
    }

    #[test]
    fn test_display_total_floors_at_zero() {
        let (mut account, config) = account();
        account.deposit(Money::from_major(100), &config, day(1)).unwrap();

        // a backfilled correction row can push the raw sum negative
        account.entries.push(SavingEntry {
            id: Uuid::new_v4(),
            member_id: account.member_id,
            amount: Money::from_major(-250),
            balance: Money::ZERO,
            interest_rate: config.savings_interest_rate,
            created_at: day(2),
        });

        assert_eq!(account.total_balance(), Money::ZERO);
    }
}

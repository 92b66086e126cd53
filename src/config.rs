use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::{PAYMENT_CYCLE_DAYS, PENALTY_PERIOD_DAYS};
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// cooperative lending policy knobs
///
/// every rate, threshold and cycle length the core consults lives here so
/// call sites never hard-code policy numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LendingConfig {
    /// annual interest rate applied to new loans
    pub interest_rate: Rate,
    /// share of the monthly payment charged per overdue period
    pub penalty_rate: Rate,
    /// days the due date advances after a partial repayment
    pub payment_cycle_days: i64,
    /// length of one overdue penalty period
    pub penalty_period_days: i64,
    /// paid-in capital share required for loan eligibility
    pub capital_share_threshold: Money,
    /// percentage of an approved loan that must be paid down
    /// before a new application is accepted
    pub paydown_threshold: Decimal,
    /// annual interest rate stamped on savings entries
    pub savings_interest_rate: Rate,
}

impl LendingConfig {
    /// standard cooperative policy
    pub fn standard() -> Self {
        Self {
            interest_rate: Rate::from_percentage(5),
            penalty_rate: Rate::from_percentage(5),
            payment_cycle_days: PAYMENT_CYCLE_DAYS,
            penalty_period_days: PENALTY_PERIOD_DAYS,
            capital_share_threshold: Money::from_major(20_000),
            paydown_threshold: dec!(50),
            savings_interest_rate: Rate::from_percentage(2),
        }
    }

    /// custom policy with basic sanity checks
    pub fn custom(
        interest_rate: Rate,
        penalty_rate: Rate,
        payment_cycle_days: i64,
        penalty_period_days: i64,
        capital_share_threshold: Money,
        paydown_threshold: Decimal,
        savings_interest_rate: Rate,
    ) -> Result<Self> {
        if interest_rate.as_decimal().is_sign_negative()
            || penalty_rate.as_decimal().is_sign_negative()
            || savings_interest_rate.as_decimal().is_sign_negative()
        {
            return Err(LedgerError::InvalidConfiguration {
                message: "rates must be non-negative".to_string(),
            });
        }

        if payment_cycle_days <= 0 || penalty_period_days <= 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "cycle lengths must be positive".to_string(),
            });
        }

        if capital_share_threshold.is_negative() {
            return Err(LedgerError::InvalidConfiguration {
                message: "capital share threshold must be non-negative".to_string(),
            });
        }

        if paydown_threshold.is_sign_negative() || paydown_threshold > dec!(100) {
            return Err(LedgerError::InvalidConfiguration {
                message: "paydown threshold must be within 0..=100".to_string(),
            });
        }

        Ok(Self {
            interest_rate,
            penalty_rate,
            payment_cycle_days,
            penalty_period_days,
            capital_share_threshold,
            paydown_threshold,
            savings_interest_rate,
        })
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy() {
        let config = LendingConfig::standard();

        assert_eq!(config.interest_rate, Rate::from_percentage(5));
        assert_eq!(config.penalty_rate, Rate::from_percentage(5));
        assert_eq!(config.payment_cycle_days, 30);
        assert_eq!(config.penalty_period_days, 30);
        assert_eq!(config.capital_share_threshold, Money::from_major(20_000));
        assert_eq!(config.paydown_threshold, dec!(50));
    }

    #[test]
    fn test_custom_rejects_bad_values() {
        let bad_cycle = LendingConfig::custom(
            Rate::from_percentage(5),
            Rate::from_percentage(5),
            0,
            30,
            Money::from_major(20_000),
            dec!(50),
            Rate::from_percentage(2),
        );
        assert!(bad_cycle.is_err());

        let bad_threshold = LendingConfig::custom(
            Rate::from_percentage(5),
            Rate::from_percentage(5),
            30,
            30,
            Money::from_major(20_000),
            dec!(150),
            Rate::from_percentage(2),
        );
        assert!(bad_threshold.is_err());
    }
}

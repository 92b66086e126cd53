use crate::config::LendingConfig;
use crate::errors::{LedgerError, Result};
use crate::loan::Loan;
use crate::member::Member;
use crate::types::LoanStatus;

/// gate for new loan applications
///
/// rule 1: the member's paid-in capital share must meet the threshold
/// rule 2: every approved loan must be paid down past the configured
/// percentage before a new application is accepted
///
/// rule 1 short-circuits; rule 2 reports the first offending loan with
/// its current paydown percentage
pub struct EligibilityPolicy<'a> {
    config: &'a LendingConfig,
}

impl<'a> EligibilityPolicy<'a> {
    pub fn new(config: &'a LendingConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, member: &Member, loans: &[Loan]) -> Result<()> {
        if member.capital_share < self.config.capital_share_threshold {
            return Err(LedgerError::NotEligible {
                capital_share: member.capital_share,
                required: self.config.capital_share_threshold,
            });
        }

        for loan in loans.iter().filter(|l| l.status == LoanStatus::Approved) {
            let percent_paid = loan.percent_paid();
            if percent_paid < self.config.paydown_threshold {
                return Err(LedgerError::PaydownBelowThreshold {
                    loan_id: loan.id,
                    percent_paid: percent_paid.round_dp(2),
                    required: self.config.paydown_threshold,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::LoanType;
    use chrono::Utc;
    use uuid::Uuid;

    fn member_with_share(share: i64, config: &LendingConfig) -> Member {
        Member::new(
            "Jose",
            "Reyes",
            "jose@example.com",
            "09170000002",
            Money::from_major(share),
            config,
            Utc::now(),
        )
    }

    fn approved_loan(member_id: Uuid, principal: i64, paid: i64) -> Loan {
        let mut loan = Loan::new(
            member_id,
            Money::from_major(principal),
            Rate::from_percentage(5),
            12,
            LoanType::Personal,
            "tricycle repair",
            Utc::now(),
        )
        .unwrap();
        loan.approve(Utc::now()).unwrap();
        loan.reduce_balance(Money::from_major(paid));
        loan
    }

    #[test]
    fn test_capital_share_gate() {
        let config = LendingConfig::standard();
        let policy = EligibilityPolicy::new(&config);

        let below = member_with_share(19_999, &config);
        let err = policy.check(&below, &[]).unwrap_err();
        assert!(matches!(err, LedgerError::NotEligible { .. }));

        let at_threshold = member_with_share(20_000, &config);
        assert!(policy.check(&at_threshold, &[]).is_ok());
    }

    #[test]
    fn test_paydown_gate() {
        let config = LendingConfig::standard();
        let policy = EligibilityPolicy::new(&config);
        let member = member_with_share(25_000, &config);

        // 49% paid: application refused, percentage reported
        let underpaid = approved_loan(member.id, 10_000, 4_900);
        let err = policy.check(&member, &[underpaid]).unwrap_err();
        match err {
            LedgerError::PaydownBelowThreshold { percent_paid, .. } => {
                assert_eq!(percent_paid, rust_decimal_macros::dec!(49));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // exactly 50% paid: accepted
        let half_paid = approved_loan(member.id, 10_000, 5_000);
        assert!(policy.check(&member, &[half_paid]).is_ok());
    }

    #[test]
    fn test_capital_rule_short_circuits() {
        let config = LendingConfig::standard();
        let policy = EligibilityPolicy::new(&config);

        // both rules violated: the capital rule reports first
        let member = member_with_share(1_000, &config);
        let underpaid = approved_loan(member.id, 10_000, 0);
        let err = policy.check(&member, &[underpaid]).unwrap_err();
        assert!(matches!(err, LedgerError::NotEligible { .. }));
    }

    #[test]
    fn test_completed_loans_do_not_block() {
        let config = LendingConfig::standard();
        let policy = EligibilityPolicy::new(&config);
        let member = member_with_share(25_000, &config);

        let mut paid_off = approved_loan(member.id, 10_000, 0);
        paid_off.reduce_balance(Money::from_major(10_000));
        assert_eq!(paid_off.status, LoanStatus::Completed);

        assert!(policy.check(&member, &[paid_off]).is_ok());
    }
}

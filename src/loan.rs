use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{add_calendar_months, days_between};
use crate::config::LendingConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::{LoanId, LoanStatus, LoanType, MemberId};

/// loan ledger entry
///
/// single source of truth for a loan's financial state; all derived facts
/// (overdue status, penalty, paydown percentage) are computed from these
/// fields and never stored redundantly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub member_id: MemberId,
    pub principal_amount: Money,
    /// annual rate
    pub interest_rate: Rate,
    pub duration_months: u32,
    /// amortized payment, fixed at creation
    pub monthly_payment: Money,
    pub remaining_balance: Money,
    pub status: LoanStatus,
    pub loan_type: LoanType,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
}

/// standard fixed-rate amortized payment
///
/// zero-rate loans fall back to a linear split of principal over the term
pub fn amortized_monthly_payment(
    principal: Money,
    annual_rate: Rate,
    months: u32,
) -> Result<Money> {
    if months == 0 {
        return Err(LedgerError::InvalidLoanTerms {
            message: "duration must be at least one month".to_string(),
        });
    }

    let monthly_rate = annual_rate.as_decimal() / dec!(12);

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    // payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let mut compound = Decimal::ONE;
    let base = Decimal::ONE + monthly_rate;
    for _ in 0..months {
        compound *= base;
    }

    let numerator = principal.as_decimal() * monthly_rate * compound;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

impl Loan {
    /// create a pending loan application
    pub fn new(
        member_id: MemberId,
        principal_amount: Money,
        annual_rate: Rate,
        duration_months: u32,
        loan_type: LoanType,
        purpose: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if principal_amount.is_zero() || principal_amount.is_negative() {
            return Err(LedgerError::InvalidLoanTerms {
                message: format!("principal must be positive, got {}", principal_amount),
            });
        }

        let monthly_payment = amortized_monthly_payment(principal_amount, annual_rate, duration_months)?;

        Ok(Self {
            id: Uuid::new_v4(),
            member_id,
            principal_amount,
            interest_rate: annual_rate,
            duration_months,
            monthly_payment,
            remaining_balance: principal_amount,
            status: LoanStatus::Pending,
            loan_type,
            purpose: purpose.into(),
            created_at: now,
            approved_at: None,
            due_date: None,
        })
    }

    /// approve a pending application
    ///
    /// stamps the approval time and sets the due date one loan term ahead,
    /// using calendar months with year rollover
    pub fn approve(&mut self, as_of: DateTime<Utc>) -> Result<()> {
        if self.status != LoanStatus::Pending {
            return Err(LedgerError::LoanNotPending {
                status: self.status,
            });
        }

        self.status = LoanStatus::Approved;
        self.approved_at = Some(as_of);
        self.due_date = Some(add_calendar_months(as_of, self.duration_months));

        Ok(())
    }

    /// reject a pending application
    pub fn reject(&mut self) -> Result<()> {
        if self.status != LoanStatus::Pending {
            return Err(LedgerError::LoanNotPending {
                status: self.status,
            });
        }

        self.status = LoanStatus::Rejected;

        Ok(())
    }

    /// mark funds as released to the member
    pub fn activate(&mut self) -> Result<()> {
        if self.status != LoanStatus::Approved {
            return Err(LedgerError::LoanNotApproved {
                status: self.status,
            });
        }

        self.status = LoanStatus::Active;

        Ok(())
    }

    /// true iff the due date has passed; the due date itself is not overdue
    pub fn is_overdue(&self, as_of: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => as_of > due,
            None => false,
        }
    }

    /// whole days past the due date, zero when not overdue
    pub fn days_overdue(&self, as_of: DateTime<Utc>) -> i64 {
        match self.due_date {
            Some(due) => days_between(due, as_of).max(0),
            None => 0,
        }
    }

    /// penalty owed as of a point in time
    ///
    /// one penalty period covers each started window of
    /// `penalty_period_days` past due: 1-30 days is one period,
    /// 31-60 is two, and the first period is charged the moment
    /// the loan becomes overdue
    pub fn calculate_penalty(&self, as_of: DateTime<Utc>, config: &LendingConfig) -> Money {
        if !self.is_overdue(as_of) {
            return Money::ZERO;
        }

        let periods = self.days_overdue(as_of) / config.penalty_period_days + 1;

        self.monthly_payment * config.penalty_rate.as_decimal() * Decimal::from(periods)
    }

    /// push the due date one payment cycle out
    ///
    /// called only after a repayment that leaves a positive balance;
    /// a no-op before approval when no due date exists yet
    pub fn advance_due_date_after_payment(&mut self, cycle_days: i64) {
        if let Some(due) = self.due_date {
            self.due_date = Some(due + Duration::days(cycle_days));
        }
    }

    /// pure projection of the next due date, independent of any payment
    pub fn next_due_date(&self, cycle_days: i64) -> Option<DateTime<Utc>> {
        self.due_date.map(|due| due + Duration::days(cycle_days))
    }

    /// reduce the balance by a repayment, clipping at zero
    ///
    /// returns the portion actually applied; a zeroed balance forces the
    /// status to Completed
    pub(crate) fn reduce_balance(&mut self, amount: Money) -> Money {
        let applied = amount.min(self.remaining_balance);
        self.remaining_balance = (self.remaining_balance - amount).max(Money::ZERO);

        if self.remaining_balance.is_zero() {
            self.status = LoanStatus::Completed;
        }

        applied
    }

    /// percentage of principal already repaid
    pub fn percent_paid(&self) -> Decimal {
        if self.principal_amount.is_zero() {
            return Decimal::ZERO;
        }

        (self.principal_amount - self.remaining_balance).as_decimal()
            / self.principal_amount.as_decimal()
            * dec!(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pending_loan(principal: i64, rate_pct: u32, months: u32) -> Loan {
        Loan::new(
            Uuid::new_v4(),
            Money::from_major(principal),
            Rate::from_percentage(rate_pct),
            months,
            LoanType::Personal,
            "sari-sari store stock",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_amortized_payment_standard_terms() {
        // 50,000 at 5% over 12 months
        let payment = amortized_monthly_payment(
            Money::from_major(50_000),
            Rate::from_percentage(5),
            12,
        )
        .unwrap();

        assert_eq!(payment.round_dp(2), Money::from_str_exact("4280.37").unwrap());
    }

    #[test]
    fn test_amortized_payment_zero_rate_falls_back_to_linear() {
        let payment =
            amortized_monthly_payment(Money::from_major(12_000), Rate::ZERO, 12).unwrap();

        assert_eq!(payment, Money::from_major(1_000));
    }

    #[test]
    fn test_amortized_payment_zero_term_rejected() {
        let result =
            amortized_monthly_payment(Money::from_major(10_000), Rate::from_percentage(5), 0);

        assert!(matches!(result, Err(LedgerError::InvalidLoanTerms { .. })));
    }

    #[test]
    fn test_new_loan_starts_pending_with_full_balance() {
        let loan = pending_loan(50_000, 5, 12);

        assert_eq!(loan.status, LoanStatus::Pending);
        assert_eq!(loan.remaining_balance, Money::from_major(50_000));
        assert!(loan.approved_at.is_none());
        assert!(loan.due_date.is_none());
    }

    #[test]
    fn test_approval_stamps_due_date_with_month_rollover() {
        let mut loan = pending_loan(30_000, 5, 4);
        let approved = Utc.with_ymd_and_hms(2024, 11, 10, 8, 0, 0).unwrap();

        loan.approve(approved).unwrap();

        assert_eq!(loan.status, LoanStatus::Approved);
        assert_eq!(loan.approved_at, Some(approved));
        // november + 4 months rolls into march of the next year
        assert_eq!(
            loan.due_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_approve_rejects_non_pending() {
        let mut loan = pending_loan(30_000, 5, 6);
        loan.approve(Utc::now()).unwrap();

        let err = loan.approve(Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::LoanNotPending {
                status: LoanStatus::Approved
            }
        ));

        let mut rejected = pending_loan(30_000, 5, 6);
        rejected.reject().unwrap();
        assert!(rejected.approve(Utc::now()).is_err());
    }

    #[test]
    fn test_reject_only_from_pending() {
        let mut loan = pending_loan(30_000, 5, 6);
        loan.reject().unwrap();
        assert_eq!(loan.status, LoanStatus::Rejected);

        assert!(loan.reject().is_err());
    }

    #[test]
    fn test_activate_only_from_approved() {
        let mut loan = pending_loan(30_000, 5, 6);
        assert!(loan.activate().is_err());

        loan.approve(Utc::now()).unwrap();
        loan.activate().unwrap();
        assert_eq!(loan.status, LoanStatus::Active);
    }

    #[test]
    fn test_overdue_boundary() {
        let mut loan = pending_loan(30_000, 5, 6);
        let approved = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        loan.approve(approved).unwrap();

        let due = loan.due_date.unwrap();

        // the due date itself is not overdue, one second past is
        assert!(!loan.is_overdue(due));
        assert!(loan.is_overdue(due + Duration::seconds(1)));
        assert_eq!(loan.days_overdue(due + Duration::seconds(1)), 0);
        assert_eq!(loan.days_overdue(due + Duration::days(3)), 3);
    }

    #[test]
    fn test_penalty_periods() {
        let config = LendingConfig::standard();
        let mut loan = pending_loan(30_000, 5, 6);
        loan.approve(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .unwrap();
        loan.monthly_payment = Money::from_major(5_000);

        let due = loan.due_date.unwrap();

        // not overdue: no penalty
        assert_eq!(loan.calculate_penalty(due, &config), Money::ZERO);

        // 35 days overdue: two periods of 5% each
        assert_eq!(
            loan.calculate_penalty(due + Duration::days(35), &config),
            Money::from_major(500)
        );

        // 65 days overdue: three periods
        assert_eq!(
            loan.calculate_penalty(due + Duration::days(65), &config),
            Money::from_major(750)
        );

        // first period charges the moment the loan becomes overdue
        assert_eq!(
            loan.calculate_penalty(due + Duration::seconds(1), &config),
            Money::from_major(250)
        );
    }

    #[test]
    fn test_penalty_is_idempotent() {
        let config = LendingConfig::standard();
        let mut loan = pending_loan(30_000, 5, 6);
        loan.approve(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .unwrap();

        let as_of = loan.due_date.unwrap() + Duration::days(42);
        let first = loan.calculate_penalty(as_of, &config);
        let second = loan.calculate_penalty(as_of, &config);

        assert_eq!(first, second);
    }

    #[test]
    fn test_due_date_advance_and_projection() {
        let mut loan = pending_loan(30_000, 5, 6);
        let approved = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        loan.approve(approved).unwrap();

        let due = loan.due_date.unwrap();

        // projection does not mutate
        assert_eq!(loan.next_due_date(30), Some(due + Duration::days(30)));
        assert_eq!(loan.due_date, Some(due));

        loan.advance_due_date_after_payment(30);
        assert_eq!(loan.due_date, Some(due + Duration::days(30)));
    }

    #[test]
    fn test_reduce_balance_clips_and_completes() {
        let mut loan = pending_loan(10_000, 5, 6);
        loan.approve(Utc::now()).unwrap();

        let applied = loan.reduce_balance(Money::from_major(4_000));
        assert_eq!(applied, Money::from_major(4_000));
        assert_eq!(loan.remaining_balance, Money::from_major(6_000));
        assert_eq!(loan.status, LoanStatus::Approved);

        // overpayment clips at zero and completes the loan
        let applied = loan.reduce_balance(Money::from_major(9_000));
        assert_eq!(applied, Money::from_major(6_000));
        assert_eq!(loan.remaining_balance, Money::ZERO);
        assert_eq!(loan.status, LoanStatus::Completed);
    }

    #[test]
    fn test_percent_paid() {
        let mut loan = pending_loan(10_000, 5, 6);
        loan.approve(Utc::now()).unwrap();

        assert_eq!(loan.percent_paid(), dec!(0));

        loan.reduce_balance(Money::from_major(4_900));
        assert_eq!(loan.percent_paid(), dec!(49));

        loan.reduce_balance(Money::from_major(100));
        assert_eq!(loan.percent_paid(), dec!(50));
    }
}

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LendingConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::loan::Loan;
use crate::types::{LoanId, LoanStatus, MemberId, PaymentId, PaymentMethod, PaymentStatus};

/// immutable record of a member-submitted repayment
///
/// stores the full submitted amount even when the ledger clips the
/// application at the outstanding balance; the receipt carries the
/// applied portion separately
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub member_id: MemberId,
    pub loan_id: LoanId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
}

/// outcome of applying one repayment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub amount_applied: Money,
    pub remaining_balance: Money,
    pub loan_completed: bool,
}

/// applies member repayments to loans
pub struct RepaymentProcessor {
    config: LendingConfig,
}

impl RepaymentProcessor {
    pub fn new(config: LendingConfig) -> Self {
        Self { config }
    }

    /// apply a repayment to a loan
    ///
    /// the balance is clipped at zero; a zeroed balance completes the
    /// loan and leaves the due date untouched, any other payment pushes
    /// the due date one cycle out
    pub fn process(
        &self,
        loan: &mut Loan,
        amount: Money,
        method: PaymentMethod,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<PaymentReceipt> {
        if amount.is_zero() || amount.is_negative() {
            return Err(LedgerError::InvalidPaymentAmount { amount });
        }

        if !loan.status.accepts_payments() {
            return Err(LedgerError::LoanNotOpen {
                status: loan.status,
            });
        }

        let now = time_provider.now();
        let old_due_date = loan.due_date;

        let amount_applied = loan.reduce_balance(amount);
        let loan_completed = loan.status == LoanStatus::Completed;

        if !loan_completed {
            loan.advance_due_date_after_payment(self.config.payment_cycle_days);
        }

        // the payment row records what the member submitted, not the clip
        let payment = Payment {
            id: Uuid::new_v4(),
            member_id: loan.member_id,
            loan_id: loan.id,
            amount,
            method,
            payment_date: now,
            status: PaymentStatus::Completed,
        };

        events.emit(Event::PaymentReceived {
            payment_id: payment.id,
            loan_id: loan.id,
            amount,
            amount_applied,
            remaining_balance: loan.remaining_balance,
            timestamp: now,
        });

        if loan_completed {
            events.emit(Event::LoanCompleted {
                loan_id: loan.id,
                final_payment: amount,
                timestamp: now,
            });
        } else if let (Some(old), Some(new)) = (old_due_date, loan.due_date) {
            events.emit(Event::DueDateAdvanced {
                loan_id: loan.id,
                old_due_date: old,
                new_due_date: new,
            });
        }

        Ok(PaymentReceipt {
            payment,
            amount_applied,
            remaining_balance: loan.remaining_balance,
            loan_completed,
        })
    }
}

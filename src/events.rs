use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, MemberId, MemberStatus, PaymentId, PenaltyId};

/// all events that can be emitted by a member account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // loan lifecycle events
    LoanApplied {
        loan_id: LoanId,
        member_id: MemberId,
        principal: Money,
        monthly_payment: Money,
        timestamp: DateTime<Utc>,
    },
    LoanApproved {
        loan_id: LoanId,
        due_date: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    LoanRejected {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    LoanActivated {
        loan_id: LoanId,
        disbursed: Money,
        timestamp: DateTime<Utc>,
    },
    LoanCompleted {
        loan_id: LoanId,
        final_payment: Money,
        timestamp: DateTime<Utc>,
    },

    // repayment events
    PaymentReceived {
        payment_id: PaymentId,
        loan_id: LoanId,
        amount: Money,
        amount_applied: Money,
        remaining_balance: Money,
        timestamp: DateTime<Utc>,
    },
    DueDateAdvanced {
        loan_id: LoanId,
        old_due_date: DateTime<Utc>,
        new_due_date: DateTime<Utc>,
    },

    // penalty events
    PenaltyAssessed {
        penalty_id: PenaltyId,
        loan_id: LoanId,
        amount: Money,
        days_overdue: i64,
        timestamp: DateTime<Utc>,
    },

    // savings events
    SavingsDeposited {
        member_id: MemberId,
        amount: Money,
        balance: Money,
        timestamp: DateTime<Utc>,
    },
    SavingsWithdrawn {
        member_id: MemberId,
        amount: Money,
        balance: Money,
        timestamp: DateTime<Utc>,
    },

    // membership events
    MembershipUpdated {
        member_id: MemberId,
        capital_share: Money,
        member_status: MemberStatus,
        loan_eligibility: bool,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

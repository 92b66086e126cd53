use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a member
pub type MemberId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a payment
pub type PaymentId = Uuid;

/// unique identifier for a penalty record
pub type PenaltyId = Uuid;

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// application submitted, awaiting staff review
    Pending,
    /// approved by staff, due date stamped
    Approved,
    /// funds released to the member
    Active,
    /// declined by staff
    Rejected,
    /// balance fully repaid
    Completed,
}

impl LoanStatus {
    /// statuses against which repayments are accepted
    pub fn accepts_payments(&self) -> bool {
        matches!(self, LoanStatus::Approved | LoanStatus::Active)
    }
}

/// loan product type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    Personal,
    Business,
    Emergency,
    Education,
    Home,
    Car,
    Medical,
}

/// channel a repayment came in through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// over-the-counter at the cooperative office
    Manual,
    Gcash,
    Card,
}

/// payment record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

/// penalty record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyStatus {
    Unpaid,
    Paid,
}

/// membership tier derived from capital share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    /// below the capital share threshold, not loan eligible
    Member,
    /// paid-in capital share at or above the threshold
    RegularMember,
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberStatus::Member => write!(f, "MEMBER"),
            MemberStatus::RegularMember => write!(f, "REGULAR MEMBER"),
        }
    }
}

/// kind of entry in the unified activity feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    LoanDisbursement,
    LoanPayment,
    SavingsDeposit,
    SavingsWithdrawal,
    Penalty,
    Registration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_acceptance_by_status() {
        assert!(LoanStatus::Approved.accepts_payments());
        assert!(LoanStatus::Active.accepts_payments());
        assert!(!LoanStatus::Pending.accepts_payments());
        assert!(!LoanStatus::Rejected.accepts_payments());
        assert!(!LoanStatus::Completed.accepts_payments());
    }

    #[test]
    fn test_member_status_labels() {
        assert_eq!(MemberStatus::Member.to_string(), "MEMBER");
        assert_eq!(MemberStatus::RegularMember.to_string(), "REGULAR MEMBER");
    }
}

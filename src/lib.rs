pub mod account;
pub mod activity;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod eligibility;
pub mod errors;
pub mod events;
pub mod loan;
pub mod member;
pub mod payment;
pub mod penalty;
pub mod savings;
pub mod types;

// re-export key types
pub use account::{LoanApplication, MemberAccount};
pub use activity::{ActivityEntry, ActivityFeed, ActivitySummary};
pub use config::LendingConfig;
pub use decimal::{Money, Rate};
pub use eligibility::EligibilityPolicy;
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use loan::{amortized_monthly_payment, Loan};
pub use member::{membership_for, Member};
pub use payment::{Payment, PaymentReceipt, RepaymentProcessor};
pub use penalty::{Penalty, PenaltyAssessment, PenaltyEngine};
pub use savings::{SavingEntry, SavingsAccount};
pub use types::{
    EntryKind, LoanId, LoanStatus, LoanType, MemberId, MemberStatus, PaymentId, PaymentMethod,
    PaymentStatus, PenaltyId, PenaltyStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

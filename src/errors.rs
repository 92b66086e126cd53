use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{LoanId, LoanStatus};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid loan terms: {message}")]
    InvalidLoanTerms {
        message: String,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("loan is not pending review: current status is {status:?}")]
    LoanNotPending {
        status: LoanStatus,
    },

    #[error("loan is not approved: current status is {status:?}")]
    LoanNotApproved {
        status: LoanStatus,
    },

    #[error("loan cannot accept payments: current status is {status:?}")]
    LoanNotOpen {
        status: LoanStatus,
    },

    #[error("member not eligible: capital share {capital_share} below required {required}")]
    NotEligible {
        capital_share: Money,
        required: Money,
    },

    #[error("existing loan {loan_id} is only {percent_paid}% paid down, {required}% required")]
    PaydownBelowThreshold {
        loan_id: LoanId,
        percent_paid: Decimal,
        required: Decimal,
    },

    #[error("insufficient savings: available {available}, requested {requested}")]
    InsufficientSavings {
        available: Money,
        requested: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

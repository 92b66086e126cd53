use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LendingConfig;
use crate::decimal::{Money, Rate};
use crate::loan::Loan;
use crate::types::{LoanId, MemberId, PenaltyId, PenaltyStatus};

/// derived overdue charge for one loan at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyAssessment {
    pub loan_id: LoanId,
    pub member_id: MemberId,
    pub days_overdue: i64,
    pub amount: Money,
    /// the due date that was missed
    pub due_date: DateTime<Utc>,
}

/// persisted snapshot of an assessed penalty
///
/// keyed by (loan_id, due_date): at most one record exists per missed
/// period, re-assessment refreshes the amount instead of duplicating it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub id: PenaltyId,
    pub loan_id: LoanId,
    pub member_id: MemberId,
    pub amount: Money,
    pub days_overdue: i64,
    pub penalty_rate: Rate,
    /// the due date that was missed
    pub due_date: DateTime<Utc>,
    pub penalty_date: DateTime<Utc>,
    pub status: PenaltyStatus,
}

impl Penalty {
    /// mark the penalty settled
    pub fn settle(&mut self) {
        self.status = PenaltyStatus::Paid;
    }
}

/// outcome of materializing assessments into the penalty ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterializeOutcome {
    pub created: usize,
    pub refreshed: usize,
}

/// computes overdue penalties for a loan population as of a timestamp
///
/// assessment is a pure function of loan state and the clock, so running
/// it twice with the same inputs yields the same charges
pub struct PenaltyEngine {
    config: LendingConfig,
}

impl PenaltyEngine {
    pub fn new(config: LendingConfig) -> Self {
        Self { config }
    }

    /// assess every open overdue loan, most overdue first
    pub fn assess(&self, loans: &[Loan], as_of: DateTime<Utc>) -> Vec<PenaltyAssessment> {
        let mut assessments: Vec<PenaltyAssessment> = loans
            .iter()
            .filter(|loan| loan.status.accepts_payments() && loan.is_overdue(as_of))
            .filter_map(|loan| {
                loan.due_date.map(|due_date| PenaltyAssessment {
                    loan_id: loan.id,
                    member_id: loan.member_id,
                    days_overdue: loan.days_overdue(as_of),
                    amount: loan.calculate_penalty(as_of, &self.config),
                    due_date,
                })
            })
            .collect();

        assessments.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
        assessments
    }

    /// write assessments into the penalty ledger, deduplicated per missed period
    ///
    /// an unpaid record for the same (loan_id, due_date) is refreshed in
    /// place; otherwise a new record is appended
    pub fn materialize(
        &self,
        assessments: &[PenaltyAssessment],
        ledger: &mut Vec<Penalty>,
        as_of: DateTime<Utc>,
    ) -> MaterializeOutcome {
        let mut outcome = MaterializeOutcome::default();

        for assessment in assessments {
            let existing = ledger.iter_mut().find(|p| {
                p.loan_id == assessment.loan_id && p.due_date == assessment.due_date
            });

            match existing {
                Some(penalty) => {
                    penalty.amount = assessment.amount;
                    penalty.days_overdue = assessment.days_overdue;
                    penalty.penalty_date = as_of;
                    outcome.refreshed += 1;
                }
                None => {
                    ledger.push(Penalty {
                        id: Uuid::new_v4(),
                        loan_id: assessment.loan_id,
                        member_id: assessment.member_id,
                        amount: assessment.amount,
                        days_overdue: assessment.days_overdue,
                        penalty_rate: self.config.penalty_rate,
                        due_date: assessment.due_date,
                        penalty_date: as_of,
                        status: PenaltyStatus::Unpaid,
                    });
                    outcome.created += 1;
                }
            }
        }

        outcome
    }
}

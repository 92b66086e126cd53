use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::MemberAccount;
use crate::decimal::Money;
use crate::types::EntryKind;

/// one row in the unified activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: EntryKind,
    pub reference: String,
    /// always displayed unsigned, the kind carries the direction
    pub amount: Money,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// per-kind counts for the feed header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub total_entries: usize,
    pub disbursements: usize,
    pub payments: usize,
    pub deposits: usize,
    pub withdrawals: usize,
    pub penalties: usize,
}

/// unified member activity feed
///
/// a pure read-model assembled from the aggregate: loan disbursements,
/// repayments, savings movement, penalties, and the registration entry,
/// newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFeed {
    pub entries: Vec<ActivityEntry>,
    pub summary: ActivitySummary,
}

impl ActivityFeed {
    pub fn build(account: &MemberAccount) -> Self {
        let mut entries = Vec::new();

        // loan disbursements, dated at approval
        for loan in &account.loans {
            if let Some(approved_at) = loan.approved_at {
                entries.push(ActivityEntry {
                    kind: EntryKind::LoanDisbursement,
                    reference: loan.id.to_string(),
                    amount: loan.principal_amount,
                    description: format!("Loan Disbursement - {:?} Loan", loan.loan_type),
                    occurred_at: approved_at,
                });
            }
        }

        for payment in &account.payments {
            entries.push(ActivityEntry {
                kind: EntryKind::LoanPayment,
                reference: payment.id.to_string(),
                amount: payment.amount,
                description: format!("Loan Payment - via {:?}", payment.method),
                occurred_at: payment.payment_date,
            });
        }

        for entry in &account.savings.entries {
            let (kind, label) = if entry.is_deposit() {
                (EntryKind::SavingsDeposit, "Deposit")
            } else {
                (EntryKind::SavingsWithdrawal, "Withdrawal")
            };
            entries.push(ActivityEntry {
                kind,
                reference: entry.id.to_string(),
                amount: entry.amount.abs(),
                description: format!("Savings {} - Balance: {}", label, entry.balance),
                occurred_at: entry.created_at,
            });
        }

        for penalty in &account.penalties {
            entries.push(ActivityEntry {
                kind: EntryKind::Penalty,
                reference: penalty.id.to_string(),
                amount: penalty.amount,
                description: format!(
                    "Overdue Penalty - {} days late",
                    penalty.days_overdue
                ),
                occurred_at: penalty.penalty_date,
            });
        }

        entries.push(ActivityEntry {
            kind: EntryKind::Registration,
            reference: account.member.id.to_string(),
            amount: account.member.capital_share,
            description: format!(
                "Account Registration - Capital Share: {}",
                account.member.capital_share
            ),
            occurred_at: account.member.created_at,
        });

        entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

        let summary = ActivitySummary {
            total_entries: entries.len(),
            disbursements: count(&entries, EntryKind::LoanDisbursement),
            payments: count(&entries, EntryKind::LoanPayment),
            deposits: count(&entries, EntryKind::SavingsDeposit),
            withdrawals: count(&entries, EntryKind::SavingsWithdrawal),
            penalties: count(&entries, EntryKind::Penalty),
        };

        Self { entries, summary }
    }
}

fn count(entries: &[ActivityEntry], kind: EntryKind) -> usize {
    entries.iter().filter(|e| e.kind == kind).count()
}

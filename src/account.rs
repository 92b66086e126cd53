use hourglass_rs::SafeTimeProvider;

use crate::config::LendingConfig;
use crate::decimal::Money;
use crate::eligibility::EligibilityPolicy;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::loan::Loan;
use crate::member::Member;
use crate::payment::{Payment, PaymentReceipt, RepaymentProcessor};
use crate::penalty::{Penalty, PenaltyAssessment, PenaltyEngine};
use crate::savings::{SavingEntry, SavingsAccount};
use crate::types::{LoanId, LoanType, PaymentMethod};

/// a new loan application submitted by a member
#[derive(Debug, Clone)]
pub struct LoanApplication {
    pub principal_amount: Money,
    pub duration_months: u32,
    pub loan_type: LoanType,
    pub purpose: String,
}

/// member aggregate
///
/// everything the cooperative tracks for one member: the membership
/// record, loan ledger, repayments, penalty snapshots, and savings.
/// the web layer loads this aggregate, calls one operation, and
/// persists the result in a single unit of work
pub struct MemberAccount {
    pub member: Member,
    pub loans: Vec<Loan>,
    pub payments: Vec<Payment>,
    pub penalties: Vec<Penalty>,
    pub savings: SavingsAccount,
    pub config: LendingConfig,
    pub events: EventStore,
}

impl MemberAccount {
    /// open an account for a registered member
    pub fn new(member: Member, config: LendingConfig) -> Self {
        let savings = SavingsAccount::new(member.id);
        Self {
            member,
            loans: Vec::new(),
            payments: Vec::new(),
            penalties: Vec::new(),
            savings,
            config,
            events: EventStore::new(),
        }
    }

    /// submit a loan application
    ///
    /// runs both eligibility rules, computes the amortized payment, and
    /// files a pending loan for staff review
    pub fn apply_for_loan(
        &mut self,
        application: LoanApplication,
        time_provider: &SafeTimeProvider,
    ) -> Result<LoanId> {
        if application.purpose.trim().is_empty() {
            return Err(LedgerError::InvalidLoanTerms {
                message: "purpose is required".to_string(),
            });
        }

        EligibilityPolicy::new(&self.config).check(&self.member, &self.loans)?;

        let now = time_provider.now();
        let loan = Loan::new(
            self.member.id,
            application.principal_amount,
            self.config.interest_rate,
            application.duration_months,
            application.loan_type,
            application.purpose,
            now,
        )?;

        self.events.emit(Event::LoanApplied {
            loan_id: loan.id,
            member_id: self.member.id,
            principal: loan.principal_amount,
            monthly_payment: loan.monthly_payment,
            timestamp: now,
        });

        let id = loan.id;
        self.loans.push(loan);

        Ok(id)
    }

    /// approve a pending loan
    pub fn approve_loan(&mut self, id: LoanId, time_provider: &SafeTimeProvider) -> Result<()> {
        let now = time_provider.now();
        let loan = self.loan_mut(id)?;
        loan.approve(now)?;

        let due_date = loan.due_date.unwrap_or(now);
        let loan_id = loan.id;
        self.events.emit(Event::LoanApproved {
            loan_id,
            due_date,
            timestamp: now,
        });

        Ok(())
    }

    /// reject a pending loan
    pub fn reject_loan(&mut self, id: LoanId, time_provider: &SafeTimeProvider) -> Result<()> {
        let now = time_provider.now();
        let loan = self.loan_mut(id)?;
        loan.reject()?;

        let loan_id = loan.id;
        self.events.emit(Event::LoanRejected {
            loan_id,
            timestamp: now,
        });

        Ok(())
    }

    /// release approved funds to the member
    pub fn activate_loan(&mut self, id: LoanId, time_provider: &SafeTimeProvider) -> Result<()> {
        let now = time_provider.now();
        let loan = self.loan_mut(id)?;
        loan.activate()?;

        let loan_id = loan.id;
        let disbursed = loan.principal_amount;
        self.events.emit(Event::LoanActivated {
            loan_id,
            disbursed,
            timestamp: now,
        });

        Ok(())
    }

    /// apply a repayment to one of the member's loans
    pub fn make_payment(
        &mut self,
        loan_id: LoanId,
        amount: Money,
        method: PaymentMethod,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentReceipt> {
        let processor = RepaymentProcessor::new(self.config.clone());
        let loan = self
            .loans
            .iter_mut()
            .find(|loan| loan.id == loan_id)
            .ok_or(LedgerError::LoanNotFound { id: loan_id })?;

        let receipt = processor.process(loan, amount, method, time_provider, &mut self.events)?;
        self.payments.push(receipt.payment.clone());

        Ok(receipt)
    }

    /// assess overdue penalties across the member's loans
    ///
    /// snapshots are deduplicated per missed period; re-running for the
    /// same window refreshes amounts instead of inserting duplicates
    pub fn assess_penalties(
        &mut self,
        time_provider: &SafeTimeProvider,
    ) -> Vec<PenaltyAssessment> {
        let now = time_provider.now();
        let engine = PenaltyEngine::new(self.config.clone());

        let assessments = engine.assess(&self.loans, now);
        engine.materialize(&assessments, &mut self.penalties, now);

        for assessment in &assessments {
            let penalty_id = self
                .penalties
                .iter()
                .find(|p| p.loan_id == assessment.loan_id && p.due_date == assessment.due_date)
                .map(|p| p.id);

            if let Some(penalty_id) = penalty_id {
                self.events.emit(Event::PenaltyAssessed {
                    penalty_id,
                    loan_id: assessment.loan_id,
                    amount: assessment.amount,
                    days_overdue: assessment.days_overdue,
                    timestamp: now,
                });
            }
        }

        assessments
    }

    /// deposit into savings
    pub fn deposit_savings(
        &mut self,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<SavingEntry> {
        let now = time_provider.now();
        let entry = self.savings.deposit(amount, &self.config, now)?;

        self.events.emit(Event::SavingsDeposited {
            member_id: self.member.id,
            amount,
            balance: entry.balance,
            timestamp: now,
        });

        Ok(entry)
    }

    /// withdraw from savings
    pub fn withdraw_savings(
        &mut self,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<SavingEntry> {
        let now = time_provider.now();
        let entry = self.savings.withdraw(amount, &self.config, now)?;

        self.events.emit(Event::SavingsWithdrawn {
            member_id: self.member.id,
            amount,
            balance: entry.balance,
            timestamp: now,
        });

        Ok(entry)
    }

    /// replace the member's capital share, recomputing membership tier
    /// and loan eligibility together
    pub fn set_capital_share(&mut self, amount: Money, time_provider: &SafeTimeProvider) {
        let now = time_provider.now();
        self.member.set_capital_share(amount, &self.config, now);

        self.events.emit(Event::MembershipUpdated {
            member_id: self.member.id,
            capital_share: self.member.capital_share,
            member_status: self.member.member_status,
            loan_eligibility: self.member.loan_eligibility,
            timestamp: now,
        });
    }

    /// look up a loan owned by this member
    pub fn loan(&self, id: LoanId) -> Result<&Loan> {
        self.loans
            .iter()
            .find(|loan| loan.id == id)
            .ok_or(LedgerError::LoanNotFound { id })
    }

    fn loan_mut(&mut self, id: LoanId) -> Result<&mut Loan> {
        self.loans
            .iter_mut()
            .find(|loan| loan.id == id)
            .ok_or(LedgerError::LoanNotFound { id })
    }

    /// drain events collected since the last call
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// serialized view of the aggregate state
    pub fn json(&self) -> String {
        serde_json::json!({
            "member": self.member,
            "loans": self.loans,
            "payments": self.payments,
            "penalties": self.penalties,
            "savings": self.savings,
        })
        .to_string()
    }
}

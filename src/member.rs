use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LendingConfig;
use crate::decimal::Money;
use crate::types::{MemberId, MemberStatus};

/// cooperative member
///
/// `member_status` and `loan_eligibility` are derived from `capital_share`
/// and are always recomputed together whenever the share changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_number: String,
    pub capital_share: Money,
    pub member_status: MemberStatus,
    pub loan_eligibility: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// membership tier and eligibility as a pure function of capital share
pub fn membership_for(capital_share: Money, threshold: Money) -> (MemberStatus, bool) {
    if capital_share >= threshold {
        (MemberStatus::RegularMember, true)
    } else {
        (MemberStatus::Member, false)
    }
}

impl Member {
    /// register a new member
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        contact_number: impl Into<String>,
        capital_share: Money,
        config: &LendingConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let (member_status, loan_eligibility) =
            membership_for(capital_share, config.capital_share_threshold);

        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            contact_number: contact_number.into(),
            capital_share,
            member_status,
            loan_eligibility,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// replace the capital share and recompute both derived fields
    pub fn set_capital_share(&mut self, amount: Money, config: &LendingConfig, now: DateTime<Utc>) {
        self.capital_share = amount;
        let (status, eligible) = membership_for(amount, config.capital_share_threshold);
        self.member_status = status;
        self.loan_eligibility = eligible;
        self.updated_at = now;
    }

    /// add to the capital share and recompute both derived fields
    pub fn add_capital_share(&mut self, amount: Money, config: &LendingConfig, now: DateTime<Utc>) {
        self.set_capital_share(self.capital_share + amount, config, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_with_share(share: i64) -> (Member, LendingConfig) {
        let config = LendingConfig::standard();
        let member = Member::new(
            "Maria",
            "Santos",
            "maria@example.com",
            "09170000001",
            Money::from_major(share),
            &config,
            Utc::now(),
        );
        (member, config)
    }

    #[test]
    fn test_eligibility_threshold_boundary() {
        let (below, _) = member_with_share(19_999);
        assert!(!below.loan_eligibility);
        assert_eq!(below.member_status, MemberStatus::Member);

        let (at, _) = member_with_share(20_000);
        assert!(at.loan_eligibility);
        assert_eq!(at.member_status, MemberStatus::RegularMember);
    }

    #[test]
    fn test_derived_fields_recompute_together() {
        let (mut member, config) = member_with_share(5_000);
        assert!(!member.loan_eligibility);

        member.add_capital_share(Money::from_major(15_000), &config, Utc::now());
        assert_eq!(member.capital_share, Money::from_major(20_000));
        assert!(member.loan_eligibility);
        assert_eq!(member.member_status, MemberStatus::RegularMember);

        member.set_capital_share(Money::from_major(10_000), &config, Utc::now());
        assert!(!member.loan_eligibility);
        assert_eq!(member.member_status, MemberStatus::Member);
    }

    #[test]
    fn test_full_name() {
        let (member, _) = member_with_share(1_000);
        assert_eq!(member.full_name(), "Maria Santos");
    }
}

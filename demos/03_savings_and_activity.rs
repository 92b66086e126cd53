/// savings and activity - deposits, withdrawals, and the unified feed
use chrono::{Duration, TimeZone, Utc};
use coop_lending_rs::{
    ActivityFeed, LendingConfig, LoanApplication, LoanType, Member, MemberAccount, Money,
    PaymentMethod, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== savings and activity example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().ok_or("test control unavailable")?;
    let config = LendingConfig::standard();

    let member = Member::new(
        "Liza",
        "Mendoza",
        "liza@example.com",
        "09175550002",
        Money::from_major(22_000),
        &config,
        time.now(),
    );
    let mut account = MemberAccount::new(member, config);

    // savings activity across a few days
    account.deposit_savings(Money::from_major(5_000), &time)?;
    controller.advance(Duration::days(2));
    account.deposit_savings(Money::from_major(2_500), &time)?;
    controller.advance(Duration::days(3));
    account.withdraw_savings(Money::from_major(1_000), &time)?;
    println!("savings balance: {}", account.savings.total_balance());

    // an overdrawn withdrawal is refused
    if let Err(err) = account.withdraw_savings(Money::from_major(100_000), &time) {
        println!("withdrawal refused: {}", err);
    }

    // a small loan with one repayment
    let loan_id = account.apply_for_loan(
        LoanApplication {
            principal_amount: Money::from_major(20_000),
            duration_months: 6,
            loan_type: LoanType::Emergency,
            purpose: "hospital bill".to_string(),
        },
        &time,
    )?;
    account.approve_loan(loan_id, &time)?;
    controller.advance(Duration::days(7));
    account.make_payment(loan_id, Money::from_major(3_500), PaymentMethod::Gcash, &time)?;

    // the unified feed, newest first
    let feed = ActivityFeed::build(&account);
    println!("\nactivity ({} entries):", feed.summary.total_entries);
    for entry in &feed.entries {
        println!(
            "  {} | {:>10} | {}",
            entry.occurred_at.format("%Y-%m-%d"),
            entry.amount.to_string(),
            entry.description
        );
    }

    println!(
        "\nsummary: {} payments, {} deposits, {} withdrawals",
        feed.summary.payments, feed.summary.deposits, feed.summary.withdrawals
    );

    Ok(())
}

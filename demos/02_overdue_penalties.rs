/// overdue penalties - time control, penalty periods, and deduplication
use chrono::{Duration, TimeZone, Utc};
use coop_lending_rs::{
    LendingConfig, LoanApplication, LoanType, Member, MemberAccount, Money, SafeTimeProvider,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== overdue penalties example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().ok_or("test control unavailable")?;
    let config = LendingConfig::standard();

    let member = Member::new(
        "Althia",
        "Cruz",
        "althia@example.com",
        "09175550001",
        Money::from_major(40_000),
        &config,
        time.now(),
    );
    let mut account = MemberAccount::new(member, config);

    let loan_id = account.apply_for_loan(
        LoanApplication {
            principal_amount: Money::from_major(50_000),
            duration_months: 3,
            loan_type: LoanType::Business,
            purpose: "carinderia expansion".to_string(),
        },
        &time,
    )?;
    account.approve_loan(loan_id, &time)?;

    let due_date = account
        .loan(loan_id)?
        .due_date
        .ok_or("approved loan has no due date")?;
    println!("loan approved, due {}", due_date.format("%Y-%m-%d"));

    // advance to 35 days past due: two penalty periods
    controller.advance(due_date - time.now() + Duration::days(35));
    println!("\nclock now {} (35 days past due)", time.now().format("%Y-%m-%d"));

    let assessments = account.assess_penalties(&time);
    for a in &assessments {
        println!(
            "penalty assessed: {} days overdue, amount {}",
            a.days_overdue, a.amount
        );
    }

    // advance another 30 days: the same missed period is refreshed,
    // never duplicated
    controller.advance(Duration::days(30));
    println!("\nclock now {} (65 days past due)", time.now().format("%Y-%m-%d"));

    account.assess_penalties(&time);
    println!("penalty records on file: {}", account.penalties.len());
    for p in &account.penalties {
        println!(
            "  {} days overdue, amount {}, status {:?}",
            p.days_overdue, p.amount, p.status
        );
    }

    Ok(())
}

/// loan lifecycle - application through approval, repayment, and completion
use chrono::{TimeZone, Utc};
use coop_lending_rs::{
    LendingConfig, LoanApplication, LoanType, Member, MemberAccount, Money, PaymentMethod,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== loan lifecycle example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
    ));
    let config = LendingConfig::standard();

    let member = Member::new(
        "Jose",
        "Reyes",
        "jose@example.com",
        "09179876543",
        Money::from_major(30_000),
        &config,
        time.now(),
    );
    println!(
        "member registered: {} ({}, eligible: {})",
        member.full_name(),
        member.member_status,
        member.loan_eligibility
    );

    let mut account = MemberAccount::new(member, config);

    // apply for a 60,000 education loan over 6 months
    let loan_id = account.apply_for_loan(
        LoanApplication {
            principal_amount: Money::from_major(60_000),
            duration_months: 6,
            loan_type: LoanType::Education,
            purpose: "tuition for second semester".to_string(),
        },
        &time,
    )?;

    let loan = account.loan(loan_id)?;
    println!(
        "\napplication filed: {} over {} months, monthly payment {}",
        loan.principal_amount, loan.duration_months, loan.monthly_payment
    );

    // staff approves: due date lands one term ahead
    account.approve_loan(loan_id, &time)?;
    let loan = account.loan(loan_id)?;
    println!(
        "approved on {}, due {}",
        time.now().format("%Y-%m-%d"),
        loan.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
    );

    // five partial payments, each pushing the due date out a cycle
    for n in 1..=5 {
        let receipt = account.make_payment(
            loan_id,
            Money::from_major(10_000),
            PaymentMethod::Manual,
            &time,
        )?;
        println!(
            "payment {} applied, remaining balance {}",
            n, receipt.remaining_balance
        );
    }

    // the final payment completes the loan
    let receipt = account.make_payment(
        loan_id,
        Money::from_major(10_000),
        PaymentMethod::Manual,
        &time,
    )?;
    println!(
        "\nfinal payment applied, completed: {}",
        receipt.loan_completed
    );

    for event in account.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}

/// quick start - minimal example to get started
use coop_lending_rs::{
    LendingConfig, LoanApplication, LoanType, Member, MemberAccount, Money, PaymentMethod,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);
    let config = LendingConfig::standard();

    // register an eligible member with a 25,000 capital share
    let member = Member::new(
        "Maria",
        "Santos",
        "maria@example.com",
        "09171234567",
        Money::from_major(25_000),
        &config,
        time.now(),
    );
    let mut account = MemberAccount::new(member, config);

    // apply for a 50,000 loan over 12 months
    let loan_id = account.apply_for_loan(
        LoanApplication {
            principal_amount: Money::from_major(50_000),
            duration_months: 12,
            loan_type: LoanType::Personal,
            purpose: "sari-sari store stock".to_string(),
        },
        &time,
    )?;

    // staff approves, member starts paying
    account.approve_loan(loan_id, &time)?;
    account.make_payment(loan_id, Money::from_major(5_000), PaymentMethod::Gcash, &time)?;

    // print current state
    println!("{}", account.json());

    Ok(())
}

/// quick start - minimal example to get started
use loan_ledger_rs::chrono::NaiveDate;
use loan_ledger_rs::{
    LoanLedger, LoanBuilder, Money, PaymentKind, Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);
    let mut ledger = LoanLedger::new();

    // lend 10,000 at 8% flat over 12 months
    let id = ledger.add_loan(
        LoanBuilder::new()
            .borrower_name("Ravi Kumar")
            .borrower_email("ravi@example.com")
            .principal(Money::from_major(10_000))
            .rate(Rate::from_percentage(dec!(8)))
            .duration_months(12)
            .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .due_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .gateway(loan_ledger_rs::PaymentGateway::Upi),
        &time,
    )?;

    // record a payment
    ledger.record_payment(
        id,
        Money::from_major(500),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        PaymentKind::Partial,
        &time,
    )?;

    // print current state
    let loan = ledger.loan(id).expect("just inserted");
    println!("total payable: {}", loan.total_payable());
    println!("outstanding:   {}", loan.outstanding());

    Ok(())
}

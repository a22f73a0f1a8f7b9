/// time control - watch a loan drift overdue as the clock advances
use loan_ledger_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_ledger_rs::{
    classify, LoanBuilder, LoanLedger, Money, PaymentGateway, Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    ));
    let control = time.test_control().expect("test source");

    let mut ledger = LoanLedger::new();
    let id = ledger.add_loan(
        LoanBuilder::new()
            .borrower_name("Meera Joshi")
            .borrower_email("meera@example.com")
            .principal(Money::from_major(5_000))
            .rate(Rate::from_percentage(dec!(10)))
            .duration_months(1)
            .start_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .due_date(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
            .gateway(PaymentGateway::BankTransfer),
        &time,
    )?;

    let loan = ledger.loan(id).expect("just inserted");
    println!("on {}: {:?}", time.now().date_naive(), classify(loan, time.now().date_naive()));

    // jump past the due date
    control.advance(Duration::days(15));
    let loan = ledger.loan(id).expect("just inserted");
    println!("on {}: {:?}", time.now().date_naive(), classify(loan, time.now().date_naive()));

    // reminder picks up the overdue balance
    let reminder = ledger.send_reminder(id, &time)?;
    println!(
        "remind {}: {} outstanding, due {} ({} days)",
        reminder.borrower_email, reminder.outstanding, reminder.due_date, reminder.days_until_due
    );

    Ok(())
}

/// dashboard view - seed the sample portfolio and query it
use loan_ledger_rs::chrono::{TimeZone, Utc};
use loan_ledger_rs::{
    sample, LoanLedger, LoanQuery, LoanStatus, SafeTimeProvider, SortField, SortOrder, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // pin the clock so the sample portfolio classifies the same every run
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 10, 15, 9, 0, 0).unwrap(),
    ));

    let ledger = LoanLedger::with_loans(sample::sample_loans()?);

    let stats = ledger.dashboard_stats(&time);
    println!("dashboard: {}", serde_json::to_string_pretty(&stats)?);

    let counts = ledger.status_counts(&time);
    println!(
        "tabs: all {} / active {} / completed {} / overdue {}",
        counts.all, counts.active, counts.completed, counts.overdue
    );

    // overdue loans, largest first
    let overdue = ledger.query(
        &LoanQuery {
            search: None,
            status: Some(LoanStatus::Overdue),
            sort: SortField::Amount,
            order: SortOrder::Descending,
        },
        &time,
    );
    for loan in overdue {
        println!(
            "overdue: {} <{}> owes {}",
            loan.borrower.name,
            loan.borrower.email,
            loan.outstanding()
        );
    }

    // search by borrower
    let hits = ledger.query(
        &LoanQuery {
            search: Some("grace".to_string()),
            ..LoanQuery::default()
        },
        &time,
    );
    println!("search 'grace': {} hit(s)", hits.len());

    Ok(())
}

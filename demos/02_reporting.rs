/// reporting - windowed aggregation and the export document
use loan_ledger_rs::chrono::{TimeZone, Utc};
use loan_ledger_rs::{
    export, sample, LoanLedger, ReportPeriod, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 10, 15, 9, 0, 0).unwrap(),
    ));

    let ledger = LoanLedger::with_loans(sample::sample_loans()?);

    // all-time report
    let doc = ledger.generate_report(ReportPeriod::All, &time);
    println!("{}", doc.to_json_pretty());

    // quarter window keeps only recent starts
    let quarter = ledger.generate_report(ReportPeriod::Quarter, &time);
    println!(
        "last quarter: {} loan(s), lent {}, collection rate {}%",
        quarter.summary.loan_count, quarter.summary.total_lent, quarter.summary.collection_rate
    );

    println!(
        "write to: {}",
        export::suggested_filename(ReportPeriod::All, time.now().date_naive())
    );

    Ok(())
}

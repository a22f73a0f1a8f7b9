//! report export document
//!
//! builds the serializable record handed to the export workflow; writing
//! it to durable storage is the caller's job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::Loan;
use crate::report::PortfolioStats;
use crate::status;
use crate::types::{LoanId, LoanStatus, ReportPeriod};

/// reduced per-loan row carried in the export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRow {
    pub id: LoanId,
    pub borrower_name: String,
    pub amount: Money,
    pub paid_amount: Money,
    pub status: LoanStatus,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// the full export record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub period: ReportPeriod,
    pub generated_at: DateTime<Utc>,
    pub summary: PortfolioStats,
    pub loans: Vec<LoanRow>,
}

impl ReportDocument {
    /// json representation of the document
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

/// build the export document from an aggregation pass
///
/// loan rows are classified against the generation timestamp's date so
/// the document is internally consistent with its summary
pub fn export_report(
    summary: PortfolioStats,
    loans: &[&Loan],
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let today = generated_at.date_naive();
    let rows = loans
        .iter()
        .map(|loan| LoanRow {
            id: loan.id,
            borrower_name: loan.borrower.name.clone(),
            amount: loan.terms.principal,
            paid_amount: loan.paid_amount(),
            status: status::classify(loan, today),
            start_date: loan.terms.start_date,
            due_date: loan.terms.due_date,
        })
        .collect();

    ReportDocument {
        period: summary.period,
        generated_at,
        summary,
        loans: rows,
    }
}

/// suggested filename for the exported document
pub fn suggested_filename(period: ReportPeriod, generated_on: NaiveDate) -> String {
    format!(
        "loan-report-{}-{}.json",
        period.as_str(),
        generated_on.format("%Y-%m-%d")
    )
}

//! derived status classifier
//!
//! status is recomputed on every read against an injected date rather
//! than cached on the loan. two reads at different times may disagree
//! with no data change.

use chrono::NaiveDate;

use crate::loan::Loan;
use crate::types::LoanStatus;

/// classify a loan against a reference date
///
/// first match wins: completion dominates overdue, so a fully paid loan
/// past its due date is completed, not overdue
pub fn classify(loan: &Loan, today: NaiveDate) -> LoanStatus {
    if loan.is_fully_paid() {
        LoanStatus::Completed
    } else if loan.terms.due_date < today {
        LoanStatus::Overdue
    } else {
        LoanStatus::Active
    }
}

/// signed days until the due date, negative once past due
pub fn days_until_due(loan: &Loan, today: NaiveDate) -> i64 {
    (loan.terms.due_date - today).num_days()
}

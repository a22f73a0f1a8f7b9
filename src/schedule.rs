//! monthly payment schedule reconciliation
//!
//! a display view only: expands a loan into one entry per month of its
//! duration and marks each entry settled when a recorded payment falls
//! in the same calendar month. never feeds arithmetic.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::Loan;

/// reconciliation state of a single schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    /// a payment was recorded in the entry's calendar month
    Settled,
    /// no matching payment yet, entry date not passed
    Pending,
    /// no matching payment and the entry date has passed
    Late,
}

/// one row of the expanded schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub state: EntryState,
}

/// expand a loan into its monthly schedule, reconciled against the
/// loan's payment history and the given reference date
///
/// entry n falls due n months after the start date
pub fn payment_schedule(loan: &Loan, today: NaiveDate) -> Vec<ScheduleEntry> {
    let installment = loan.installment();

    (1..=loan.terms.duration_months)
        .map(|number| {
            let due_date = add_months(loan.terms.start_date, number);
            let settled = loan
                .payments()
                .iter()
                .any(|p| p.date.year() == due_date.year() && p.date.month() == due_date.month());

            let state = if settled {
                EntryState::Settled
            } else if due_date < today {
                EntryState::Late
            } else {
                EntryState::Pending
            };

            ScheduleEntry {
                number,
                due_date,
                amount: installment,
                state,
            }
        })
        .collect()
}

/// add calendar months, clamping to the last day of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    // checked_add_months only fails past NaiveDate::MAX, out of range here
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

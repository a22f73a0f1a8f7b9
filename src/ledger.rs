use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::export::{self, ReportDocument};
use crate::loan::{Loan, LoanBuilder};
use crate::report;
use crate::status;
use crate::types::{LoanId, LoanStatus, PaymentKind, ReportPeriod, SortField, SortOrder};

/// headline figures for the dashboard view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub active_loans: usize,
    pub total_lent: Money,
    pub total_received: Money,
    pub pending_amount: Money,
}

/// per-status loan counts for the list view filter tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// search, filter, and sort spec for the loan list view
#[derive(Debug, Clone)]
pub struct LoanQuery {
    /// case-insensitive substring match on borrower name or email
    pub search: Option<String>,
    pub status: Option<LoanStatus>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl Default for LoanQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            sort: SortField::StartDate,
            order: SortOrder::Descending,
        }
    }
}

/// reminder notice for a borrower with a balance outstanding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub loan_id: LoanId,
    pub borrower_name: String,
    pub borrower_email: String,
    pub outstanding: Money,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
}

/// owned loan collection and the single mutation surface
///
/// derivations borrow the list; mutations require exclusive access, so
/// payment recording is serialized by construction
pub struct LoanLedger {
    loans: Vec<Loan>,
    pub events: EventStore,
}

impl Default for LoanLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanLedger {
    /// create an empty ledger
    pub fn new() -> Self {
        Self {
            loans: Vec::new(),
            events: EventStore::new(),
        }
    }

    /// create a ledger over an existing loan collection
    pub fn with_loans(loans: Vec<Loan>) -> Self {
        Self {
            loans,
            events: EventStore::new(),
        }
    }

    /// all loans in insertion order
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// look up a loan by id
    pub fn loan(&self, id: LoanId) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    /// validate and insert a new loan
    pub fn add_loan(&mut self, builder: LoanBuilder, time: &SafeTimeProvider) -> Result<LoanId> {
        let loan = builder.build()?;
        let id = loan.id;

        self.events.emit(Event::LoanCreated {
            loan_id: id,
            borrower_email: loan.borrower.email.clone(),
            principal: loan.terms.principal,
            total_payable: loan.total_payable(),
            timestamp: time.now(),
        });

        self.loans.push(loan);
        Ok(id)
    }

    /// record a payment against an existing loan
    pub fn record_payment(
        &mut self,
        id: LoanId,
        amount: Money,
        date: NaiveDate,
        kind: PaymentKind,
        time: &SafeTimeProvider,
    ) -> Result<()> {
        let loan = self
            .loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(LedgerError::LoanNotFound { id })?;

        let was_fully_paid = loan.is_fully_paid();
        loan.record_payment(amount, date, kind)?;

        let now = time.now();
        self.events.emit(Event::PaymentRecorded {
            loan_id: id,
            amount,
            date,
            kind,
            new_paid_amount: loan.paid_amount(),
            timestamp: now,
        });

        if !was_fully_paid && loan.is_fully_paid() {
            self.events.emit(Event::LoanCompleted {
                loan_id: id,
                total_paid: loan.paid_amount(),
                timestamp: now,
            });
        }

        Ok(())
    }

    /// build a reminder notice for a loan and log that it was sent
    pub fn send_reminder(&mut self, id: LoanId, time: &SafeTimeProvider) -> Result<Reminder> {
        let loan = self
            .loans
            .iter()
            .find(|l| l.id == id)
            .ok_or(LedgerError::LoanNotFound { id })?;

        let today = time.now().date_naive();
        let reminder = Reminder {
            loan_id: id,
            borrower_name: loan.borrower.name.clone(),
            borrower_email: loan.borrower.email.clone(),
            outstanding: loan.outstanding(),
            due_date: loan.terms.due_date,
            days_until_due: status::days_until_due(loan, today),
        };

        self.events.emit(Event::ReminderSent {
            loan_id: id,
            borrower_email: reminder.borrower_email.clone(),
            outstanding: reminder.outstanding,
            due_date: reminder.due_date,
            timestamp: time.now(),
        });

        Ok(reminder)
    }

    /// headline dashboard figures
    pub fn dashboard_stats(&self, time: &SafeTimeProvider) -> DashboardStats {
        let today = time.now().date_naive();

        DashboardStats {
            active_loans: self
                .loans
                .iter()
                .filter(|l| status::classify(l, today) == LoanStatus::Active)
                .count(),
            total_lent: self.loans.iter().map(|l| l.terms.principal).sum(),
            total_received: self.loans.iter().map(|l| l.paid_amount()).sum(),
            pending_amount: self.loans.iter().map(|l| l.outstanding()).sum(),
        }
    }

    /// per-status counts for the filter tabs
    pub fn status_counts(&self, time: &SafeTimeProvider) -> StatusCounts {
        let today = time.now().date_naive();
        let mut counts = StatusCounts {
            all: self.loans.len(),
            ..StatusCounts::default()
        };

        for loan in &self.loans {
            match status::classify(loan, today) {
                LoanStatus::Active => counts.active += 1,
                LoanStatus::Completed => counts.completed += 1,
                LoanStatus::Overdue => counts.overdue += 1,
            }
        }

        counts
    }

    /// filtered and sorted view of the loan list
    pub fn query(&self, query: &LoanQuery, time: &SafeTimeProvider) -> Vec<&Loan> {
        let today = time.now().date_naive();
        let needle = query.search.as_ref().map(|s| s.to_lowercase());

        let mut matches: Vec<&Loan> = self
            .loans
            .iter()
            .filter(|loan| {
                let text_match = match &needle {
                    Some(needle) => {
                        loan.borrower.name.to_lowercase().contains(needle)
                            || loan.borrower.email.to_lowercase().contains(needle)
                    }
                    None => true,
                };
                let status_match = match query.status {
                    Some(status) => status::classify(loan, today) == status,
                    None => true,
                };
                text_match && status_match
            })
            .collect();

        matches.sort_by(|a, b| {
            let ordering = match query.sort {
                SortField::StartDate => a.terms.start_date.cmp(&b.terms.start_date),
                SortField::Amount => a.terms.principal.cmp(&b.terms.principal),
                SortField::BorrowerName => a
                    .borrower
                    .name
                    .to_lowercase()
                    .cmp(&b.borrower.name.to_lowercase()),
                SortField::Status => {
                    status::classify(a, today).cmp(&status::classify(b, today))
                }
                SortField::DueDate => a.terms.due_date.cmp(&b.terms.due_date),
            };
            match query.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        matches
    }

    /// aggregate the portfolio and build the export document in one pass
    pub fn generate_report(&self, period: ReportPeriod, time: &SafeTimeProvider) -> ReportDocument {
        let now = time.now();
        let today = now.date_naive();

        let summary = report::aggregate(&self.loans, today, period);
        let window = report::filter_by_period(&self.loans, period, today);
        export::export_report(summary, &window, now)
    }

    /// drain events collected since the last call
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::PaymentGateway;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn builder(name: &str, email: &str, principal: i64, start: NaiveDate, due: NaiveDate) -> LoanBuilder {
        Loan::builder()
            .borrower_name(name)
            .borrower_email(email)
            .principal(Money::from_major(principal))
            .rate(Rate::from_percentage(dec!(5)))
            .duration_months(12)
            .start_date(start)
            .due_date(due)
            .gateway(PaymentGateway::Upi)
    }

    #[test]
    fn test_add_loan_and_lookup() {
        let time = test_time();
        let mut ledger = LoanLedger::new();

        let id = ledger
            .add_loan(
                builder("Priya", "priya@example.com", 50_000, date(2024, 5, 1), date(2025, 5, 1)),
                &time,
            )
            .unwrap();

        let loan = ledger.loan(id).unwrap();
        assert_eq!(loan.terms.principal, Money::from_major(50_000));
        assert_eq!(loan.paid_amount(), Money::ZERO);

        let events = ledger.take_events();
        assert!(matches!(events[0], Event::LoanCreated { .. }));
    }

    #[test]
    fn test_record_payment_unknown_loan() {
        let time = test_time();
        let mut ledger = LoanLedger::new();

        let err = ledger
            .record_payment(
                uuid::Uuid::new_v4(),
                Money::from_major(100),
                date(2024, 6, 1),
                PaymentKind::Partial,
                &time,
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::LoanNotFound { .. }));
    }

    #[test]
    fn test_completion_event_emitted_once() {
        let time = test_time();
        let mut ledger = LoanLedger::new();
        let id = ledger
            .add_loan(
                builder("Priya", "priya@example.com", 10_000, date(2024, 5, 1), date(2025, 5, 1)),
                &time,
            )
            .unwrap();
        ledger.take_events();

        // total payable is 10500
        ledger
            .record_payment(id, Money::from_major(10_000), date(2024, 6, 1), PaymentKind::Partial, &time)
            .unwrap();
        ledger
            .record_payment(id, Money::from_major(500), date(2024, 6, 2), PaymentKind::Full, &time)
            .unwrap();
        ledger
            .record_payment(id, Money::from_major(100), date(2024, 6, 3), PaymentKind::Partial, &time)
            .unwrap();

        let completions = ledger
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, Event::LoanCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_dashboard_stats() {
        let time = test_time();
        let mut ledger = LoanLedger::new();

        let active = ledger
            .add_loan(
                builder("Priya", "priya@example.com", 50_000, date(2024, 5, 1), date(2025, 5, 1)),
                &time,
            )
            .unwrap();
        ledger
            .add_loan(
                builder("Vikram", "vikram@example.com", 20_000, date(2024, 1, 1), date(2024, 5, 1)),
                &time,
            )
            .unwrap();
        ledger
            .record_payment(active, Money::from_major(15_000), date(2024, 5, 20), PaymentKind::Partial, &time)
            .unwrap();

        let stats = ledger.dashboard_stats(&time);
        assert_eq!(stats.active_loans, 1);
        assert_eq!(stats.total_lent, Money::from_major(70_000));
        assert_eq!(stats.total_received, Money::from_major(15_000));
        // (52500 - 15000) + 21000
        assert_eq!(stats.pending_amount, Money::from_major(58_500));

        let counts = ledger.status_counts(&time);
        assert_eq!(counts.all, 2);
        assert_eq!(counts.active, 1);
        assert_eq!(counts.overdue, 1);
        assert_eq!(counts.completed, 0);
    }

    #[test]
    fn test_query_search_and_filter() {
        let time = test_time();
        let mut ledger = LoanLedger::new();
        ledger
            .add_loan(
                builder("Priya Sharma", "priya@example.com", 50_000, date(2024, 5, 1), date(2025, 5, 1)),
                &time,
            )
            .unwrap();
        ledger
            .add_loan(
                builder("Vikram Singh", "vikram@example.com", 20_000, date(2024, 1, 1), date(2024, 5, 1)),
                &time,
            )
            .unwrap();

        let by_name = ledger.query(
            &LoanQuery {
                search: Some("PRIYA".to_string()),
                ..LoanQuery::default()
            },
            &time,
        );
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].borrower.name, "Priya Sharma");

        let by_email = ledger.query(
            &LoanQuery {
                search: Some("vikram@".to_string()),
                ..LoanQuery::default()
            },
            &time,
        );
        assert_eq!(by_email.len(), 1);

        let overdue_only = ledger.query(
            &LoanQuery {
                status: Some(LoanStatus::Overdue),
                ..LoanQuery::default()
            },
            &time,
        );
        assert_eq!(overdue_only.len(), 1);
        assert_eq!(overdue_only[0].borrower.name, "Vikram Singh");
    }

    #[test]
    fn test_query_sort_orders() {
        let time = test_time();
        let mut ledger = LoanLedger::new();
        ledger
            .add_loan(
                builder("Charu", "charu@example.com", 10_000, date(2024, 3, 1), date(2025, 3, 1)),
                &time,
            )
            .unwrap();
        ledger
            .add_loan(
                builder("Anand", "anand@example.com", 30_000, date(2024, 1, 1), date(2025, 1, 1)),
                &time,
            )
            .unwrap();
        ledger
            .add_loan(
                builder("Bina", "bina@example.com", 20_000, date(2024, 2, 1), date(2025, 2, 1)),
                &time,
            )
            .unwrap();

        let newest_first = ledger.query(&LoanQuery::default(), &time);
        assert_eq!(newest_first[0].borrower.name, "Charu");
        assert_eq!(newest_first[2].borrower.name, "Anand");

        let by_amount = ledger.query(
            &LoanQuery {
                sort: SortField::Amount,
                order: SortOrder::Ascending,
                ..LoanQuery::default()
            },
            &time,
        );
        assert_eq!(by_amount[0].terms.principal, Money::from_major(10_000));
        assert_eq!(by_amount[2].terms.principal, Money::from_major(30_000));

        let by_name = ledger.query(
            &LoanQuery {
                sort: SortField::BorrowerName,
                order: SortOrder::Ascending,
                ..LoanQuery::default()
            },
            &time,
        );
        assert_eq!(by_name[0].borrower.name, "Anand");
        assert_eq!(by_name[2].borrower.name, "Charu");
    }

    #[test]
    fn test_send_reminder() {
        let time = test_time();
        let mut ledger = LoanLedger::new();
        let id = ledger
            .add_loan(
                builder("Priya", "priya@example.com", 50_000, date(2024, 5, 1), date(2024, 6, 11)),
                &time,
            )
            .unwrap();

        let reminder = ledger.send_reminder(id, &time).unwrap();
        assert_eq!(reminder.borrower_email, "priya@example.com");
        assert_eq!(reminder.outstanding, Money::from_major(52_500));
        assert_eq!(reminder.days_until_due, 10);

        let events = ledger.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ReminderSent { .. })));
    }

    #[test]
    fn test_generate_report_document() {
        let time = test_time();
        let mut ledger = LoanLedger::new();
        ledger
            .add_loan(
                builder("Priya", "priya@example.com", 50_000, date(2024, 5, 1), date(2025, 5, 1)),
                &time,
            )
            .unwrap();

        let doc = ledger.generate_report(ReportPeriod::All, &time);
        assert_eq!(doc.summary.loan_count, 1);
        assert_eq!(doc.loans.len(), 1);
        assert_eq!(doc.generated_at, time.now());
    }
}

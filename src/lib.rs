pub mod decimal;
pub mod economics;
pub mod errors;
pub mod events;
pub mod export;
pub mod ledger;
pub mod loan;
pub mod report;
pub mod sample;
pub mod schedule;
pub mod status;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use economics::{compute_terms, flat_interest, outstanding, prorated_interest, LoanQuote};
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use export::{export_report, suggested_filename, LoanRow, ReportDocument};
pub use ledger::{DashboardStats, LoanLedger, LoanQuery, Reminder, StatusCounts};
pub use loan::{Borrower, Loan, LoanBuilder, LoanTerms, Payment};
pub use report::{
    aggregate, BorrowerSummary, MonthlyTrendPoint, PortfolioStats, StatusBreakdown,
};
pub use schedule::{payment_schedule, EntryState, ScheduleEntry};
pub use status::{classify, days_until_due};
pub use types::{
    LoanId, LoanStatus, PaymentGateway, PaymentKind, ReportPeriod, SortField, SortOrder,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

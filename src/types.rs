use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// derived loan lifecycle state
///
/// never stored on the loan; recomputed from paid amount and due date on
/// every read. variant order matches the label sort order used by the
/// list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// repayment in progress, due date not yet passed
    Active,
    /// paid amount covers the total payable
    Completed,
    /// due date passed with a balance outstanding
    Overdue,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Completed => "completed",
            LoanStatus::Overdue => "overdue",
        }
    }
}

/// payment channel tag attached to a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    GooglePay,
    PhonePe,
    Paytm,
    Upi,
    BankTransfer,
}

impl PaymentGateway {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentGateway::GooglePay => "googlepay",
            PaymentGateway::PhonePe => "phonepe",
            PaymentGateway::Paytm => "paytm",
            PaymentGateway::Upi => "upi",
            PaymentGateway::BankTransfer => "banktransfer",
        }
    }
}

/// informational tag on a payment record, never used in arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Partial,
    Full,
}

/// trailing calendar window for report filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Month,
    Quarter,
    Year,
    All,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Month => "month",
            ReportPeriod::Quarter => "quarter",
            ReportPeriod::Year => "year",
            ReportPeriod::All => "all",
        }
    }
}

/// sort key for the loan list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    StartDate,
    Amount,
    BorrowerName,
    Status,
    DueDate,
}

/// sort direction for the loan list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

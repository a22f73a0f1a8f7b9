use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::LoanId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("borrower name is required")]
    MissingBorrowerName,

    #[error("invalid borrower email: {email}")]
    InvalidBorrowerEmail {
        email: String,
    },

    #[error("invalid principal amount: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid duration: {months} months")]
    InvalidDuration {
        months: u32,
    },

    #[error("due date {due_date} is before start date {start_date}")]
    DueDateBeforeStart {
        start_date: chrono::NaiveDate,
        due_date: chrono::NaiveDate,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("missing field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

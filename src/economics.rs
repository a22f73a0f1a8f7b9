//! pure loan arithmetic over (principal, rate, duration)
//!
//! interest is flat: charged once on the original principal, independent
//! of elapsed time. the prorated variant weights by months at an annual
//! rate and exists as a separately named operation for callers that want
//! an annualized figure; nothing in this crate uses it internally.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// the three derived figures quoted for a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub interest: Money,
    pub total_payable: Money,
    pub installment: Money,
}

/// flat interest: principal * rate / 100
pub fn flat_interest(principal: Money, rate: Rate) -> Money {
    principal.percentage(rate.as_percentage())
}

/// time-weighted interest: principal * rate * months / 1200
pub fn prorated_interest(principal: Money, rate: Rate, duration_months: u32) -> Money {
    let months = Decimal::from(duration_months);
    principal.percentage(rate.as_percentage()) * (months / Decimal::from(12))
}

/// principal plus flat interest
pub fn total_payable(principal: Money, rate: Rate) -> Money {
    principal + flat_interest(principal, rate)
}

/// quote interest, total, and even installment for the given terms
///
/// callers guarantee duration_months >= 1; the builder enforces it
pub fn compute_terms(principal: Money, rate: Rate, duration_months: u32) -> LoanQuote {
    let interest = flat_interest(principal, rate);
    let total = principal + interest;
    LoanQuote {
        interest,
        total_payable: total,
        installment: total / Decimal::from(duration_months),
    }
}

/// remaining balance, clamped so overpayment never goes negative
pub fn outstanding(total_payable: Money, paid_amount: Money) -> Money {
    (total_payable - paid_amount).max(Money::ZERO)
}

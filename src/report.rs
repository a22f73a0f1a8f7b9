//! portfolio aggregation and reporting
//!
//! folds a loan slice into portfolio statistics, optionally restricted
//! to a trailing calendar window on start date. every derivation here
//! resolves degenerate input to a documented default instead of failing.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::economics;
use crate::loan::Loan;
use crate::status;
use crate::types::{LoanStatus, PaymentGateway, ReportPeriod};

const TREND_MONTHS: usize = 6;
const TOP_BORROWERS: usize = 5;

/// loan counts per derived status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// one calendar-month bucket of the trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub loans: usize,
    pub lent: Money,
    pub received: Money,
}

/// per-borrower rollup, keyed by email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerSummary {
    pub name: String,
    pub email: String,
    pub total_amount: Money,
    pub total_paid: Money,
    pub loan_count: usize,
}

/// portfolio-wide statistics for one aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub period: ReportPeriod,
    pub loan_count: usize,
    pub total_lent: Money,
    pub total_received: Money,
    pub total_outstanding: Money,
    /// received / lent as a percentage, 0 when nothing lent
    pub collection_rate: Decimal,
    pub expected_interest: Money,
    /// portfolio-level estimate only, never attributed per loan
    pub earned_interest: Money,
    /// earned / expected interest as a percentage, 0 when none expected
    pub interest_collection_rate: Decimal,
    pub average_loan_amount: Money,
    pub status_breakdown: StatusBreakdown,
    pub gateway_breakdown: BTreeMap<PaymentGateway, usize>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    pub top_borrowers: Vec<BorrowerSummary>,
}

/// cutoff date for a trailing window, None for all-time
pub fn period_cutoff(period: ReportPeriod, today: NaiveDate) -> Option<NaiveDate> {
    let months = match period {
        ReportPeriod::Month => 1,
        ReportPeriod::Quarter => 3,
        ReportPeriod::Year => 12,
        ReportPeriod::All => return None,
    };
    // only fails before NaiveDate::MIN, out of range for ledger dates
    today.checked_sub_months(Months::new(months))
}

/// loans whose start date falls on or after the window cutoff
pub fn filter_by_period<'a>(
    loans: &'a [Loan],
    period: ReportPeriod,
    today: NaiveDate,
) -> Vec<&'a Loan> {
    match period_cutoff(period, today) {
        Some(cutoff) => loans
            .iter()
            .filter(|l| l.terms.start_date >= cutoff)
            .collect(),
        None => loans.iter().collect(),
    }
}

/// fold a loan collection into portfolio statistics
///
/// every loan is classified against the same reference date so one
/// report is internally consistent
pub fn aggregate(loans: &[Loan], today: NaiveDate, period: ReportPeriod) -> PortfolioStats {
    let window = filter_by_period(loans, period, today);

    let total_lent: Money = window.iter().map(|l| l.terms.principal).sum();
    let total_received: Money = window.iter().map(|l| l.paid_amount()).sum();
    let total_outstanding: Money = window.iter().map(|l| l.outstanding()).sum();

    let expected_interest: Money = window
        .iter()
        .map(|l| economics::flat_interest(l.terms.principal, l.terms.rate))
        .sum();
    let earned_interest = (total_received - total_lent).max(Money::ZERO);

    let mut status_breakdown = StatusBreakdown::default();
    for loan in &window {
        match status::classify(loan, today) {
            LoanStatus::Active => status_breakdown.active += 1,
            LoanStatus::Completed => status_breakdown.completed += 1,
            LoanStatus::Overdue => status_breakdown.overdue += 1,
        }
    }

    let mut gateway_breakdown: BTreeMap<PaymentGateway, usize> = BTreeMap::new();
    for loan in &window {
        *gateway_breakdown.entry(loan.terms.gateway).or_insert(0) += 1;
    }

    PortfolioStats {
        period,
        loan_count: window.len(),
        total_lent,
        total_received,
        total_outstanding,
        collection_rate: ratio_percentage(total_received, total_lent),
        expected_interest,
        earned_interest,
        interest_collection_rate: ratio_percentage(earned_interest, expected_interest),
        average_loan_amount: if window.is_empty() {
            Money::ZERO
        } else {
            total_lent / Decimal::from(window.len() as u64)
        },
        status_breakdown,
        gateway_breakdown,
        monthly_trend: monthly_trend(&window),
        top_borrowers: top_borrowers(&window),
    }
}

/// numerator / denominator as a percentage, 0 when the denominator is zero
fn ratio_percentage(numerator: Money, denominator: Money) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        (numerator.as_decimal() / denominator.as_decimal() * Decimal::from(100)).round_dp(2)
    }
}

/// bucket loans by (year, month) of start date, ascending, last 6 buckets
fn monthly_trend(loans: &[&Loan]) -> Vec<MonthlyTrendPoint> {
    let mut buckets: BTreeMap<(i32, u32), MonthlyTrendPoint> = BTreeMap::new();

    for loan in loans {
        let start = loan.terms.start_date;
        let key = (start.year(), start.month());
        let point = buckets.entry(key).or_insert_with(|| MonthlyTrendPoint {
            year: key.0,
            month: key.1,
            label: start.format("%b %Y").to_string(),
            loans: 0,
            lent: Money::ZERO,
            received: Money::ZERO,
        });
        point.loans += 1;
        point.lent += loan.terms.principal;
        point.received += loan.paid_amount();
    }

    let series: Vec<MonthlyTrendPoint> = buckets.into_values().collect();
    let skip = series.len().saturating_sub(TREND_MONTHS);
    series.into_iter().skip(skip).collect()
}

/// group by borrower email, descending by total principal, top 5
///
/// sort is stable, so equal totals keep first-seen order; the display
/// name of a merged entry is the first seen for that email
fn top_borrowers(loans: &[&Loan]) -> Vec<BorrowerSummary> {
    let mut summaries: Vec<BorrowerSummary> = Vec::new();

    for loan in loans {
        match summaries.iter_mut().find(|s| s.email == loan.borrower.email) {
            Some(summary) => {
                summary.total_amount += loan.terms.principal;
                summary.total_paid += loan.paid_amount();
                summary.loan_count += 1;
            }
            None => summaries.push(BorrowerSummary {
                name: loan.borrower.name.clone(),
                email: loan.borrower.email.clone(),
                total_amount: loan.terms.principal,
                total_paid: loan.paid_amount(),
                loan_count: 1,
            }),
        }
    }

    summaries.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    summaries.truncate(TOP_BORROWERS);
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::PaymentKind;
    use rust_decimal_macros::dec;

    fn loan(
        name: &str,
        email: &str,
        principal: i64,
        start: NaiveDate,
        due: NaiveDate,
        gateway: PaymentGateway,
    ) -> Loan {
        Loan::builder()
            .borrower_name(name)
            .borrower_email(email)
            .principal(Money::from_major(principal))
            .rate(Rate::from_percentage(dec!(5)))
            .duration_months(12)
            .start_date(start)
            .due_date(due)
            .gateway(gateway)
            .build()
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_portfolio_defaults() {
        let stats = aggregate(&[], date(2024, 6, 1), ReportPeriod::All);

        assert_eq!(stats.loan_count, 0);
        assert_eq!(stats.total_lent, Money::ZERO);
        assert_eq!(stats.collection_rate, Decimal::ZERO);
        assert_eq!(stats.interest_collection_rate, Decimal::ZERO);
        assert_eq!(stats.average_loan_amount, Money::ZERO);
        assert_eq!(stats.status_breakdown, StatusBreakdown::default());
        assert!(stats.gateway_breakdown.is_empty());
        assert!(stats.monthly_trend.is_empty());
        assert!(stats.top_borrowers.is_empty());
    }

    #[test]
    fn test_totals_and_collection_rate() {
        let mut a = loan("Priya", "priya@example.com", 50_000, date(2024, 1, 10), date(2025, 1, 10), PaymentGateway::Upi);
        a.record_payment(Money::from_major(15_000), date(2024, 3, 1), PaymentKind::Partial)
            .unwrap();
        let b = loan("Vikram", "vikram@example.com", 30_000, date(2024, 2, 5), date(2025, 2, 5), PaymentGateway::Paytm);

        let stats = aggregate(&[a, b], date(2024, 6, 1), ReportPeriod::All);

        assert_eq!(stats.total_lent, Money::from_major(80_000));
        assert_eq!(stats.total_received, Money::from_major(15_000));
        // outstanding: (52500 - 15000) + 31500
        assert_eq!(stats.total_outstanding, Money::from_major(69_000));
        assert_eq!(stats.collection_rate, dec!(18.75));
        assert_eq!(stats.expected_interest, Money::from_major(4_000));
        assert_eq!(stats.earned_interest, Money::ZERO);
        assert_eq!(stats.average_loan_amount, Money::from_major(40_000));
    }

    #[test]
    fn test_earned_interest_is_aggregate_overage() {
        let mut a = loan("Priya", "priya@example.com", 10_000, date(2024, 1, 10), date(2025, 1, 10), PaymentGateway::Upi);
        a.record_payment(Money::from_major(10_500), date(2024, 5, 1), PaymentKind::Full)
            .unwrap();

        let stats = aggregate(&[a], date(2024, 6, 1), ReportPeriod::All);

        assert_eq!(stats.earned_interest, Money::from_major(500));
        assert_eq!(stats.expected_interest, Money::from_major(500));
        assert_eq!(stats.interest_collection_rate, dec!(100.00));
    }

    #[test]
    fn test_status_and_gateway_breakdowns() {
        let today = date(2024, 6, 1);
        let active = loan("A", "a@example.com", 10_000, date(2024, 5, 1), date(2024, 12, 1), PaymentGateway::Upi);
        let overdue = loan("B", "b@example.com", 10_000, date(2024, 1, 1), date(2024, 5, 1), PaymentGateway::Upi);
        let mut completed = loan("C", "c@example.com", 10_000, date(2024, 2, 1), date(2024, 5, 1), PaymentGateway::GooglePay);
        completed
            .record_payment(Money::from_major(10_500), date(2024, 4, 1), PaymentKind::Full)
            .unwrap();

        let stats = aggregate(&[active, overdue, completed], today, ReportPeriod::All);

        assert_eq!(stats.status_breakdown.active, 1);
        assert_eq!(stats.status_breakdown.overdue, 1);
        assert_eq!(stats.status_breakdown.completed, 1);
        assert_eq!(stats.gateway_breakdown[&PaymentGateway::Upi], 2);
        assert_eq!(stats.gateway_breakdown[&PaymentGateway::GooglePay], 1);
    }

    #[test]
    fn test_period_window_filters_by_start_date() {
        let today = date(2024, 6, 15);
        let recent = loan("A", "a@example.com", 10_000, date(2024, 6, 1), date(2024, 12, 1), PaymentGateway::Upi);
        let old = loan("B", "b@example.com", 20_000, date(2024, 1, 1), date(2024, 12, 1), PaymentGateway::Upi);
        let loans = vec![recent, old];

        let month = aggregate(&loans, today, ReportPeriod::Month);
        assert_eq!(month.loan_count, 1);
        assert_eq!(month.total_lent, Money::from_major(10_000));

        let year = aggregate(&loans, today, ReportPeriod::Year);
        assert_eq!(year.loan_count, 2);

        // cutoff is inclusive
        assert_eq!(period_cutoff(ReportPeriod::Month, today), Some(date(2024, 5, 15)));
        assert_eq!(period_cutoff(ReportPeriod::All, today), None);
    }

    #[test]
    fn test_monthly_trend_sorted_and_capped() {
        let mut loans = Vec::new();
        for month in 1..=9 {
            loans.push(loan(
                "A",
                "a@example.com",
                1_000,
                date(2024, month, 5),
                date(2025, month, 5),
                PaymentGateway::Upi,
            ));
        }
        // second loan in march
        loans.push(loan("B", "b@example.com", 2_000, date(2024, 3, 20), date(2025, 3, 20), PaymentGateway::Upi));

        let stats = aggregate(&loans, date(2024, 10, 1), ReportPeriod::All);
        let trend = &stats.monthly_trend;

        assert_eq!(trend.len(), 6);
        // most recent six of nine months: april through september
        assert_eq!((trend[0].year, trend[0].month), (2024, 4));
        assert_eq!((trend[5].year, trend[5].month), (2024, 9));
        assert!(trend.windows(2).all(|w| (w[0].year, w[0].month) < (w[1].year, w[1].month)));
        assert_eq!(trend[0].label, "Apr 2024");
    }

    #[test]
    fn test_top_borrowers_merge_by_email() {
        let mut a = loan("Ramesh Gupta", "ramesh@example.com", 30_000, date(2024, 1, 1), date(2024, 12, 1), PaymentGateway::Upi);
        a.record_payment(Money::from_major(30_600), date(2024, 5, 1), PaymentKind::Full)
            .unwrap();
        // same email, different display name: merges into one entry
        let b = loan("R. Gupta", "ramesh@example.com", 20_000, date(2024, 2, 1), date(2024, 12, 1), PaymentGateway::Upi);
        let c = loan("Kavya Nair", "kavya@example.com", 5_000, date(2024, 3, 1), date(2024, 12, 1), PaymentGateway::Paytm);

        let stats = aggregate(&[a, b, c], date(2024, 6, 1), ReportPeriod::All);
        let top = &stats.top_borrowers;

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].email, "ramesh@example.com");
        assert_eq!(top[0].name, "Ramesh Gupta");
        assert_eq!(top[0].total_amount, Money::from_major(50_000));
        assert_eq!(top[0].total_paid, Money::from_major(30_600));
        assert_eq!(top[0].loan_count, 2);
        assert_eq!(top[1].email, "kavya@example.com");
    }

    #[test]
    fn test_top_borrowers_capped_at_five() {
        let mut loans = Vec::new();
        for i in 0..8 {
            loans.push(loan(
                "Borrower",
                &format!("b{}@example.com", i),
                1_000 * (i + 1) as i64,
                date(2024, 1, 1),
                date(2024, 12, 1),
                PaymentGateway::Upi,
            ));
        }

        let stats = aggregate(&loans, date(2024, 6, 1), ReportPeriod::All);
        let top = &stats.top_borrowers;

        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].total_amount >= w[1].total_amount));
        assert_eq!(top[0].total_amount, Money::from_major(8_000));
    }

}

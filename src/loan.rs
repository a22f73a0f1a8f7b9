use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::economics;
use crate::errors::{LedgerError, Result};
use crate::types::{LoanId, PaymentGateway, PaymentKind};

/// borrower identity; email is the stable key used to group loans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// loan terms, fixed at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub rate: Rate,
    pub duration_months: u32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub purpose: Option<String>,
    pub gateway: PaymentGateway,
}

/// single payment record, owned by its parent loan, append-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub date: NaiveDate,
    pub amount: Money,
    pub kind: PaymentKind,
}

/// the sole persistent entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub borrower: Borrower,
    pub terms: LoanTerms,
    paid_amount: Money,
    payments: Vec<Payment>,
}

impl Loan {
    /// builder for creating loans
    pub fn builder() -> LoanBuilder {
        LoanBuilder::new()
    }

    /// cumulative amount received, always equal to the sum of payments
    pub fn paid_amount(&self) -> Money {
        self.paid_amount
    }

    /// payment history, oldest first
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// flat interest charged once on principal
    pub fn interest(&self) -> Money {
        economics::flat_interest(self.terms.principal, self.terms.rate)
    }

    /// principal plus flat interest, fixed at creation
    pub fn total_payable(&self) -> Money {
        economics::total_payable(self.terms.principal, self.terms.rate)
    }

    /// even per-month installment, a display figure
    pub fn installment(&self) -> Money {
        self.total_payable() / rust_decimal::Decimal::from(self.terms.duration_months)
    }

    /// remaining balance, clamped at zero on overpayment
    pub fn outstanding(&self) -> Money {
        economics::outstanding(self.total_payable(), self.paid_amount)
    }

    /// check if the total payable is covered
    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount >= self.total_payable()
    }

    /// record a payment
    ///
    /// the single mutation path: appends the payment and bumps the paid
    /// amount in one step so the two never diverge
    pub fn record_payment(&mut self, amount: Money, date: NaiveDate, kind: PaymentKind) -> Result<()> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidPaymentAmount { amount });
        }

        self.payments.push(Payment { date, amount, kind });
        self.paid_amount += amount;

        Ok(())
    }

    /// most recent payments, newest first
    pub fn recent_payments(&self, count: usize) -> Vec<&Payment> {
        self.payments.iter().rev().take(count).collect()
    }
}

/// builder for new loans; validation happens in build()
#[derive(Debug, Default)]
pub struct LoanBuilder {
    borrower_name: Option<String>,
    borrower_email: Option<String>,
    borrower_phone: Option<String>,
    principal: Option<Money>,
    rate: Option<Rate>,
    duration_months: Option<u32>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    purpose: Option<String>,
    gateway: Option<PaymentGateway>,
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn borrower_name(mut self, name: impl Into<String>) -> Self {
        self.borrower_name = Some(name.into());
        self
    }

    pub fn borrower_email(mut self, email: impl Into<String>) -> Self {
        self.borrower_email = Some(email.into());
        self
    }

    pub fn borrower_phone(mut self, phone: impl Into<String>) -> Self {
        self.borrower_phone = Some(phone.into());
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn duration_months(mut self, months: u32) -> Self {
        self.duration_months = Some(months);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn gateway(mut self, gateway: PaymentGateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// validate and build a fresh loan with no payments
    pub fn build(self) -> Result<Loan> {
        let name = self
            .borrower_name
            .ok_or(LedgerError::MissingField { field: "borrower_name" })?;
        if name.trim().is_empty() {
            return Err(LedgerError::MissingBorrowerName);
        }

        let email = self
            .borrower_email
            .ok_or(LedgerError::MissingField { field: "borrower_email" })?;
        if !is_valid_email(&email) {
            return Err(LedgerError::InvalidBorrowerEmail { email });
        }

        let principal = self
            .principal
            .ok_or(LedgerError::MissingField { field: "principal" })?;
        if !principal.is_positive() {
            return Err(LedgerError::InvalidPrincipal { amount: principal });
        }

        let rate = self.rate.ok_or(LedgerError::MissingField { field: "rate" })?;
        if rate.is_negative() {
            return Err(LedgerError::InvalidInterestRate { rate });
        }

        let duration_months = self
            .duration_months
            .ok_or(LedgerError::MissingField { field: "duration_months" })?;
        if duration_months == 0 {
            return Err(LedgerError::InvalidDuration { months: duration_months });
        }

        let start_date = self
            .start_date
            .ok_or(LedgerError::MissingField { field: "start_date" })?;
        let due_date = self
            .due_date
            .ok_or(LedgerError::MissingField { field: "due_date" })?;
        if due_date < start_date {
            return Err(LedgerError::DueDateBeforeStart { start_date, due_date });
        }

        let gateway = self.gateway.ok_or(LedgerError::MissingField { field: "gateway" })?;

        Ok(Loan {
            id: Uuid::new_v4(),
            borrower: Borrower {
                name,
                email,
                phone: self.borrower_phone,
            },
            terms: LoanTerms {
                principal,
                rate,
                duration_months,
                start_date,
                due_date,
                purpose: self.purpose,
                gateway,
            },
            paid_amount: Money::ZERO,
            payments: Vec::new(),
        })
    }
}

/// minimal shape check: non-empty local part, an @, a dot in the domain
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.contains(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

//! built-in sample portfolio for demos and tests

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::loan::Loan;
use crate::types::{PaymentGateway, PaymentKind};

struct SeedLoan {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    principal: i64,
    rate: Decimal,
    duration_months: u32,
    purpose: &'static str,
    start: (i32, u32, u32),
    due: (i32, u32, u32),
    gateway: PaymentGateway,
    payments: &'static [((i32, u32, u32), i64, PaymentKind)],
}

const SEED: &[SeedLoan] = &[
    SeedLoan {
        name: "Alice Johnson",
        email: "alice@example.com",
        phone: "+91 98765 43210",
        principal: 50_000,
        rate: dec!(5),
        duration_months: 12,
        purpose: "Business expansion - new equipment purchase",
        start: (2024, 1, 15),
        due: (2025, 1, 15),
        gateway: PaymentGateway::GooglePay,
        payments: &[
            ((2024, 2, 15), 5_000, PaymentKind::Partial),
            ((2024, 3, 15), 5_000, PaymentKind::Partial),
            ((2024, 4, 15), 5_000, PaymentKind::Partial),
        ],
    },
    SeedLoan {
        name: "Bob Smith",
        email: "bob@example.com",
        phone: "+91 87654 32109",
        principal: 30_000,
        rate: dec!(4),
        duration_months: 6,
        purpose: "Medical emergency - surgery expenses",
        start: (2024, 3, 1),
        due: (2024, 9, 1),
        gateway: PaymentGateway::PhonePe,
        payments: &[((2024, 9, 1), 30_600, PaymentKind::Full)],
    },
    SeedLoan {
        name: "Carol Williams",
        email: "carol@example.com",
        phone: "+91 76543 21098",
        principal: 75_000,
        rate: dec!(6),
        duration_months: 18,
        purpose: "Home renovation project",
        start: (2023, 12, 1),
        due: (2025, 6, 1),
        gateway: PaymentGateway::Paytm,
        payments: &[
            ((2024, 1, 1), 10_000, PaymentKind::Partial),
            ((2024, 2, 1), 7_500, PaymentKind::Partial),
            ((2024, 3, 1), 7_500, PaymentKind::Partial),
        ],
    },
    SeedLoan {
        name: "David Brown",
        email: "david@example.com",
        phone: "+91 65432 10987",
        principal: 25_000,
        rate: dec!(7),
        duration_months: 8,
        purpose: "Vehicle purchase - delivery van",
        start: (2024, 2, 10),
        due: (2024, 10, 10),
        gateway: PaymentGateway::GooglePay,
        payments: &[
            ((2024, 3, 10), 5_000, PaymentKind::Partial),
            ((2024, 4, 10), 5_000, PaymentKind::Partial),
        ],
    },
    SeedLoan {
        name: "Emma Davis",
        email: "emma@example.com",
        phone: "+91 54321 09876",
        principal: 40_000,
        rate: dec!(5.5),
        duration_months: 10,
        purpose: "Education - professional course fees",
        start: (2024, 1, 20),
        due: (2024, 11, 20),
        gateway: PaymentGateway::PhonePe,
        payments: &[
            ((2024, 2, 20), 4_000, PaymentKind::Partial),
            ((2024, 3, 20), 4_000, PaymentKind::Partial),
            ((2024, 4, 20), 4_000, PaymentKind::Partial),
            ((2024, 5, 20), 4_000, PaymentKind::Partial),
            ((2024, 6, 20), 4_000, PaymentKind::Partial),
        ],
    },
    SeedLoan {
        name: "Frank Miller",
        email: "frank@example.com",
        phone: "+91 43210 98765",
        principal: 15_000,
        rate: dec!(8),
        duration_months: 4,
        purpose: "Emergency repair - roof damage",
        start: (2024, 5, 1),
        due: (2024, 9, 1),
        gateway: PaymentGateway::Paytm,
        payments: &[((2024, 9, 1), 15_400, PaymentKind::Full)],
    },
    SeedLoan {
        name: "Grace Wilson",
        email: "grace@example.com",
        phone: "+91 32109 87654",
        principal: 60_000,
        rate: dec!(4.5),
        duration_months: 15,
        purpose: "Small business startup - inventory purchase",
        start: (2023, 11, 15),
        due: (2025, 2, 15),
        gateway: PaymentGateway::GooglePay,
        payments: &[
            ((2023, 12, 15), 5_000, PaymentKind::Partial),
            ((2024, 1, 15), 5_000, PaymentKind::Partial),
            ((2024, 2, 15), 5_000, PaymentKind::Partial),
            ((2024, 3, 15), 5_000, PaymentKind::Partial),
            ((2024, 4, 15), 5_000, PaymentKind::Partial),
            ((2024, 5, 15), 5_000, PaymentKind::Partial),
            ((2024, 6, 15), 5_000, PaymentKind::Partial),
        ],
    },
    SeedLoan {
        name: "Henry Taylor",
        email: "henry@example.com",
        phone: "+91 21098 76543",
        principal: 20_000,
        rate: dec!(6.5),
        duration_months: 6,
        purpose: "Wedding expenses",
        start: (2024, 4, 1),
        due: (2024, 10, 1),
        gateway: PaymentGateway::PhonePe,
        payments: &[
            ((2024, 5, 1), 4_000, PaymentKind::Partial),
            ((2024, 6, 1), 4_000, PaymentKind::Partial),
        ],
    },
    SeedLoan {
        name: "Ivy Anderson",
        email: "ivy@example.com",
        phone: "+91 10987 65432",
        principal: 35_000,
        rate: dec!(5),
        duration_months: 9,
        purpose: "Debt consolidation",
        start: (2024, 2, 1),
        due: (2024, 11, 1),
        gateway: PaymentGateway::Paytm,
        payments: &[
            ((2024, 3, 1), 4_000, PaymentKind::Partial),
            ((2024, 4, 1), 4_000, PaymentKind::Partial),
            ((2024, 5, 1), 4_000, PaymentKind::Partial),
            ((2024, 6, 1), 5_000, PaymentKind::Partial),
            ((2024, 7, 1), 5_000, PaymentKind::Partial),
        ],
    },
    SeedLoan {
        name: "Jack Thompson",
        email: "jack@example.com",
        phone: "+91 09876 54321",
        principal: 80_000,
        rate: dec!(7.5),
        duration_months: 24,
        purpose: "Property investment - down payment",
        start: (2023, 10, 1),
        due: (2025, 10, 1),
        gateway: PaymentGateway::GooglePay,
        payments: &[
            ((2023, 11, 1), 5_000, PaymentKind::Partial),
            ((2023, 12, 1), 5_000, PaymentKind::Partial),
            ((2024, 1, 1), 5_000, PaymentKind::Partial),
            ((2024, 2, 1), 5_000, PaymentKind::Partial),
            ((2024, 3, 1), 5_000, PaymentKind::Partial),
            ((2024, 4, 1), 5_000, PaymentKind::Partial),
            ((2024, 5, 1), 5_000, PaymentKind::Partial),
            ((2024, 6, 1), 5_000, PaymentKind::Partial),
            ((2024, 7, 1), 5_000, PaymentKind::Partial),
        ],
    },
];

fn date((y, m, d): (i32, u32, u32)) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| LedgerError::InvalidDate {
        message: format!("{}-{}-{}", y, m, d),
    })
}

/// build the sample portfolio through the public loan api
pub fn sample_loans() -> Result<Vec<Loan>> {
    SEED.iter()
        .map(|seed| {
            let mut loan = Loan::builder()
                .borrower_name(seed.name)
                .borrower_email(seed.email)
                .borrower_phone(seed.phone)
                .principal(Money::from_major(seed.principal))
                .rate(Rate::from_percentage(seed.rate))
                .duration_months(seed.duration_months)
                .purpose(seed.purpose)
                .start_date(date(seed.start)?)
                .due_date(date(seed.due)?)
                .gateway(seed.gateway)
                .build()?;

            for &(when, amount, kind) in seed.payments {
                loan.record_payment(Money::from_major(amount), date(when)?, kind)?;
            }

            Ok(loan)
        })
        .collect()
}

pub mod amortization;
pub mod billing;
pub mod config;
pub mod delinquency;
pub mod errors;
pub mod events;
pub mod money;
pub mod service;
pub mod storage;
pub mod types;

// re-export key types
pub use amortization::AmortizationPlan;
pub use billing::{generate_schedule, grace_cutoff, TERM_INTERVAL_DAYS};
pub use config::BillingConfig;
pub use delinquency::DelinquencyEvaluator;
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use money::{BasisPoints, Money, PreciseRate};
pub use service::LoanService;
pub use storage::{LoanStore, MemoryStore};
pub use types::{
    Billing, DelinquencyStatus, Loan, LoanId, MonthlyLoan, Payment, WeeklyLoan,
    WeeklyLoanFullInformation, WeeklyLoanWithDelinquency,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

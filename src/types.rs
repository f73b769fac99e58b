use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::{BasisPoints, Money};

/// unique identifier for a loan
pub type LoanId = Uuid;

/// core loan record; only `outstanding_balance` and `is_completed`
/// are mutated after origination, exclusively by the payment reconciler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub principal: Money,
    pub annual_interest_rate: BasisPoints,
    pub start_date: DateTime<Utc>,
    pub total_interest: Money,
    pub outstanding_balance: Money,
    pub is_completed: bool,
}

/// loan on a weekly repayment term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyLoan {
    #[serde(flatten)]
    pub loan: Loan,
    pub loan_term_weeks: u32,
    pub weekly_payment: Money,
    pub weekly_interest: Money,
}

impl WeeklyLoan {
    pub fn id(&self) -> LoanId {
        self.loan.id
    }
}

/// loan on a monthly repayment term; data-model parity only, no
/// billing logic operates on monthly loans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLoan {
    #[serde(flatten)]
    pub loan: Loan,
    pub loan_term_months: u32,
    pub monthly_payment: Money,
    pub monthly_interest: Money,
}

/// one scheduled installment obligation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Billing {
    pub loan_id: LoanId,
    /// 1-based position in the schedule
    pub term_number: u32,
    pub payment_due_date: DateTime<Utc>,
    pub repayment: Money,
    pub is_paid: bool,
}

/// record of a settled payment; append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub loan_id: LoanId,
    pub date: DateTime<Utc>,
    pub amount: Money,
    pub balance_before: Money,
    pub balance_after: Money,
    pub loan_completed: bool,
}

/// per-loan delinquency record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelinquencyStatus {
    pub is_delinquent: bool,
    pub late_fee: Money,
}

impl DelinquencyStatus {
    /// status with the current zero late-fee policy; the fee field is a
    /// reserved extension point (itikad baik, 0%)
    pub fn with_zero_fee(is_delinquent: bool, weekly_payment: Money) -> Self {
        Self {
            is_delinquent,
            late_fee: (weekly_payment * 0).divide(100),
        }
    }
}

impl Default for DelinquencyStatus {
    fn default() -> Self {
        Self {
            is_delinquent: false,
            late_fee: Money::ZERO,
        }
    }
}

/// read-side join of a loan and its delinquency record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyLoanWithDelinquency {
    #[serde(flatten)]
    pub loan: WeeklyLoan,
    pub delinquency: DelinquencyStatus,
}

/// read-side join of a loan, its delinquency record, and the full
/// payment history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyLoanFullInformation {
    #[serde(flatten)]
    pub loan: WeeklyLoan,
    pub delinquency: DelinquencyStatus,
    pub payments: Vec<Payment>,
}

impl WeeklyLoanFullInformation {
    /// json representation for adapters and debugging
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

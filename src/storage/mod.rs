pub mod memory;

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::types::{
    Billing, DelinquencyStatus, LoanId, Payment, WeeklyLoan, WeeklyLoanFullInformation,
    WeeklyLoanWithDelinquency,
};

pub use memory::MemoryStore;

/// storage capability consumed by the billing core; every method fails
/// with `LoanNotFound` when the referenced loan is unknown
pub trait LoanStore: Send + Sync {
    fn create_loan(&self, loan: WeeklyLoan) -> Result<()>;
    fn get_loan(&self, loan_id: LoanId) -> Result<WeeklyLoan>;
    fn get_loan_with_delinquency(&self, loan_id: LoanId) -> Result<WeeklyLoanWithDelinquency>;
    fn get_loan_full_information(&self, loan_id: LoanId) -> Result<WeeklyLoanFullInformation>;
    fn update_loan(&self, loan_id: LoanId, loan: WeeklyLoan) -> Result<()>;

    fn create_delinquency_status(&self, loan_id: LoanId, status: DelinquencyStatus) -> Result<()>;
    fn get_delinquency_status(&self, loan_id: LoanId) -> Result<DelinquencyStatus>;
    fn update_delinquency_status(&self, loan_id: LoanId, status: DelinquencyStatus) -> Result<()>;

    /// append a settled payment; payment records are never mutated
    fn record_payment(&self, loan_id: LoanId, payment: Payment) -> Result<()>;

    /// persist the full installment schedule produced at origination
    fn create_billings(&self, loan_id: LoanId, billings: Vec<Billing>) -> Result<()>;
    fn billings_due_before(&self, loan_id: LoanId, when: DateTime<Utc>) -> Result<Vec<Billing>>;
    fn unpaid_billings_due_before(
        &self,
        loan_id: LoanId,
        when: DateTime<Utc>,
    ) -> Result<Vec<Billing>>;
    /// flip to paid every unpaid billing due strictly before `when`
    fn mark_billings_paid_before(&self, loan_id: LoanId, when: DateTime<Utc>) -> Result<()>;
}

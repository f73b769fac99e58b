use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::errors::{LoanError, Result};
use crate::storage::LoanStore;
use crate::types::{
    Billing, DelinquencyStatus, LoanId, Payment, WeeklyLoan, WeeklyLoanFullInformation,
    WeeklyLoanWithDelinquency,
};

#[derive(Debug, Default)]
struct Inner {
    loans: HashMap<LoanId, WeeklyLoan>,
    payments: HashMap<LoanId, Vec<Payment>>,            // 1..n
    billings: HashMap<LoanId, Vec<Billing>>,            // 1..n
    delinquency_status: HashMap<LoanId, DelinquencyStatus>, // 1..1
}

/// in-memory adapter for the storage port; reads emulate the SQL joins
/// a database-backed adapter would perform
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LoanStore for MemoryStore {
    fn create_loan(&self, loan: WeeklyLoan) -> Result<()> {
        self.write().loans.insert(loan.id(), loan);
        Ok(())
    }

    fn get_loan(&self, loan_id: LoanId) -> Result<WeeklyLoan> {
        self.read()
            .loans
            .get(&loan_id)
            .cloned()
            .ok_or(LoanError::LoanNotFound { id: loan_id })
    }

    fn get_loan_with_delinquency(&self, loan_id: LoanId) -> Result<WeeklyLoanWithDelinquency> {
        let inner = self.read();

        let loan = inner
            .loans
            .get(&loan_id)
            .cloned()
            .ok_or(LoanError::LoanNotFound { id: loan_id })?;

        let delinquency = inner
            .delinquency_status
            .get(&loan_id)
            .cloned()
            .ok_or(LoanError::DelinquencyStatusNotFound { id: loan_id })?;

        Ok(WeeklyLoanWithDelinquency { loan, delinquency })
    }

    fn get_loan_full_information(&self, loan_id: LoanId) -> Result<WeeklyLoanFullInformation> {
        let inner = self.read();

        let loan = inner
            .loans
            .get(&loan_id)
            .cloned()
            .ok_or(LoanError::LoanNotFound { id: loan_id })?;

        let delinquency = inner
            .delinquency_status
            .get(&loan_id)
            .cloned()
            .ok_or(LoanError::DelinquencyStatusNotFound { id: loan_id })?;

        let payments = inner.payments.get(&loan_id).cloned().unwrap_or_default();

        Ok(WeeklyLoanFullInformation {
            loan,
            delinquency,
            payments,
        })
    }

    fn update_loan(&self, loan_id: LoanId, loan: WeeklyLoan) -> Result<()> {
        let mut inner = self.write();

        if !inner.loans.contains_key(&loan_id) {
            return Err(LoanError::LoanNotFound { id: loan_id });
        }

        inner.loans.insert(loan_id, loan);
        Ok(())
    }

    fn create_delinquency_status(&self, loan_id: LoanId, status: DelinquencyStatus) -> Result<()> {
        self.write().delinquency_status.insert(loan_id, status);
        Ok(())
    }

    fn get_delinquency_status(&self, loan_id: LoanId) -> Result<DelinquencyStatus> {
        let inner = self.read();

        if !inner.loans.contains_key(&loan_id) {
            return Err(LoanError::LoanNotFound { id: loan_id });
        }

        // a known loan without its record is a consistency problem,
        // not an unknown loan
        inner
            .delinquency_status
            .get(&loan_id)
            .cloned()
            .ok_or(LoanError::DelinquencyStatusNotFound { id: loan_id })
    }

    fn update_delinquency_status(&self, loan_id: LoanId, status: DelinquencyStatus) -> Result<()> {
        let mut inner = self.write();

        if !inner.loans.contains_key(&loan_id) {
            return Err(LoanError::LoanNotFound { id: loan_id });
        }

        if !inner.delinquency_status.contains_key(&loan_id) {
            return Err(LoanError::DelinquencyStatusNotFound { id: loan_id });
        }

        inner.delinquency_status.insert(loan_id, status);
        Ok(())
    }

    fn record_payment(&self, loan_id: LoanId, payment: Payment) -> Result<()> {
        self.write()
            .payments
            .entry(loan_id)
            .or_default()
            .push(payment);
        Ok(())
    }

    fn create_billings(&self, loan_id: LoanId, billings: Vec<Billing>) -> Result<()> {
        self.write().billings.insert(loan_id, billings);
        Ok(())
    }

    fn billings_due_before(&self, loan_id: LoanId, when: DateTime<Utc>) -> Result<Vec<Billing>> {
        let inner = self.read();

        let billings = inner
            .billings
            .get(&loan_id)
            .ok_or(LoanError::LoanNotFound { id: loan_id })?;

        Ok(billings
            .iter()
            .filter(|b| b.payment_due_date < when)
            .cloned()
            .collect())
    }

    fn unpaid_billings_due_before(
        &self,
        loan_id: LoanId,
        when: DateTime<Utc>,
    ) -> Result<Vec<Billing>> {
        let inner = self.read();

        let billings = inner
            .billings
            .get(&loan_id)
            .ok_or(LoanError::LoanNotFound { id: loan_id })?;

        // WHERE due_date < when AND NOT is_paid, schedule order
        Ok(billings
            .iter()
            .filter(|b| b.payment_due_date < when && !b.is_paid)
            .cloned()
            .collect())
    }

    fn mark_billings_paid_before(&self, loan_id: LoanId, when: DateTime<Utc>) -> Result<()> {
        let mut inner = self.write();

        let billings = inner
            .billings
            .get_mut(&loan_id)
            .ok_or(LoanError::LoanNotFound { id: loan_id })?;

        for billing in billings.iter_mut() {
            if billing.payment_due_date < when && !billing.is_paid {
                billing.is_paid = true;
            }
        }

        Ok(())
    }
}

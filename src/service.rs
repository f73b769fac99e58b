use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::amortization::AmortizationPlan;
use crate::billing::{generate_schedule, grace_cutoff};
use crate::config::BillingConfig;
use crate::delinquency::DelinquencyEvaluator;
use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::money::{BasisPoints, Money};
use crate::storage::LoanStore;
use crate::types::{
    Billing, DelinquencyStatus, Loan, LoanId, Payment, WeeklyLoan, WeeklyLoanFullInformation,
};

/// loan billing service: creates loans, reconciles payments, and
/// answers delinquency queries over an injected storage port
pub struct LoanService<S: LoanStore> {
    store: S,
    evaluator: DelinquencyEvaluator,
    events: Mutex<EventStore>,
    // one exclusive section per loan, held across the whole
    // read-validate-write reconciliation rather than per storage call
    reconciliation_locks: Mutex<HashMap<LoanId, Arc<Mutex<()>>>>,
}

impl<S: LoanStore> LoanService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, BillingConfig::default())
    }

    pub fn with_config(store: S, config: BillingConfig) -> Self {
        Self {
            store,
            evaluator: DelinquencyEvaluator::new(config.missed_payment_threshold),
            events: Mutex::new(EventStore::new()),
            reconciliation_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// drain the events collected since the last call
    pub fn take_events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take_events()
    }

    fn emit(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .emit(event);
    }

    fn loan_lock(&self, loan_id: LoanId) -> Arc<Mutex<()>> {
        let mut locks = self
            .reconciliation_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(loan_id).or_default().clone()
    }

    fn release_loan_lock(&self, loan_id: LoanId) {
        self.reconciliation_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&loan_id);
    }

    #[cfg(test)]
    fn reconciliation_lock_count(&self) -> usize {
        self.reconciliation_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// originate a weekly flat-interest loan: amortize, persist the
    /// loan with a fresh identifier, a clean delinquency record, and
    /// the full installment schedule
    pub fn create_loan(
        &self,
        principal: Money,
        annual_interest_rate: BasisPoints,
        loan_term_weeks: u32,
        time: &SafeTimeProvider,
    ) -> Result<WeeklyLoan> {
        let plan = AmortizationPlan::calculate(principal, annual_interest_rate, loan_term_weeks)?;

        let loan_id = Uuid::new_v4();
        let now = time.now();

        let loan = WeeklyLoan {
            loan: Loan {
                id: loan_id,
                principal,
                annual_interest_rate,
                start_date: now,
                total_interest: plan.total_interest,
                outstanding_balance: plan.total_obligation,
                is_completed: false,
            },
            loan_term_weeks,
            weekly_payment: plan.weekly_payment,
            weekly_interest: plan.weekly_interest,
        };

        self.store.create_loan(loan.clone())?;
        self.store.create_delinquency_status(
            loan_id,
            DelinquencyStatus::with_zero_fee(false, plan.weekly_payment),
        )?;
        self.store.create_billings(
            loan_id,
            generate_schedule(loan_id, now, loan_term_weeks, plan.weekly_payment),
        )?;

        self.emit(Event::LoanCreated {
            loan_id,
            principal,
            total_interest: plan.total_interest,
            term_weeks: loan_term_weeks,
            timestamp: now,
        });

        Ok(loan)
    }

    /// loan joined with its delinquency record and payment history
    pub fn get_loan(&self, loan_id: LoanId) -> Result<WeeklyLoanFullInformation> {
        self.store.get_loan_full_information(loan_id)
    }

    /// re-derive delinquency from the unpaid schedule as of `as_of`,
    /// without touching persisted state; returns the decision and the
    /// unfulfilled billings backing it
    pub fn cold_delinquent_flag(
        &self,
        loan_id: LoanId,
        as_of: DateTime<Utc>,
    ) -> Result<(bool, Vec<Billing>)> {
        let unfulfilled = self
            .store
            .unpaid_billings_due_before(loan_id, grace_cutoff(as_of))?;

        Ok((self.evaluator.is_delinquent(unfulfilled.len()), unfulfilled))
    }

    /// delinquency status check: short-circuits on an already
    /// persisted flag, otherwise evaluates the schedule cold; this
    /// query path never writes the flag back
    pub fn check_delinquency(
        &self,
        loan_id: LoanId,
        as_of: DateTime<Utc>,
        time: &SafeTimeProvider,
    ) -> Result<bool> {
        let as_of = as_of.with_timezone(&Utc);
        let now = time.now();
        if as_of > now {
            return Err(LoanError::CheckInFuture {
                requested: as_of,
                current: now,
            });
        }

        let status = self.store.get_delinquency_status(loan_id)?;
        if status.is_delinquent {
            return Ok(true);
        }

        let (is_delinquent, _) = self.cold_delinquent_flag(loan_id, as_of)?;
        Ok(is_delinquent)
    }

    /// reconcile a payment against the due schedule; the payment must
    /// equal the cumulative amount of every unfulfilled installment
    pub fn record_payment(
        &self,
        loan_id: LoanId,
        as_of: DateTime<Utc>,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<()> {
        let as_of = as_of.with_timezone(&Utc);
        let now = time.now();
        if as_of > now {
            return Err(LoanError::CheckInFuture {
                requested: as_of,
                current: now,
            });
        }

        let lock = self.loan_lock(loan_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        match self.reconcile(loan_id, as_of, amount) {
            Ok(completed) => {
                if completed {
                    self.release_loan_lock(loan_id);
                }
                Ok(())
            }
            Err(err) => {
                // a completed loan takes no further payments, so its
                // exclusive section is retired as well
                if matches!(err, LoanError::RepaymentComplete { .. }) {
                    self.release_loan_lock(loan_id);
                }
                self.emit(Event::rejection(loan_id, amount, &err, as_of));
                Err(err)
            }
        }
    }

    /// returns whether this payment completed the loan
    fn reconcile(&self, loan_id: LoanId, as_of: DateTime<Utc>, amount: Money) -> Result<bool> {
        let mut loan = self.store.get_loan(loan_id)?;

        if loan.loan.is_completed {
            return Err(LoanError::RepaymentComplete { id: loan_id });
        }

        let status = self.store.get_delinquency_status(loan_id)?;
        if status.is_delinquent {
            return Err(LoanError::AccountDelinquent { id: loan_id });
        }

        let (newly_delinquent, unfulfilled) = self.cold_delinquent_flag(loan_id, as_of)?;
        if newly_delinquent {
            self.emit(Event::DelinquencyFlagged {
                loan_id,
                unfulfilled_count: unfulfilled.len() as u32,
                timestamp: as_of,
            });
            return Err(LoanError::AccountDelinquent { id: loan_id });
        }

        // nothing billed yet: there is no amount a payment could settle,
        // so even a zero payment is a mismatch
        if unfulfilled.is_empty() {
            return Err(LoanError::PaymentMismatch {
                expected: Money::ZERO,
                provided: amount,
            });
        }

        // cumulative catch-up amount, not a single installment
        let amount_needed = unfulfilled
            .iter()
            .map(|b| b.repayment)
            .fold(Money::ZERO, |acc, x| acc + x);

        if amount != amount_needed {
            return Err(LoanError::PaymentMismatch {
                expected: amount_needed,
                provided: amount,
            });
        }

        let balance_before = loan.loan.outstanding_balance;
        let completed = amount >= balance_before;
        let balance_after = if completed {
            Money::ZERO
        } else {
            balance_before - amount
        };

        loan.loan.outstanding_balance = balance_after;
        loan.loan.is_completed = completed;

        let payment = Payment {
            loan_id,
            date: as_of,
            amount,
            balance_before,
            balance_after,
            loan_completed: completed,
        };

        // the four writes of the reconciliation, under the loan lock
        self.store.record_payment(loan_id, payment)?;
        self.store.update_loan(loan_id, loan.clone())?;
        self.store.update_delinquency_status(
            loan_id,
            DelinquencyStatus::with_zero_fee(false, loan.weekly_payment),
        )?;
        self.store
            .mark_billings_paid_before(loan_id, grace_cutoff(as_of))?;

        self.emit(Event::PaymentRecorded {
            loan_id,
            amount,
            balance_before,
            balance_after,
            installments_settled: unfulfilled.len() as u32,
            timestamp: as_of,
        });

        if completed {
            self.emit(Event::LoanCompleted {
                loan_id,
                final_payment: amount,
                timestamp: as_of,
            });
        }

        Ok(completed)
    }
}

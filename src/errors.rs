use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::money::{BasisPoints, Money};
use crate::types::LoanId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoanError {
    #[error("expect a positive interest rate, got {rate}")]
    NegativeInterestRate {
        rate: BasisPoints,
    },

    #[error("expect some principal, got {principal}")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("expect a positive term, got {term} weeks")]
    InvalidTerm {
        term: u32,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("delinquency status not found for loan {id}")]
    DelinquencyStatusNotFound {
        id: LoanId,
    },

    #[error("repayment already complete for loan {id}")]
    RepaymentComplete {
        id: LoanId,
    },

    #[error("cannot pay while delinquent: loan {id}")]
    AccountDelinquent {
        id: LoanId,
    },

    #[error("payment must match the billed amount exactly: expected {expected}, got {provided}")]
    PaymentMismatch {
        expected: Money,
        provided: Money,
    },

    #[error("check requested for a future instant: {requested} is after {current}")]
    CheckInFuture {
        requested: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;

use serde::{Deserialize, Serialize};

use crate::errors::{LoanError, Result};
use crate::money::{BasisPoints, Money};

/// per-installment and total obligations for a flat-interest weekly loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationPlan {
    pub weekly_principal: Money,
    pub weekly_interest: Money,
    pub weekly_payment: Money,
    pub total_interest: Money,
    pub total_obligation: Money,
}

impl AmortizationPlan {
    /// derive the plan for a flat (non-compounding) annual rate
    pub fn calculate(principal: Money, rate: BasisPoints, term_weeks: u32) -> Result<Self> {
        if rate.is_negative() {
            return Err(LoanError::NegativeInterestRate { rate });
        }

        if !principal.is_positive() {
            return Err(LoanError::InvalidPrincipal { principal });
        }

        if term_weeks == 0 {
            return Err(LoanError::InvalidTerm { term: term_weeks });
        }

        let weekly_principal = principal.divide(i64::from(term_weeks));
        // the rate truncates to a whole percentage before the second
        // division; kept bit-for-bit compatible with prior balances
        let weekly_interest = (weekly_principal * rate.to_percentage()).divide(100);
        let weekly_payment = weekly_principal + weekly_interest;
        let total_interest = weekly_interest * i64::from(term_weeks);
        let total_obligation = principal + total_interest;

        Ok(Self {
            weekly_principal,
            weekly_interest,
            weekly_payment,
            total_interest,
            total_obligation,
        })
    }
}

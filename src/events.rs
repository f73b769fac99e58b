use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::LoanError;
use crate::money::Money;
use crate::types::LoanId;

/// all events emitted by the billing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    LoanCreated {
        loan_id: LoanId,
        principal: Money,
        total_interest: Money,
        term_weeks: u32,
        timestamp: DateTime<Utc>,
    },
    PaymentRecorded {
        loan_id: LoanId,
        amount: Money,
        balance_before: Money,
        balance_after: Money,
        installments_settled: u32,
        timestamp: DateTime<Utc>,
    },
    PaymentRejected {
        loan_id: LoanId,
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    LoanCompleted {
        loan_id: LoanId,
        final_payment: Money,
        timestamp: DateTime<Utc>,
    },
    DelinquencyFlagged {
        loan_id: LoanId,
        unfulfilled_count: u32,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    /// rejection event carrying the failed precondition's message
    pub fn rejection(loan_id: LoanId, amount: Money, error: &LoanError, at: DateTime<Utc>) -> Self {
        Event::PaymentRejected {
            loan_id,
            amount,
            reason: error.to_string(),
            timestamp: at,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

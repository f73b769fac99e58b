use chrono::{DateTime, Duration, Utc};

use crate::money::Money;
use crate::types::{Billing, LoanId};

/// days between weekly installments
pub const TERM_INTERVAL_DAYS: i64 = 7;

/// cutoff for the unfulfilled-installment lookup: one term of padding
/// past the reference instant, so an installment falling due inside
/// the current grace window does not yet count as missed
pub fn grace_cutoff(as_of: DateTime<Utc>) -> DateTime<Utc> {
    as_of + Duration::days(TERM_INTERVAL_DAYS)
}

/// produce the full installment schedule for a loan: `term_weeks` rows,
/// the first due exactly one week after the start date, all unpaid
pub fn generate_schedule(
    loan_id: LoanId,
    start_date: DateTime<Utc>,
    term_weeks: u32,
    repayment: Money,
) -> Vec<Billing> {
    let mut due_date = start_date + Duration::days(TERM_INTERVAL_DAYS);
    let mut schedule = Vec::with_capacity(term_weeks as usize);

    for term_number in 1..=term_weeks {
        schedule.push(Billing {
            loan_id,
            term_number,
            payment_due_date: due_date,
            repayment,
            is_paid: false,
        });

        due_date += Duration::days(TERM_INTERVAL_DAYS);
    }

    schedule
}

/// read-only delinquency decision over a loan's unfulfilled billing
/// count; the unfulfilled lookup itself is the storage port's
/// `unpaid_billings_due_before` bounded by `billing::grace_cutoff`,
/// and the caller persists any resulting flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelinquencyEvaluator {
    missed_payment_threshold: u32,
}

impl DelinquencyEvaluator {
    pub fn new(missed_payment_threshold: u32) -> Self {
        Self {
            missed_payment_threshold,
        }
    }

    /// the account is delinquent once the unfulfilled count exceeds
    /// the threshold plus the one installment inside the grace window
    pub fn is_delinquent(&self, unfulfilled_count: usize) -> bool {
        unfulfilled_count > (self.missed_payment_threshold as usize) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_boundary() {
        let evaluator = DelinquencyEvaluator::new(1);

        // two unfulfilled installments sit exactly at the tolerance
        assert!(!evaluator.is_delinquent(0));
        assert!(!evaluator.is_delinquent(1));
        assert!(!evaluator.is_delinquent(2));
        assert!(evaluator.is_delinquent(3));
    }

    #[test]
    fn test_zero_threshold_tolerates_only_the_grace_window() {
        let evaluator = DelinquencyEvaluator::new(0);
        assert!(!evaluator.is_delinquent(1));
        assert!(evaluator.is_delinquent(2));
    }

    #[test]
    fn test_higher_threshold_tolerates_more() {
        let evaluator = DelinquencyEvaluator::new(3);
        assert!(!evaluator.is_delinquent(4));
        assert!(evaluator.is_delinquent(5));
    }
}

use serde::{Deserialize, Serialize};

/// billing configuration; loading from the environment is the
/// adapter's job, the core consumes the struct as given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingConfig {
    /// tolerated count of missed installments before an account is
    /// flagged delinquent
    pub missed_payment_threshold: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            missed_payment_threshold: 1,
        }
    }
}

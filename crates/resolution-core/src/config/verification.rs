//! One-time verification code configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted code lifetime: one day.
pub const MAX_CODE_TTL_SECONDS: u64 = 86_400;

/// Verification code lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Seconds a code stays valid before it is deleted.
    #[serde(default = "default_ttl")]
    pub code_ttl_seconds: u64,
    /// Cron expression (with seconds) for the expired-code sweep.
    #[serde(default = "default_sweep_cron")]
    pub sweep_cron: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_ttl(),
            sweep_cron: default_sweep_cron(),
        }
    }
}

impl VerificationConfig {
    /// TTL expressed in whole minutes, rounded up, for user-facing copy.
    pub fn ttl_minutes(&self) -> u64 {
        self.code_ttl_seconds.div_ceil(60)
    }
}

fn default_ttl() -> u64 {
    600
}

fn default_sweep_cron() -> String {
    "0 * * * * *".to_string()
}

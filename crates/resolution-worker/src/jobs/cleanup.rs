//! Verification code cleanup.

use tracing::{debug, info};

use resolution_core::AppResult;
use resolution_service::VerificationService;

/// Delete verification codes whose expiry has passed.
///
/// Codes normally disappear through their own expiry timer; this catches
/// the ones whose timer was lost to a restart.
pub async fn sweep_expired_codes(verification: &VerificationService) -> AppResult<u64> {
    let removed = verification.sweep_expired().await?;
    if removed > 0 {
        info!(removed, "Swept expired verification codes");
    } else {
        debug!("No expired verification codes");
    }
    Ok(removed)
}

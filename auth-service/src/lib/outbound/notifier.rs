use async_trait::async_trait;

use crate::auth::errors::NotifierError;
use crate::auth::models::EmailAddress;
use crate::auth::ports::ResetNotifier;

/// Local/dev delivery stub: records that a reset token was issued without
/// sending anything. Real delivery (SMTP, provider API) implements
/// [`ResetNotifier`] behind the same seam.
///
/// The token itself is never written to the log.
pub struct LogResetNotifier;

#[async_trait]
impl ResetNotifier for LogResetNotifier {
    async fn deliver_reset_token(
        &self,
        email: &EmailAddress,
        _reset_token: &str,
    ) -> Result<(), NotifierError> {
        tracing::info!(email = %email, "reset token issued; delivery stubbed");
        Ok(())
    }
}

//! Issuing, checking and expiring one-time verification codes.
//!
//! Every issue follows the same sequence: generate a code, store it over
//! the user's previous one with a fresh expiry, schedule its deletion and
//! email it. The last issued code wins.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use resolution_auth::otp::{CodeGenerator, codes_match};
use resolution_core::AppResult;
use resolution_core::config::VerificationConfig;
use resolution_core::error::AppError;
use resolution_database::{UserRepository, VerificationRepository};
use resolution_entity::user::User;
use resolution_entity::verification::{CreateVerificationCode, VerificationCode};

use crate::context::RequestContext;
use crate::mail::{Mailer, template};

/// Result of issuing a code.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The stored record. Its `code` is never serialized.
    pub record: VerificationCode,
    /// Whether a previous code for the same user was discarded.
    pub replaced: bool,
}

/// Manages the verification code lifecycle.
#[derive(Debug, Clone)]
pub struct VerificationService {
    users: Arc<dyn UserRepository>,
    codes: Arc<dyn VerificationRepository>,
    mailer: Arc<dyn Mailer>,
    generator: CodeGenerator,
    ttl_seconds: u64,
    ttl_minutes: u64,
}

impl VerificationService {
    /// Creates a new verification service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        codes: Arc<dyn VerificationRepository>,
        mailer: Arc<dyn Mailer>,
        config: &VerificationConfig,
    ) -> Self {
        Self {
            users,
            codes,
            mailer,
            generator: CodeGenerator::new(),
            ttl_seconds: config.code_ttl_seconds,
            ttl_minutes: config.ttl_minutes(),
        }
    }

    /// Seconds a freshly issued code remains valid.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issue a code for a user id, replacing any previous one. The caller
    /// must be that user or an admin.
    pub async fn issue(&self, ctx: &RequestContext, user_id: i64) -> AppResult<IssuedCode> {
        ctx.require_access(user_id)?;
        let user = self.find_user(user_id).await?;
        self.issue_for(&user).await
    }

    /// Issue a code for an already loaded user.
    pub async fn issue_for(&self, user: &User) -> AppResult<IssuedCode> {
        let code = self.generator.generate();
        let (record, replaced) = self
            .codes
            .replace_for_user(&CreateVerificationCode {
                user_id: user.id,
                code,
                expires_at: self.next_expiry()?,
            })
            .await?;

        self.schedule_expiry(&record);
        info!(user_id = user.id, code_id = record.id, replaced, "Verification code issued");

        self.deliver(user, &record.code).await?;
        Ok(IssuedCode { record, replaced })
    }

    /// Give an existing record a new code and a fresh expiry. Records of
    /// other users are reported as missing unless the caller is an admin.
    pub async fn regenerate(&self, ctx: &RequestContext, id: i64) -> AppResult<VerificationCode> {
        let existing = self
            .codes
            .find_by_id(id)
            .await?
            .filter(|c| ctx.can_access(c.user_id))
            .ok_or_else(|| AppError::not_found("Verification record not found"))?;
        let user = self.find_user(existing.user_id).await?;

        let code = self.generator.generate();
        let record = self
            .codes
            .regenerate(id, &code, self.next_expiry()?)
            .await?
            .ok_or_else(|| AppError::not_found("Verification record not found"))?;

        self.schedule_expiry(&record);
        info!(user_id = user.id, code_id = record.id, "Verification code regenerated");

        self.deliver(&user, &record.code).await?;
        Ok(record)
    }

    /// Check a submitted code and mark the account verified on success.
    pub async fn verify(&self, email: &str, submitted: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.verified {
            return Err(AppError::conflict("This account is already verified"));
        }

        let record = self.codes.find_by_user(user.id).await?.ok_or_else(|| {
            AppError::validation("No verification code has been issued for this account")
        })?;

        if record.is_expired() {
            self.codes.delete(record.id).await?;
            return Err(AppError::validation(
                "The verification code has expired. Request a new one.",
            ));
        }

        if !codes_match(submitted, &record.code) {
            warn!(user_id = user.id, "Verification code mismatch");
            return Err(AppError::validation("Invalid verification code"));
        }

        self.users.set_verified(user.id, true).await?;
        self.codes.delete(record.id).await?;
        info!(user_id = user.id, "Account verified");

        Ok(User {
            verified: true,
            ..user
        })
    }

    /// Send a fresh code to an unverified account.
    pub async fn resend(&self, email: &str) -> AppResult<IssuedCode> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.verified {
            return Err(AppError::conflict("This account is already verified"));
        }

        self.issue_for(&user).await
    }

    /// All stored records (admin only).
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<VerificationCode>> {
        ctx.require_admin()?;
        self.codes.find_all().await
    }

    /// Delete one record (admin only).
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        ctx.require_admin()?;
        if !self.codes.delete(id).await? {
            return Err(AppError::not_found("Verification record not found"));
        }
        info!(code_id = id, deleted_by = ctx.user_id, "Verification record deleted");
        Ok(())
    }

    /// Remove every code past its expiry. Returns how many were removed.
    pub async fn sweep_expired(&self) -> AppResult<u64> {
        self.codes.delete_expired(Utc::now()).await
    }

    async fn find_user(&self, user_id: i64) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    fn next_expiry(&self) -> AppResult<DateTime<Utc>> {
        i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "verification.code_ttl_seconds = {} is out of range",
                    self.ttl_seconds
                ))
            })
    }

    /// Delete the record once it expires, unless it was reissued meanwhile.
    fn schedule_expiry(&self, record: &VerificationCode) {
        let codes = Arc::clone(&self.codes);
        let (id, expires_at) = (record.id, record.expires_at);
        let delay = std::time::Duration::from_secs(self.ttl_seconds);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match codes.delete_if_unchanged(id, expires_at).await {
                Ok(true) => debug!(code_id = id, "Verification code expired"),
                Ok(false) => {}
                Err(e) => warn!(code_id = id, error = %e, "Failed to expire verification code"),
            }
        });
    }

    async fn deliver(&self, user: &User, code: &str) -> AppResult<()> {
        let message =
            template::verification_email(&user.email, &user.full_name(), code, self.ttl_minutes);
        self.mailer.send(&message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use resolution_core::ErrorKind;
    use resolution_database::MemoryStore;
    use resolution_entity::user::CreateUser;

    use crate::mail::MailMessage;

    #[derive(Debug, Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<MailMessage>>,
    }

    impl RecordingMailer {
        fn last_code(&self) -> String {
            let sent = self.sent.lock().unwrap();
            let text = &sent.last().unwrap().text;
            text.split_whitespace()
                .find(|w| w.len() == 6 && w.bytes().all(|b| b.is_ascii_digit()))
                .unwrap()
                .to_string()
        }

        fn count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: &MailMessage) -> AppResult<()> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    async fn setup(ttl: u64) -> (VerificationService, Arc<RecordingMailer>, MemoryStore, User) {
        let store = MemoryStore::new();
        let user = UserRepository::create(
            &store,
            &CreateUser {
                first_name: "Marta".into(),
                last_name: "Lopez".into(),
                email: "marta@example.com".into(),
                password_hash: "hash".into(),
                phone: None,
            },
        )
        .await
        .unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let service = VerificationService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            mailer.clone(),
            &VerificationConfig {
                code_ttl_seconds: ttl,
                ..VerificationConfig::default()
            },
        );
        (service, mailer, store, user)
    }

    fn owner(user: &User) -> RequestContext {
        RequestContext::new(user.id, &user.email, false)
    }

    #[tokio::test]
    async fn test_issue_then_verify() {
        let (service, mailer, store, user) = setup(600).await;
        let issued = service.issue(&owner(&user), user.id).await.unwrap();
        assert!(!issued.replaced);
        assert_eq!(mailer.count(), 1);

        let verified = service.verify("marta@example.com", &mailer.last_code()).await.unwrap();
        assert!(verified.verified);
        assert!(UserRepository::find_by_id(&store, user.id).await.unwrap().unwrap().verified);
        assert!(VerificationRepository::find_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reissue_invalidates_previous_code() {
        let (service, mailer, _store, user) = setup(600).await;
        service.issue(&owner(&user), user.id).await.unwrap();
        let first = mailer.last_code();
        let second_issue = service.issue(&owner(&user), user.id).await.unwrap();
        assert!(second_issue.replaced);
        let second = mailer.last_code();

        if first != second {
            let err = service.verify("marta@example.com", &first).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert!(service.verify("marta@example.com", &second).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_errors() {
        let (service, _mailer, _store, _user) = setup(600).await;

        let unknown = service.verify("nobody@example.com", "123456").await.unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::NotFound);

        let no_code = service.verify("marta@example.com", "123456").await.unwrap_err();
        assert_eq!(no_code.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_wrong_code_is_rejected() {
        let (service, mailer, _store, user) = setup(600).await;
        service.issue(&owner(&user), user.id).await.unwrap();
        let good = mailer.last_code();
        let bad = if good == "000000" { "111111" } else { "000000" };

        let err = service.verify("marta@example.com", bad).await.unwrap_err();
        assert_eq!(err.message, "Invalid verification code");
    }

    #[tokio::test]
    async fn test_expired_code_is_rejected_and_removed() {
        let (service, mailer, store, user) = setup(600).await;
        service.issue(&owner(&user), user.id).await.unwrap();
        let code = mailer.last_code();

        let record = VerificationRepository::find_by_user(&store, user.id)
            .await
            .unwrap()
            .unwrap();
        VerificationRepository::regenerate(&store, record.id, &code, Utc::now() - TimeDelta::seconds(1))
            .await
            .unwrap();

        let err = service.verify("marta@example.com", &code).await.unwrap_err();
        assert!(err.message.contains("expired"));
        assert!(VerificationRepository::find_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resend_refuses_verified_accounts() {
        let (service, mailer, _store, user) = setup(600).await;
        service.issue(&owner(&user), user.id).await.unwrap();
        service.verify("marta@example.com", &mailer.last_code()).await.unwrap();

        let err = service.resend("marta@example.com").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test(start_paused = true)]
    async fn test_code_is_deleted_after_ttl() {
        let (service, _mailer, store, user) = setup(600).await;
        service.issue(&owner(&user), user.id).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_secs(601)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(VerificationRepository::find_by_user(&store, user.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reissued_code_survives_old_timer() {
        let (service, _mailer, store, user) = setup(600).await;
        service.issue(&owner(&user), user.id).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_secs(300)).await;
        let second = service.issue(&owner(&user), user.id).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_secs(301)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let current = VerificationRepository::find_by_user(&store, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, second.record.id);
    }

    #[tokio::test]
    async fn test_admin_only_listing() {
        let (service, _mailer, _store, user) = setup(600).await;
        service.issue(&owner(&user), user.id).await.unwrap();

        let member = RequestContext::new(user.id, "marta@example.com", false);
        assert_eq!(
            service.list(&member).await.unwrap_err().kind,
            ErrorKind::Authorization
        );
        let admin = RequestContext::new(99, "root@example.com", true);
        assert_eq!(service.list(&admin).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_issue_and_regenerate_are_limited_to_owner_or_admin() {
        let (service, mailer, _store, user) = setup(600).await;
        let stranger = RequestContext::new(user.id + 1, "someone@example.com", false);
        let admin = RequestContext::new(99, "root@example.com", true);

        let err = service.issue(&stranger, user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(mailer.count(), 0);

        let issued = service.issue(&admin, user.id).await.unwrap();
        let hidden = service.regenerate(&stranger, issued.record.id).await.unwrap_err();
        assert_eq!(hidden.kind, ErrorKind::NotFound);

        let regenerated = service.regenerate(&owner(&user), issued.record.id).await.unwrap();
        assert_eq!(regenerated.id, issued.record.id);
        assert_eq!(mailer.count(), 2);
    }

    #[tokio::test]
    async fn test_unrepresentable_ttl_fails_without_storing() {
        let (service, mailer, store, user) = setup(u64::MAX).await;

        let err = service.issue(&owner(&user), user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(VerificationRepository::find_all(&store).await.unwrap().is_empty());
        assert_eq!(mailer.count(), 0);

        let (service, _mailer, _store, user) = setup(100_000_000_000_000_000).await;
        let err = service.issue(&owner(&user), user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_concurrent_issues_all_succeed() {
        let (service, mailer, store, user) = setup(600).await;
        let service = Arc::new(service);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                let ctx = owner(&user);
                tokio::spawn(async move { service.issue(&ctx, ctx.user_id).await })
            })
            .collect();
        let mut fresh = 0;
        for handle in handles {
            if !handle.await.unwrap().unwrap().replaced {
                fresh += 1;
            }
        }

        assert_eq!(fresh, 1);
        assert_eq!(mailer.count(), 4);
        assert_eq!(VerificationRepository::find_all(&store).await.unwrap().len(), 1);
    }
}

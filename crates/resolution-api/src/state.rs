//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use resolution_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use resolution_core::config::AppConfig;
use resolution_database::Repositories;
use resolution_entity::ticket::TicketKind;
use resolution_service::{
    AdminPanelService, AdminUserService, Mailer, ProfileService, ReportService, TicketService,
    TodoService, UserService, VerificationService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Repository set for the configured backend
    pub repositories: Repositories,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login and account self-service
    pub user_service: Arc<UserService>,
    /// Admin user management
    pub admin_user_service: Arc<AdminUserService>,
    /// Verification code lifecycle
    pub verification_service: Arc<VerificationService>,
    /// Claims
    pub claim_service: Arc<TicketService>,
    /// Requests
    pub request_service: Arc<TicketService>,
    /// Profiles
    pub profile_service: Arc<ProfileService>,
    /// Admin dashboard
    pub admin_panel_service: Arc<AdminPanelService>,
    /// Ticket reports
    pub report_service: Arc<ReportService>,
    /// Todo lists and tasks
    pub todo_service: Arc<TodoService>,
}

impl AppState {
    /// Wire every service on top of the given repositories and mailer.
    pub fn new(config: AppConfig, repositories: Repositories, mailer: Arc<dyn Mailer>) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let verification_service = Arc::new(VerificationService::new(
            Arc::clone(&repositories.users),
            Arc::clone(&repositories.verifications),
            mailer,
            &config.verification,
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repositories.users),
            password_hasher,
            password_validator,
            jwt_encoder,
            Arc::clone(&verification_service),
            config.auth.require_verified_login,
        ));
        let admin_user_service = Arc::new(AdminUserService::new(Arc::clone(&repositories.users)));
        let claim_service = Arc::new(TicketService::new(
            TicketKind::Claim,
            Arc::clone(&repositories.tickets),
        ));
        let request_service = Arc::new(TicketService::new(
            TicketKind::Request,
            Arc::clone(&repositories.tickets),
        ));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&repositories.profiles),
            Arc::clone(&repositories.users),
        ));
        let admin_panel_service = Arc::new(AdminPanelService::new(
            Arc::clone(&repositories.users),
            Arc::clone(&repositories.tickets),
        ));
        let report_service = Arc::new(ReportService::new(Arc::clone(&repositories.tickets)));
        let todo_service = Arc::new(TodoService::new(
            Arc::clone(&repositories.todo_lists),
            Arc::clone(&repositories.tasks),
        ));

        Self {
            config: Arc::new(config),
            repositories,
            jwt_decoder,
            user_service,
            admin_user_service,
            verification_service,
            claim_service,
            request_service,
            profile_service,
            admin_panel_service,
            report_service,
            todo_service,
        }
    }

    /// The service for one ticket kind.
    pub fn tickets(&self, kind: TicketKind) -> &Arc<TicketService> {
        match kind {
            TicketKind::Claim => &self.claim_service,
            TicketKind::Request => &self.request_service,
        }
    }
}

//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use proctor_auth::{CredentialManager, PasswordHasher, PasswordValidator};
use proctor_cache::provider::CacheManager;
use proctor_core::config::AppConfig;
use proctor_core::error::AppError;
use proctor_core::traits::Clock;
use proctor_database::{AlertRepository, DatabasePool, ExamSessionRepository, UserRepository};
use proctor_realtime::{BroadcastHub, SessionGateway};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheaply clonable.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Key-value store backing the refresh ledger
    pub cache: Arc<CacheManager>,
    /// Wall clock used for token timestamps and session start times
    pub clock: Arc<dyn Clock>,

    // ── Auth ─────────────────────────────────────────────────
    /// Access/refresh issuance and rotation
    pub credentials: Arc<CredentialManager>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Password strength policy
    pub password_validator: Arc<PasswordValidator>,

    // ── Realtime ─────────────────────────────────────────────
    /// Per-exam-session WebSocket gateway
    pub gateway: SessionGateway,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Exam session repository
    pub exam_session_repo: Arc<ExamSessionRepository>,
    /// Alert repository
    pub alert_repo: Arc<AlertRepository>,
}

impl AppState {
    /// Wires every component from configuration and the two stores.
    pub fn new(
        config: AppConfig,
        db: DatabasePool,
        cache: Arc<CacheManager>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let credentials = CredentialManager::new(&config.auth, cache.clone(), clock.clone())?;
        let password_validator = PasswordValidator::new(&config.auth);
        let gateway = SessionGateway::new(Arc::new(BroadcastHub::new()), config.realtime.clone());

        let pool = db.pool().clone();

        Ok(Self {
            config: Arc::new(config),
            db,
            cache,
            clock,
            credentials: Arc::new(credentials),
            password_hasher: Arc::new(PasswordHasher::new()),
            password_validator: Arc::new(password_validator),
            gateway,
            user_repo: Arc::new(UserRepository::new(pool.clone())),
            exam_session_repo: Arc::new(ExamSessionRepository::new(pool.clone())),
            alert_repo: Arc::new(AlertRepository::new(pool)),
        })
    }

    /// The broadcast hub behind the gateway.
    pub fn hub(&self) -> &Arc<BroadcastHub> {
        self.gateway.hub()
    }
}

//! Application state wiring all services together.
//!
//! Services are generic over repository/clock/dispatcher traits; AppState
//! pins them to the concrete infra implementations.

use std::sync::Arc;

use tokio::task::JoinHandle;

use dashbot_core::clock::SystemClock;
use dashbot_core::notify::NotificationQueue;
use dashbot_core::session::{SessionLifecycle, SessionService, SessionStore};
use dashbot_infra::filesystem::JsonFileSessionRepository;
use dashbot_infra::notify::ConfiguredDispatcher;
use dashbot_infra::webhook::SignatureVerifier;
use dashbot_types::config::DashbotConfig;

pub type ConcreteSessionService =
    SessionService<JsonFileSessionRepository, SystemClock, ConfiguredDispatcher>;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashbotConfig>,
    pub session_service: Arc<ConcreteSessionService>,
    pub verifier: Arc<SignatureVerifier>,
    pub notifications: NotificationQueue,
}

impl AppState {
    /// Load the session file, pick a dispatcher, and start the notification
    /// worker.
    ///
    /// The worker stops once every clone of the state is dropped.
    pub async fn init(config: DashbotConfig) -> anyhow::Result<(Self, JoinHandle<()>)> {
        let dispatcher = Arc::new(ConfiguredDispatcher::from_config(&config));
        tracing::debug!(dispatcher = dispatcher.name(), "notification dispatcher selected");

        let repo = JsonFileSessionRepository::new(config.session_file.clone());
        let store = SessionStore::load(repo).await?;
        let lifecycle = SessionLifecycle::new(store, SystemClock::new());
        let session_service = SessionService::new(
            lifecycle,
            dispatcher.clone(),
            config.channel_id,
            config.dispatch_timeout,
        );

        let (notifications, worker) = NotificationQueue::start(dispatcher, config.dispatch_timeout);
        let verifier = SignatureVerifier::new(config.webhook_secret.clone());

        let state = Self::new(config, session_service, verifier, notifications);
        Ok((state, worker))
    }

    pub fn new(
        config: DashbotConfig,
        session_service: ConcreteSessionService,
        verifier: SignatureVerifier,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            config: Arc::new(config),
            session_service: Arc::new(session_service),
            verifier: Arc::new(verifier),
            notifications,
        }
    }
}

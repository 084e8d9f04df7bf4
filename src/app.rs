//! Application wiring. Channels are created first, then every component is
//! handed exactly the dependencies it needs. The monitor's reset handle
//! reaches the auth middleware by construction, never through a global.

use crate::api::ApiClient;
use crate::auth::{middleware::VerifyAuth, token::TokenStore};
use crate::config::AppConfig;
use crate::router::{self, Router};
use crate::session::{
    Notice, SessionHandle, SessionHooks, coordinator,
    inactivity::{InactivityMonitor, MonitorHandle},
};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The assembled session/auth stack. The embedding shell drains
/// `navigations` (forced route changes) and `notices` (user-visible
/// messages) and feeds activity into `monitor`.
pub struct App {
    pub api: Arc<ApiClient>,
    pub tokens: Arc<TokenStore>,
    pub router: Router,
    pub monitor: MonitorHandle,
    pub session: SessionHandle,
    pub navigations: mpsc::UnboundedReceiver<&'static str>,
    pub notices: mpsc::UnboundedReceiver<Notice>,
}

impl App {
    /// Builds and starts the stack. Must run inside a tokio runtime; the
    /// monitor and coordinator tasks live until the handles are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot be built or the route table
    /// fails validation.
    pub fn build(config: &AppConfig) -> Result<App> {
        let tokens = Arc::new(match &config.token_path {
            Some(path) => TokenStore::open(path.clone()),
            None => TokenStore::ephemeral(),
        });

        let (session, triggers) = SessionHandle::channel();
        let (nav_tx, navigations) = mpsc::unbounded_channel();
        let (notice_tx, notices) = mpsc::unbounded_channel();

        let api = Arc::new(ApiClient::new(config, tokens.clone(), session.clone())?);
        let (monitor, _monitor_task) =
            InactivityMonitor::spawn(config.inactivity.clone(), session.clone());
        coordinator::spawn(
            triggers,
            api.clone(),
            tokens.clone(),
            SessionHooks::new(nav_tx, notice_tx),
        );

        let verify = Arc::new(VerifyAuth::new(api.clone(), tokens.clone(), monitor.clone()));
        let router = Router::new(router::default_routes(verify), tokens.clone())?;

        Ok(App {
            api,
            tokens,
            router,
            monitor,
            session,
            navigations,
            notices,
        })
    }
}

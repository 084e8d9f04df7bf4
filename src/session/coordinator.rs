//! The single owner of "what happens when a session ends". Explicit logout,
//! inactivity expiry and server-reported 401s all land here, and the steps
//! are the same for each: best-effort server invalidation, unconditional
//! local token deletion, then a forced navigation to the login route.

use crate::api::ApiClient;
use crate::auth::token::TokenStore;
use crate::router;
use crate::session::{LogoutTrigger, Notice, SessionHooks};
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{info, warn};

/// Spawns the coordinator task draining `triggers`. The task exits when the
/// last `SessionHandle` is dropped.
pub fn spawn(
    triggers: mpsc::UnboundedReceiver<LogoutTrigger>,
    api: Arc<ApiClient>,
    tokens: Arc<TokenStore>,
    hooks: SessionHooks,
) -> JoinHandle<()> {
    tokio::spawn(run(triggers, api, tokens, hooks))
}

async fn run(
    mut triggers: mpsc::UnboundedReceiver<LogoutTrigger>,
    api: Arc<ApiClient>,
    tokens: Arc<TokenStore>,
    hooks: SessionHooks,
) {
    while let Some(trigger) = triggers.recv().await {
        end_session(trigger, &api, &tokens, &hooks).await;
    }
}

/// One teardown pass. Every step tolerates having already run: the
/// invalidation call is fire-and-forget, clearing an absent token is a
/// no-op and redundant redirects are harmless.
async fn end_session(
    trigger: LogoutTrigger,
    api: &ApiClient,
    tokens: &TokenStore,
    hooks: &SessionHooks,
) {
    if let Err(err) = api.invalidate_session().await {
        // Local cleanup proceeds regardless.
        warn!(error = %err, "best-effort logout call failed");
    }

    tokens.clear();

    if trigger == LogoutTrigger::Inactivity {
        hooks.notify(Notice::InactivityLogout);
    }
    hooks.redirect(router::LOGIN);
    info!(trigger = trigger.as_str(), "session ended");
}

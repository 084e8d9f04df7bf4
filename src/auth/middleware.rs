//! Auth-verification middleware for guarded routes. Beyond the guard's
//! presence check, this middleware proves the token against the API on every
//! navigation and keeps the inactivity monitor in step with real activity.

use crate::api::ApiClient;
use crate::auth::{client, token::TokenStore};
use crate::errors::ApiError;
use crate::router::{self, Decision, GuardContext, Middleware, Next};
use crate::session::inactivity::MonitorHandle;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct VerifyAuth {
    api: Arc<ApiClient>,
    tokens: Arc<TokenStore>,
    monitor: MonitorHandle,
}

impl VerifyAuth {
    #[must_use]
    pub fn new(api: Arc<ApiClient>, tokens: Arc<TokenStore>, monitor: MonitorHandle) -> Self {
        Self {
            api,
            tokens,
            monitor,
        }
    }
}

#[async_trait]
impl Middleware for VerifyAuth {
    async fn handle(
        &self,
        ctx: &GuardContext<'_>,
        next: Next<'_>,
    ) -> Result<Decision, ApiError> {
        if !self.tokens.present() {
            return Ok(Decision::Redirect(router::LOGIN));
        }

        match client::current_user(&self.api).await {
            Ok(user) => {
                debug!(user_id = user.id, route = ctx.to.name, "token validated");
                // Navigating counts as activity; keep the idle countdown in step.
                self.monitor.reset();
                next.run(ctx).await
            }
            Err(err) => {
                // Logged, never shown; the user just lands on login.
                warn!(error = %err, route = ctx.to.name, "token validation failed");
                self.tokens.clear();
                Ok(Decision::Redirect(router::LOGIN))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::router::{Route, RouteMeta, Router};
    use crate::session::SessionHandle;
    use crate::session::inactivity::{ActivityKind, Command, InactivityConfig};
    use anyhow::{Result, ensure};
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn guarded_router(
        base_url: &str,
    ) -> Result<(
        Router,
        Arc<TokenStore>,
        tokio::sync::mpsc::UnboundedReceiver<Command>,
    )> {
        let config = AppConfig {
            api_base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            inactivity: InactivityConfig::new(
                Duration::from_secs(900),
                Some(Duration::from_secs(60)),
                ActivityKind::defaults(),
            )?,
            token_path: None,
        };
        let tokens = Arc::new(TokenStore::ephemeral());
        let (session, _triggers) = SessionHandle::channel();
        let api = Arc::new(ApiClient::new(&config, tokens.clone(), session)?);
        let (monitor, commands) = MonitorHandle::detached();
        let verify = Arc::new(VerifyAuth::new(api, tokens.clone(), monitor));

        let routes = vec![Route {
            path: "/students",
            name: "students",
            meta: RouteMeta {
                requires_auth: true,
                requires_guest: false,
                middleware: vec![verify],
            },
        }];
        let router = Router::new(routes, tokens.clone())?;
        Ok((router, tokens, commands))
    }

    #[tokio::test]
    async fn valid_token_proceeds_and_resets_the_monitor() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7, "name": "Ada", "email": "ada@example.test"
            })))
            .mount(&server)
            .await;

        let (router, tokens, mut commands) = guarded_router(&server.uri())?;
        tokens.set(SecretString::from("tok-1".to_string()))?;

        let decision = router.navigate("students", None).await?;
        assert_eq!(decision, Decision::Proceed);
        assert_eq!(commands.try_recv().ok(), Some(Command::Reset));
        Ok(())
    }

    #[tokio::test]
    async fn failed_validation_clears_the_token_and_redirects() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (router, tokens, mut commands) = guarded_router(&server.uri())?;
        tokens.set(SecretString::from("tok-1".to_string()))?;

        let decision = router.navigate("students", None).await?;
        assert_eq!(decision, Decision::Redirect(router::LOGIN));
        ensure!(!tokens.present(), "token should be cleared");
        ensure!(commands.try_recv().is_err(), "no reset on failure");
        Ok(())
    }

    #[tokio::test]
    async fn expired_token_401_redirects_via_the_adapter() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (router, tokens, _commands) = guarded_router(&server.uri())?;
        tokens.set(SecretString::from("stale".to_string()))?;

        let decision = router.navigate("students", None).await?;
        assert_eq!(decision, Decision::Redirect(router::LOGIN));
        ensure!(!tokens.present());
        Ok(())
    }
}

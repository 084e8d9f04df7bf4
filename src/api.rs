//! HTTP client adapter for the records API. Every outbound call goes through
//! here: the base URL is fixed, JSON headers and cookies are always on, a
//! bearer token is attached whenever the store holds one, and 401 responses
//! are intercepted in exactly one place: clear the token, signal the session
//! coordinator, re-raise a typed error to the caller.

use crate::auth::token::TokenStore;
use crate::config::AppConfig;
use crate::errors::{ApiError, LogoutReason};
use crate::session::{LogoutTrigger, SessionHandle};
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span, warn};
use url::Url;

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    session: SessionHandle,
}

impl ApiClient {
    /// Builds the adapter from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the underlying
    /// client cannot be constructed.
    pub fn new(
        config: &AppConfig,
        tokens: Arc<TokenStore>,
        session: SessionHandle,
    ) -> Result<Self, ApiError> {
        Url::parse(&config.api_base_url)
            .map_err(|err| ApiError::Config(format!("invalid API base URL: {err}")))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tokens,
            session,
        })
    }

    /// Fetches JSON.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.http.get(self.endpoint(path)), "GET", path).await?;
        parse_json(response).await
    }

    /// Fetches JSON with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let request = self.http.get(self.endpoint(path)).query(query);
        let response = self.execute(request, "GET", path).await?;
        parse_json(response).await
    }

    /// Posts a JSON body and parses a JSON response.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.post(self.endpoint(path)).json(body);
        let response = self.execute(request, "POST", path).await?;
        parse_json(response).await
    }

    /// Posts without a body, discarding the response payload.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.http.post(self.endpoint(path)), "POST", path)
            .await?;
        Ok(())
    }

    /// Puts a JSON body and parses a JSON response.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.put(self.endpoint(path)).json(body);
        let response = self.execute(request, "PUT", path).await?;
        parse_json(response).await
    }

    /// Deletes, discarding the response payload.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.endpoint(path)), "DELETE", path)
            .await?;
        Ok(())
    }

    /// Best-effort server-side session invalidation. This call deliberately
    /// bypasses the 401 interceptor: a logout racing an already-dead token
    /// must not re-enter session teardown.
    pub async fn invalidate_session(&self) -> Result<(), ApiError> {
        let path = "/logout";
        let span = info_span!("api.request", http.method = "POST", path);
        let response = self
            .authorized(self.http.post(self.endpoint(path)))
            .send()
            .instrument(span)
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // Already invalid server-side; nothing left to revoke.
            debug!("logout call found the session already gone");
            return Ok(());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: sanitize_body(body),
            });
        }
        Ok(())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            // Unauthenticated requests pass through unchanged.
            None => request,
        }
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<Response, ApiError> {
        let span = info_span!("api.request", http.method = method, path);
        let response = self
            .authorized(request)
            .send()
            .instrument(span)
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(self.handle_unauthorized(response).await);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: sanitize_body(body),
            });
        }
        Ok(response)
    }

    /// The one place credentials are invalidated in direct response to server
    /// feedback. Clearing an absent token is a no-op, so repeated 401s stay
    /// harmless.
    async fn handle_unauthorized(&self, response: Response) -> ApiError {
        let reason = logout_reason(response).await;
        self.tokens.clear();

        let trigger = match reason {
            Some(LogoutReason::Inactivity) => LogoutTrigger::Inactivity,
            None => LogoutTrigger::Unauthorized,
        };
        warn!(trigger = trigger.as_str(), "server rejected credentials");
        self.session.end_session(trigger);

        ApiError::Unauthorized { reason }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

async fn logout_reason(response: Response) -> Option<LogoutReason> {
    let body: Value = response.json().await.ok()?;
    match body.get("logout_reason").and_then(Value::as_str) {
        Some("inactivity") => Some(LogoutReason::Inactivity),
        _ => None,
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Parse(format!("failed to decode response: {err}")))
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("request timed out".to_string())
    } else {
        ApiError::Network(format!("unable to reach the server: {err}"))
    }
}

/// Trims and truncates HTTP error bodies for caller-facing messages.
fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request failed".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::session::inactivity::{ActivityKind, InactivityConfig};
    use anyhow::{Context, Result, bail, ensure};
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn test_config(base_url: &str) -> Result<AppConfig> {
        Ok(AppConfig {
            api_base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            inactivity: InactivityConfig::new(
                Duration::from_secs(900),
                Some(Duration::from_secs(60)),
                ActivityKind::defaults(),
            )?,
            token_path: None,
        })
    }

    fn test_client(
        base_url: &str,
    ) -> Result<(ApiClient, Arc<TokenStore>, UnboundedReceiver<LogoutTrigger>)> {
        let tokens = Arc::new(TokenStore::ephemeral());
        let (session, triggers) = SessionHandle::channel();
        let client = ApiClient::new(&test_config(base_url)?, tokens.clone(), session)?;
        Ok((client, tokens, triggers))
    }

    #[test]
    fn endpoint_joins_base_and_path() -> Result<()> {
        let (client, _tokens, _triggers) = test_client("http://example.test/api/")?;
        assert_eq!(client.endpoint("/students"), "http://example.test/api/students");
        assert_eq!(client.endpoint("students"), "http://example.test/api/students");
        Ok(())
    }

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body("  ".to_string()), "request failed");
        assert_eq!(sanitize_body(" oops ".to_string()), "oops");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(long).len(), MAX_ERROR_CHARS);
    }

    #[tokio::test]
    async fn bearer_is_attached_when_a_token_exists() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let (client, tokens, _triggers) = test_client(&server.uri())?;
        tokens.set(SecretString::from("tok-1".to_string()))?;

        let body: Value = client.get("/user").await?;
        assert_eq!(body["ok"], json!(true));
        Ok(())
    }

    #[tokio::test]
    async fn unauthenticated_requests_carry_no_bearer() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/psgc/provinces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let (client, _, _triggers) = test_client(&server.uri())?;
        let _: Value = client.get("/psgc/provinces").await?;

        let requests = server
            .received_requests()
            .await
            .context("wiremock request recording is disabled")?;
        ensure!(
            requests
                .iter()
                .all(|request| !request.headers.contains_key("authorization")),
            "expected no Authorization header"
        );
        Ok(())
    }

    #[tokio::test]
    async fn a_401_clears_the_token_and_signals_teardown() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/students"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "nope"})))
            .mount(&server)
            .await;

        let (client, tokens, mut triggers) = test_client(&server.uri())?;
        tokens.set(SecretString::from("stale".to_string()))?;

        let result: Result<Value, ApiError> = client.get("/students").await;
        match result {
            Err(ApiError::Unauthorized { reason: None }) => {}
            other => bail!("expected a plain unauthorized error, got {other:?}"),
        }
        ensure!(!tokens.present(), "token should be cleared");
        assert_eq!(triggers.recv().await, Some(LogoutTrigger::Unauthorized));
        Ok(())
    }

    #[tokio::test]
    async fn an_inactivity_401_is_distinguished() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/students"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"logout_reason": "inactivity"})),
            )
            .mount(&server)
            .await;

        let (client, tokens, mut triggers) = test_client(&server.uri())?;
        tokens.set(SecretString::from("stale".to_string()))?;

        let result: Result<Value, ApiError> = client.get("/students").await;
        match result {
            Err(ApiError::Unauthorized {
                reason: Some(LogoutReason::Inactivity),
            }) => {}
            other => bail!("expected an inactivity unauthorized error, got {other:?}"),
        }
        ensure!(!tokens.present());
        assert_eq!(triggers.recv().await, Some(LogoutTrigger::Inactivity));
        Ok(())
    }

    #[tokio::test]
    async fn repeated_401s_are_harmless() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/students"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (client, tokens, mut triggers) = test_client(&server.uri())?;
        tokens.set(SecretString::from("stale".to_string()))?;

        for _ in 0..2 {
            let result: Result<Value, ApiError> = client.get("/students").await;
            ensure!(matches!(result, Err(ApiError::Unauthorized { .. })));
        }
        ensure!(!tokens.present());
        assert_eq!(triggers.recv().await, Some(LogoutTrigger::Unauthorized));
        assert_eq!(triggers.recv().await, Some(LogoutTrigger::Unauthorized));
        Ok(())
    }

    #[tokio::test]
    async fn non_success_statuses_surface_the_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/students"))
            .respond_with(ResponseTemplate::new(422).set_body_string("validation failed"))
            .mount(&server)
            .await;

        let (client, _, _triggers) = test_client(&server.uri())?;
        let result: Result<Value, ApiError> = client.get("/students").await;
        match result {
            Err(ApiError::Http { status: 422, message }) => {
                assert_eq!(message, "validation failed");
            }
            other => bail!("expected an HTTP error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn invalidate_session_treats_401_as_done() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (client, _, mut triggers) = test_client(&server.uri())?;
        client.invalidate_session().await?;
        // The interceptor was bypassed: no teardown signal.
        ensure!(triggers.try_recv().is_err());
        Ok(())
    }
}

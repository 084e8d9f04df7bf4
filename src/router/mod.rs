//! Route table and navigation guard. Every navigation attempt flows through
//! [`Router::navigate`]: credential presence checks first, then the route's
//! middleware chain. The chain is a read-only ordered sequence walked by an
//! index cursor: middleware receive a [`Next`] continuation and must either
//! invoke it or redirect, so nothing is skipped silently and route configs
//! are safely reused across navigations.

use crate::auth::token::TokenStore;
use crate::errors::{ApiError, ConfigError, RouterError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Name of the login route, the target of every auth redirect.
pub const LOGIN: &str = "login";
/// Name of the default authenticated landing route.
pub const HOME: &str = "home";

/// Static description of a navigable route. Components are rendered by the
/// embedding shell and play no part in guarding.
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

#[derive(Default)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_guest: bool,
    pub middleware: Vec<Arc<dyn Middleware>>,
}

/// Outcome of a guarded navigation attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    Proceed,
    Redirect(&'static str),
}

/// What a middleware sees about the navigation in flight.
pub struct GuardContext<'r> {
    pub to: &'r Route,
    pub from: Option<&'r Route>,
}

/// One unit in a route's guard chain. Implementations must either call
/// `next.run(ctx)` to continue or return a redirect to short-circuit.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(
        &self,
        ctx: &GuardContext<'_>,
        next: Next<'_>,
    ) -> Result<Decision, ApiError>;
}

/// Continuation over the remaining chain. Advancing copies the cursor; the
/// chain itself is never mutated.
pub struct Next<'a> {
    chain: &'a [Arc<dyn Middleware>],
    index: usize,
}

impl<'a> Next<'a> {
    fn new(chain: &'a [Arc<dyn Middleware>]) -> Self {
        Self { chain, index: 0 }
    }

    /// Runs the rest of the chain; resolves to `Proceed` once every
    /// middleware has continued.
    pub async fn run(self, ctx: &GuardContext<'_>) -> Result<Decision, ApiError> {
        match self.chain.get(self.index) {
            None => Ok(Decision::Proceed),
            Some(middleware) => {
                let next = Next {
                    chain: self.chain,
                    index: self.index + 1,
                };
                middleware.handle(ctx, next).await
            }
        }
    }
}

/// The canonical route table plus the credential store the guard consults.
pub struct Router {
    routes: Vec<Route>,
    tokens: Arc<TokenStore>,
}

impl Router {
    /// Validates and adopts a route table. There is exactly one table per
    /// app; duplicate paths or names and conflicting auth/guest flags are
    /// configuration errors, not runtime surprises.
    pub fn new(routes: Vec<Route>, tokens: Arc<TokenStore>) -> Result<Self, ConfigError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for route in &routes {
            if route.meta.requires_auth && route.meta.requires_guest {
                return Err(ConfigError::ConflictingRouteFlags {
                    name: route.name.to_string(),
                });
            }
            if !paths.insert(route.path) {
                return Err(ConfigError::DuplicateRoute {
                    field: "path",
                    value: route.path.to_string(),
                });
            }
            if !names.insert(route.name) {
                return Err(ConfigError::DuplicateRoute {
                    field: "name",
                    value: route.name.to_string(),
                });
            }
        }
        Ok(Self { routes, tokens })
    }

    #[must_use]
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Gates a navigation attempt.
    ///
    /// Order: authentication requirement, guest requirement, then the
    /// route's middleware chain in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown target route, or when a middleware
    /// propagates a failure instead of resolving to a decision.
    pub async fn navigate(&self, to: &str, from: Option<&str>) -> Result<Decision, RouterError> {
        let target = self
            .route(to)
            .ok_or_else(|| RouterError::UnknownRoute(to.to_string()))?;
        let from = from.and_then(|name| self.route(name));

        if target.meta.requires_auth && !self.tokens.present() {
            return Ok(Decision::Redirect(LOGIN));
        }
        if target.meta.requires_guest && self.tokens.present() {
            return Ok(Decision::Redirect(HOME));
        }

        let ctx = GuardContext { to: target, from };
        let decision = Next::new(&target.meta.middleware).run(&ctx).await?;
        debug!(to, ?decision, "navigation resolved");
        Ok(decision)
    }
}

/// The canonical route table. Guarded routes share the injected
/// auth-verification middleware; `login` is guest-only.
#[must_use]
pub fn default_routes(verify: Arc<dyn Middleware>) -> Vec<Route> {
    let guarded = |path: &'static str, name: &'static str| Route {
        path,
        name,
        meta: RouteMeta {
            requires_auth: true,
            requires_guest: false,
            middleware: vec![verify.clone()],
        },
    };

    vec![
        guarded("/", "landing"),
        Route {
            path: "/login",
            name: LOGIN,
            meta: RouteMeta {
                requires_guest: true,
                ..RouteMeta::default()
            },
        },
        guarded("/students", "students"),
        guarded("/home", HOME),
        guarded("/list", "list"),
        guarded("/dashboard", "dashboard"),
        guarded("/settings", "settings"),
        guarded("/trashbin", "trashbin"),
    ]
}

//! Authentication: credential storage, the login/introspection calls and
//! the route middleware that re-validates tokens against the API.

pub mod client;
pub mod middleware;
pub mod token;

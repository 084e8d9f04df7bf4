//! # Registra
//!
//! Client core for an administrative record-management application
//! (students, scholarships, colleges, campuses, courses, year levels)
//! backed by a remote REST API. The crate models everything beneath the
//! view layer:
//!
//! - an HTTP adapter that attaches bearer credentials and intercepts 401s,
//! - per-resource CRUD service façades,
//! - a route guard with an ordered middleware chain,
//! - an inactivity monitor with a warning phase and auto-logout,
//! - a session lifecycle coordinator shared by every logout trigger.
//!
//! Rendering is out of scope: the embedding shell issues navigation
//! attempts, feeds activity events into the monitor, and drains forced
//! navigations and notices from the channels exposed by [`app::App`].

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod router;
pub mod services;
pub mod session;

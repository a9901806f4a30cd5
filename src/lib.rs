//! Minimal MVC request dispatcher.
//!
//! URLs are matched against ordered route patterns, resolved to a
//! registered controller and action, and the action is called with the
//! route captures merged with the query string.

// Core subsystems
pub mod config;
pub mod dispatch;
pub mod http;
pub mod routing;

// Application layer
pub mod app;
pub mod controller;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::AppConfig;
pub use dispatch::{DispatchError, Dispatcher};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     route spec ("posts/{id}") + defaults (controller, action)
//!     → pattern.rs (compile to anchored, case-insensitive regex)
//!     → table.rs (append to ordered route list)
//!
//! Incoming Request:
//!     clean path ("posts/42")
//!     → table.rs (scan routes in insertion order)
//!     → Return: MatchResult (defaults + captures) or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable afterwards
//! - Deterministic: first registered match wins
//! - Parameter maps keep insertion order (`IndexMap`)

pub mod pattern;
pub mod table;

use indexmap::IndexMap;

pub use pattern::{PatternError, RoutePattern};
pub use table::{MatchResult, Route, RouteTable};

/// Ordered string parameters.
///
/// Re-inserting an existing key replaces its value and keeps its position.
pub type Params = IndexMap<String, String>;

/// Key holding the controller name in route defaults.
pub const CONTROLLER_KEY: &str = "controller";

/// Key holding the action name in route defaults.
pub const ACTION_KEY: &str = "action";

/// Build the usual `{controller, action}` defaults for a route.
pub fn defaults(controller: &str, action: &str) -> Params {
    let mut params = Params::new();
    params.insert(CONTROLLER_KEY.to_string(), controller.to_string());
    params.insert(ACTION_KEY.to_string(), action.to_string());
    params
}

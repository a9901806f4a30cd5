//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! raw URL ("/posts/42?ref=home")
//!     → http::request (ParsedRequest: path + query)
//!     → routing::table (MatchResult: defaults + captures)
//!     → dispatcher.rs (ResolvedAction: PostsController::view, merged params)
//!     → invoker.rs (registry lookup, visibility check, bind, call)
//!     → Response or DispatchError
//! ```
//!
//! # Design Decisions
//! - State machine: Received → Parsed → Matched → Resolved → Invoked
//! - Each gate fails with its own error kind
//! - No retry and no fallback route

pub mod dispatcher;
pub mod error;
pub mod invoker;
pub mod naming;

pub use dispatcher::{Dispatcher, ResolvedAction};
pub use error::DispatchError;
pub use invoker::{ActionInvoker, ControllerFactory, ControllerRegistry};

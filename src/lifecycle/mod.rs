//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build dispatcher → Start listener
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGINT/SIGTERM → Shutdown::trigger → server stops accepting → drain → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;

//! Security subsystem.
//!
//! # Responsibilities
//! - Cross-origin resource sharing policy for actions that opt in
//!
//! # Design Decisions
//! - Policies are compiled from config once at startup
//! - Actions apply CORS explicitly; the default is no CORS headers

pub mod cors;

pub use cors::CorsPolicy;

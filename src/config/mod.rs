//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route specs)
//!     → AppConfig (validated, immutable)
//!     → routes handed to the dispatcher, the rest to app services
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ApplicationConfig;
pub use schema::CorsConfig;
pub use schema::Environment;
pub use schema::I18nConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::ServerConfig;

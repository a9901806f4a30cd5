//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → session.rs (language cookie → RequestContext)
//!     → request.rs (raw URL → ParsedRequest, inside the dispatcher)
//!     → dispatcher (controller action)
//!     → response.rs (action Response → HTTP response)
//!     → session.rs (changed language → Set-Cookie)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod session;
pub mod urls;

pub use request::{MakeRequestUuid, ParsedRequest, X_REQUEST_ID};
pub use response::{Response, ResponseBody};
pub use server::HttpServer;
pub use urls::UrlBuilder;

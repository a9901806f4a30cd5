//! Dispatch error kinds.

use axum::http::StatusCode;
use thiserror::Error;

use crate::controller::ActionError;

/// Why a dispatch did not reach a successful action call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered route matches the parsed path.
    #[error("no route matched '{path}'")]
    RouteNotFound { path: String },

    /// The resolved controller identifier is not registered.
    #[error("controller {controller} not found")]
    ControllerNotFound { controller: String },

    /// The action is absent or not publicly callable.
    #[error("method {action} in controller {controller} cannot be called directly")]
    ActionNotCallable { controller: String, action: String },

    /// The action ran and failed, or its arguments could not be bound.
    #[error("action {controller}::{action} failed: {source}")]
    ActionFailed {
        controller: String,
        action: String,
        #[source]
        source: ActionError,
    },
}

impl DispatchError {
    /// HTTP status the boundary layer should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::ControllerNotFound { .. } | DispatchError::ActionNotCallable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DispatchError::ActionFailed { source, .. } => source.status_code(),
        }
    }

    /// Short label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            DispatchError::RouteNotFound { .. } => "route_not_found",
            DispatchError::ControllerNotFound { .. } => "controller_not_found",
            DispatchError::ActionNotCallable { .. } => "action_not_callable",
            DispatchError::ActionFailed { .. } => "action_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = DispatchError::RouteNotFound { path: "nope".into() };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "no route matched 'nope'");

        let missing = DispatchError::ControllerNotFound {
            controller: "UsersController".into(),
        };
        assert_eq!(missing.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let failed = DispatchError::ActionFailed {
            controller: "PostsController".into(),
            action: "view".into(),
            source: ActionError::MissingParameter("id".into()),
        };
        assert_eq!(failed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(failed.outcome(), "action_failed");
    }
}

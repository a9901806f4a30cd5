//! Controller contract.
//!
//! # Data Flow
//! ```text
//! ResolvedAction (controller id, action name, merged params)
//!     → ControllerRegistry creates the controller
//!     → Controller::action() finds the descriptor (visibility, params)
//!     → ActionArgs::bind() binds declared params by name
//!     → Controller::call() runs the action with a RequestContext
//!     → Response (HTML view, JSON, redirect)
//! ```
//!
//! # Design Decisions
//! - Controllers describe their actions instead of relying on reflection
//! - Arguments bind by name; the positional list stays available
//! - Request-scoped state (language, form, headers) lives in RequestContext

pub mod context;
pub mod translate;
pub mod view;

use axum::http::StatusCode;
use thiserror::Error;

use crate::http::Response;
use crate::routing::Params;

pub use context::{AppServices, RequestContext};
pub use translate::Translator;
pub use view::ViewRenderer;

/// Whether the dispatcher may call an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Internal,
}

/// Descriptor of a controller action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: &'static str,
    /// Parameters the action requires, bound by name.
    pub params: &'static [&'static str],
    pub visibility: Visibility,
}

impl ActionSpec {
    pub const fn public(name: &'static str, params: &'static [&'static str]) -> Self {
        Self {
            name,
            params,
            visibility: Visibility::Public,
        }
    }

    pub const fn internal(name: &'static str) -> Self {
        Self {
            name,
            params: &[],
            visibility: Visibility::Internal,
        }
    }

    pub fn is_callable(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Errors raised by actions or while binding their arguments.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A declared parameter was not supplied by the route or query.
    #[error("missing parameter '{0}'")]
    MissingParameter(String),

    /// The controller was asked for an action it does not implement.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// A view is missing or failed to render.
    #[error("view '{view}' could not be rendered: {source}")]
    View {
        view: String,
        #[source]
        source: tera::Error,
    },

    /// JSON serialization failed.
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ActionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Arguments handed to an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionArgs {
    values: Params,
    positional: Vec<String>,
}

impl ActionArgs {
    /// Bind `values` to `spec`, failing on the first missing declared param.
    pub fn bind(spec: &ActionSpec, values: Params, positional: Vec<String>) -> Result<Self, ActionError> {
        if let Some(missing) = spec.params.iter().find(|name| !values.contains_key(**name)) {
            return Err(ActionError::MissingParameter(missing.to_string()));
        }
        Ok(Self { values, positional })
    }

    /// Value of a route capture or query parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str, ActionError> {
        self.get(name)
            .ok_or_else(|| ActionError::MissingParameter(name.to_string()))
    }

    /// Captures in declaration order followed by query values in
    /// encounter order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A controller exposing named actions.
pub trait Controller: Send {
    /// Every action the controller knows, callable or not.
    fn actions(&self) -> &'static [ActionSpec];

    /// Run `action`. Only called with names taken from [`Controller::actions`].
    fn call(
        &mut self,
        action: &str,
        args: &ActionArgs,
        ctx: &mut RequestContext,
    ) -> Result<Response, ActionError>;

    /// Find an action descriptor. Lookup ignores ASCII case.
    fn action(&self, name: &str) -> Option<&'static ActionSpec> {
        self.actions()
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }
}

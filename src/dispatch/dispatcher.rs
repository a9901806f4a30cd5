//! URL to action dispatch.
//!
//! # Responsibilities
//! - Parse the raw URL into path and query
//! - Match the path against the route table
//! - Resolve controller and action identifiers
//! - Merge route captures with query parameters and invoke the action
//!
//! # Design Decisions
//! - Synchronous: no suspension points between parse and invoke
//! - Read-only after construction; each dispatch owns its intermediate values
//! - Every failure exits with a specific `DispatchError`, no fallback route

use serde::Serialize;

use super::error::DispatchError;
use super::invoker::{ActionInvoker, ControllerRegistry};
use super::naming::{controller_identifier, to_camel_case};
use crate::config::RouteConfig;
use crate::controller::RequestContext;
use crate::http::{ParsedRequest, Response};
use crate::routing::{Params, RouteTable, ACTION_KEY, CONTROLLER_KEY};

/// A matched route resolved to a controller action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAction {
    /// Controller identifier, e.g. `PostsController`.
    pub controller: String,
    /// Action name in camel case, e.g. `view`.
    pub action: String,
    /// Route captures then query parameters, `controller`/`action` removed.
    pub params: Params,
    /// Values of `params` in order.
    pub positional_args: Vec<String>,
}

/// Maps URLs to controller actions.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: RouteTable,
    invoker: ActionInvoker,
}

impl Dispatcher {
    pub fn new(routes: RouteTable, registry: ControllerRegistry) -> Self {
        Self {
            routes,
            invoker: ActionInvoker::new(registry),
        }
    }

    /// Build the route table from configured routes, in order.
    pub fn from_config(routes: &[RouteConfig], registry: ControllerRegistry) -> Self {
        let mut table = RouteTable::new();
        for route in routes {
            table.add(&route.pattern, route.defaults());
        }
        tracing::info!(routes = table.len(), controllers = ?registry.identifiers(), "Dispatcher ready");
        Self::new(table, registry)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn registry(&self) -> &ControllerRegistry {
        self.invoker.registry()
    }

    /// Parse, match and resolve `raw_url` without invoking anything.
    pub fn resolve(&self, raw_url: &str) -> Result<ResolvedAction, DispatchError> {
        let ParsedRequest { path, query } = ParsedRequest::parse(raw_url);

        let matched = self
            .routes
            .match_path(&path)
            .ok_or_else(|| DispatchError::RouteNotFound { path: path.clone() })?;

        let controller = controller_identifier(matched.controller().unwrap_or_default());
        let action = to_camel_case(matched.action().unwrap_or_default());

        tracing::debug!(path = %path, controller = %controller, action = %action, "Route matched");

        if !self.invoker.registry().contains(&controller) {
            return Err(DispatchError::ControllerNotFound { controller });
        }

        let mut params = matched.params;
        params.shift_remove(CONTROLLER_KEY);
        params.shift_remove(ACTION_KEY);
        // A query key already present as a capture overwrites it in place.
        params.extend(query);

        let positional_args = params.values().cloned().collect();

        Ok(ResolvedAction {
            controller,
            action,
            params,
            positional_args,
        })
    }

    /// Resolve `raw_url` and call the action.
    pub fn dispatch(&self, raw_url: &str, ctx: &mut RequestContext) -> Result<Response, DispatchError> {
        let resolved = self.resolve(raw_url)?;
        self.invoker.invoke(resolved, ctx)
    }
}

//! Controller registry and action invocation.
//!
//! # Responsibilities
//! - Map controller identifiers (`PostsController`) to factories
//! - Check the requested action exists and is public
//! - Bind arguments by name and call the action
//!
//! # Design Decisions
//! - Explicit registry populated at startup, no lookup by type name
//! - A fresh controller per dispatch; controllers hold no shared state
//! - Identifier and action lookups ignore ASCII case

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::dispatcher::ResolvedAction;
use super::error::DispatchError;
use crate::controller::{ActionArgs, Controller, RequestContext};
use crate::http::Response;

/// Creates a controller instance.
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Registered controllers by identifier.
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, (String, ControllerFactory)>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `identifier`, e.g. `PostsController`.
    pub fn register<F>(&mut self, identifier: &str, factory: F)
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        tracing::debug!(controller = %identifier, "Registering controller");
        self.factories.insert(
            identifier.to_ascii_lowercase(),
            (identifier.to_string(), Arc::new(factory)),
        );
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(&identifier.to_ascii_lowercase())
    }

    /// A new instance of the controller registered as `identifier`.
    pub fn create(&self, identifier: &str) -> Option<Box<dyn Controller>> {
        self.factories
            .get(&identifier.to_ascii_lowercase())
            .map(|(_, factory)| factory())
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.values().map(|(name, _)| name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.identifiers())
            .finish()
    }
}

/// Performs the existence checks and the action call.
#[derive(Debug, Clone, Default)]
pub struct ActionInvoker {
    registry: ControllerRegistry,
}

impl ActionInvoker {
    pub fn new(registry: ControllerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// Call the resolved action.
    pub fn invoke(
        &self,
        resolved: ResolvedAction,
        ctx: &mut RequestContext,
    ) -> Result<Response, DispatchError> {
        let ResolvedAction {
            controller: controller_id,
            action,
            params,
            positional_args,
        } = resolved;

        let mut controller =
            self.registry
                .create(&controller_id)
                .ok_or_else(|| DispatchError::ControllerNotFound {
                    controller: controller_id.clone(),
                })?;

        let spec = controller
            .action(&action)
            .filter(|spec| spec.is_callable())
            .ok_or_else(|| DispatchError::ActionNotCallable {
                controller: controller_id.clone(),
                action: action.clone(),
            })?;

        let failed = |source| DispatchError::ActionFailed {
            controller: controller_id.clone(),
            action: spec.name.to_string(),
            source,
        };

        let args = ActionArgs::bind(spec, params, positional_args).map_err(failed)?;

        tracing::debug!(
            controller = %controller_id,
            action = %spec.name,
            args = args.len(),
            "Invoking action"
        );

        controller.call(spec.name, &args, ctx).map_err(failed)
    }
}

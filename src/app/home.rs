//! Landing page.

use crate::controller::{ActionArgs, ActionError, ActionSpec, Controller, RequestContext};
use crate::http::Response;
use crate::routing::Params;

const ACTIONS: &[ActionSpec] = &[ActionSpec::public("index", &[])];

pub struct HomeController;

impl HomeController {
    fn index(&self, ctx: &RequestContext) -> Result<Response, ActionError> {
        let data = Params::from([
            ("heading".to_string(), ctx.translate("welcome")),
            ("intro".to_string(), ctx.translate("home_intro")),
        ]);
        ctx.render("home/index", data)
    }
}

impl Controller for HomeController {
    fn actions(&self) -> &'static [ActionSpec] {
        ACTIONS
    }

    fn call(
        &mut self,
        action: &str,
        _args: &ActionArgs,
        ctx: &mut RequestContext,
    ) -> Result<Response, ActionError> {
        match action {
            "index" => self.index(ctx),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

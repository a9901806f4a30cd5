//! Language switching.

use axum::http::Method;

use crate::controller::{ActionArgs, ActionError, ActionSpec, Controller, RequestContext};
use crate::http::Response;

const ACTIONS: &[ActionSpec] = &[ActionSpec::public("switch", &[])];

pub struct LanguageController;

impl LanguageController {
    /// `POST lang=<code>` switches to a supported language. Always redirects
    /// back to the referring page, or home when there is none.
    fn switch(&self, ctx: &mut RequestContext) -> Response {
        if *ctx.method() == Method::POST {
            if let Some(lang) = ctx.form_value("lang").map(str::to_string) {
                if !ctx.set_language(&lang) {
                    tracing::debug!(language = %lang, "Ignoring unsupported language");
                }
            }
        }

        match ctx.header("referer") {
            Some(referer) => Response::redirect(referer),
            None => ctx.redirect(""),
        }
    }
}

impl Controller for LanguageController {
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
            "switch" => Ok(self.switch(ctx)),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

//! Posts: a JSON listing and a single post page.

use serde::Serialize;

use crate::controller::{ActionArgs, ActionError, ActionSpec, Controller, RequestContext};
use crate::http::Response;
use crate::routing::Params;

const ACTIONS: &[ActionSpec] = &[
    ActionSpec::public("index", &[]),
    ActionSpec::public("view", &["id"]),
];

#[derive(Debug, Serialize)]
struct PostSummary {
    id: u32,
    title: &'static str,
}

const POSTS: &[PostSummary] = &[
    PostSummary { id: 1, title: "First Post" },
    PostSummary { id: 2, title: "Second Post" },
];

pub struct PostsController;

impl PostsController {
    /// JSON list, open to the configured CORS origins.
    fn index(&self, ctx: &RequestContext) -> Result<Response, ActionError> {
        if let Some(preflight) = ctx.cors_preflight() {
            return Ok(preflight);
        }
        let response = ctx.json(POSTS)?;
        Ok(ctx.with_cors(response))
    }

    fn view(&self, args: &ActionArgs, ctx: &RequestContext) -> Result<Response, ActionError> {
        let id = args.require("id")?;
        let heading = ctx.translate("post_title");
        let data = Params::from([
            ("title".to_string(), format!("{heading} #{id}")),
            ("heading".to_string(), heading),
            ("id".to_string(), id.to_string()),
        ]);
        ctx.render("posts/view", data)
    }
}

impl Controller for PostsController {
    fn actions(&self) -> &'static [ActionSpec] {
        ACTIONS
    }

    fn call(
        &mut self,
        action: &str,
        args: &ActionArgs,
        ctx: &mut RequestContext,
    ) -> Result<Response, ActionError> {
        match action {
            "index" => self.index(ctx),
            "view" => self.view(args, ctx),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

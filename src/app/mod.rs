//! Application controllers.
//!
//! | Identifier           | Actions            |
//! |----------------------|--------------------|
//! | `HomeController`     | `index`            |
//! | `PostsController`    | `index`, `view`    |
//! | `LanguageController` | `switch`           |

pub mod home;
pub mod language;
pub mod posts;

use crate::dispatch::ControllerRegistry;

pub use home::HomeController;
pub use language::LanguageController;
pub use posts::PostsController;

/// Registry with every application controller.
pub fn registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry.register("HomeController", || Box::new(HomeController));
    registry.register("LanguageController", || Box::new(LanguageController));
    registry.register("PostsController", || Box::new(PostsController));
    registry
}

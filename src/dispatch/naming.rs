//! Controller and action name normalization.
//!
//! Route defaults use kebab or space separated names (`blog-posts`,
//! `show all`); the registry and controllers use `BlogPostsController` and
//! `showAll`.

/// Suffix appended to a normalized controller name.
pub const CONTROLLER_SUFFIX: &str = "Controller";

/// `blog-posts` → `BlogPosts`.
///
/// Hyphens and whitespace separate tokens. The first character of each token
/// is upper-cased, the rest is kept as written.
pub fn to_studly_caps(name: &str) -> String {
    name.split(|c: char| c == '-' || c.is_whitespace())
        .flat_map(|token| {
            let mut chars = token.chars();
            chars
                .next()
                .into_iter()
                .flat_map(char::to_uppercase)
                .chain(chars)
        })
        .collect()
}

/// `show-all` → `showAll`.
pub fn to_camel_case(name: &str) -> String {
    let studly = to_studly_caps(name);
    let mut chars = studly.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `blog-posts` → `BlogPostsController`.
pub fn controller_identifier(name: &str) -> String {
    format!("{}{}", to_studly_caps(name), CONTROLLER_SUFFIX)
}

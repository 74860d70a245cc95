//! MiniJinja environment holding the built-in template sources.
//!
//! The sources are embedded at compile time and registered once into a
//! process-wide environment. The environment is never mutated after that,
//! so concurrent renders share it without locking.
//!
//! Autoescaping is off: the composer escapes user text itself (see
//! [`crate::compose::escape_html`]), and MiniJinja's HTML escaper would also
//! rewrite `/` in URLs.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::RenderError;

/// Embedded sources as `(name, source)` pairs.
///
/// `head.jinja` and `macros.jinja` are partials; the rest are entry points
/// named after their template id.
const SOURCES: &[(&str, &str)] = &[
    ("head.jinja", include_str!("../../templates/head.jinja")),
    ("macros.jinja", include_str!("../../templates/macros.jinja")),
    ("minimal.jinja", include_str!("../../templates/minimal.jinja")),
    (
        "professional-plus.jinja",
        include_str!("../../templates/professional-plus.jinja"),
    ),
    (
        "modern-gradient.jinja",
        include_str!("../../templates/modern-gradient.jinja"),
    ),
    (
        "compact-horizontal.jinja",
        include_str!("../../templates/compact-horizontal.jinja"),
    ),
    (
        "compact-vertical.jinja",
        include_str!("../../templates/compact-vertical.jinja"),
    ),
];

static ENVIRONMENT: Lazy<Environment<'static>> = Lazy::new(build_environment);

fn build_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);

    for &(name, source) in SOURCES {
        // A broken source leaves the name unregistered; rendering it then
        // reports the failure through `RenderError::Template`.
        if let Err(err) = env.add_template(name, source) {
            tracing::error!(template = name, error = %err, "failed to compile embedded template");
        }
    }
    env
}

/// Renders the embedded template `name` with `context`.
pub(crate) fn render_source<S: Serialize>(name: &str, context: S) -> Result<String, RenderError> {
    let template = ENVIRONMENT.get_template(name)?;
    Ok(template.render(context)?)
}

/// Names of all embedded sources, partials included.
pub(crate) fn source_names() -> impl Iterator<Item = &'static str> {
    SOURCES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_sources_compile() {
        for name in source_names() {
            assert!(
                ENVIRONMENT.get_template(name).is_ok(),
                "embedded template {} failed to compile",
                name
            );
        }
    }

    #[test]
    fn test_missing_source_is_template_error() {
        let err = render_source("nope.jinja", json!({})).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }

    #[test]
    fn test_head_partial_renders_hooks() {
        let out = render_source(
            "head.jinja",
            json!({
                "gradient": false,
                "colors": {
                    "text": "#333333",
                    "text_dark": "#f5f5f5",
                    "link": "#1a73e8",
                    "link_dark": "#91add4"
                }
            }),
        )
        .unwrap();
        assert!(out.contains(r#"<meta name="color-scheme" content="light dark">"#));
        assert!(out.contains("@media (prefers-color-scheme: dark) {"));
        assert!(out.contains("[data-ogsc] .dark-text { color: #f5f5f5 !important; }"));
        assert!(out.contains("[data-ogsb] .dark-link { color: #91add4 !important; }"));
        assert!(!out.contains("gradient-line"));
    }

    #[test]
    fn test_strict_undefined() {
        let err = render_source("head.jinja", json!({ "gradient": false }));
        assert!(err.is_err());
    }
}

//! Error types for signature rendering and color evaluation.
//!
//! The core has two failure modes only: asking for a template that is not in
//! the registry, and handing a malformed color to the contrast evaluator.
//! Everything else (missing optional fields, odd user text) is absorbed by
//! the composer and never surfaces as an error.

use thiserror::Error;

/// Error type for template rendering operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Template id is not one of the built-in templates.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// The template engine rejected an embedded template.
    ///
    /// Embedded templates are fixed at compile time, so this indicates a
    /// broken build rather than bad input.
    #[error("template error: {0}")]
    Template(String),
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        RenderError::Template(err.to_string())
    }
}

/// Error returned when a color string is not a `#rrggbb` hex value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),
}

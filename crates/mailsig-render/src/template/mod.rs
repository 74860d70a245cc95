//! Template registry and renderer.
//!
//! Five layouts are built in. They share one head partial, which carries
//! the dark-mode targeting surface real clients look for:
//!
//! - `<meta name="color-scheme" content="light dark">`
//! - an `@media (prefers-color-scheme: dark)` block
//! - `[data-ogsc]` / `[data-ogsb]` attribute-selector rules
//!
//! Every colored element in the body carries its light color inline *and* a
//! class hook (`dark-text`, `dark-link`, `light-img`, `dark-img`,
//! `gradient-line`). Inline styles are the baseline for clients with no
//! dark-mode support; the hooks are what the stylesheet overrides in clients
//! that have it.
//!
//! ## Rendering
//!
//! ```rust
//! use mailsig_render::{render, SignatureData};
//!
//! let data = SignatureData {
//!     name: "Ana Lee".into(),
//!     company: "Acme".into(),
//!     email: "a@acme.com".into(),
//!     ..SignatureData::default()
//! };
//! let html = render("minimal", &data).unwrap();
//! assert!(html.contains(r#"href="mailto:a@acme.com""#));
//! ```
//!
//! ## Key Types
//!
//! - [`Template`]: one registry entry, renders [`SignatureData`](crate::SignatureData)
//! - [`TemplateRegistry`]: the fixed id → template table, see [`registry`]

mod engine;
pub mod registry;

pub use registry::{registry, Template, TemplateRegistry};

use crate::data::SignatureData;
use crate::error::RenderError;

/// Renders `data` with the template named `template_id`.
///
/// # Errors
///
/// Returns [`RenderError::UnknownTemplate`] if the id is not built in.
pub fn render(template_id: &str, data: &SignatureData) -> Result<String, RenderError> {
    registry().get(template_id)?.render(data)
}

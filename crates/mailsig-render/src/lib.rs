//! # Mailsig Render - Email Signatures for Light and Dark Clients
//!
//! `mailsig-render` turns a [`SignatureData`] record into a self-contained
//! HTML email signature that reads correctly whether the mail client
//! renders it light, dark, or ignores color schemes entirely.
//!
//! ## Core Concepts
//!
//! - [`render`]: signature data + template id → shippable HTML, with the
//!   dark-mode stylesheet embedded for clients that honor it
//! - [`to_preview`]: bakes the light or dark palette into inline styles for
//!   surfaces that do not evaluate `prefers-color-scheme`
//! - [`contrast_ratio`] / [`ContrastReport`]: WCAG 2.x contrast of the
//!   configured colors against the preview backgrounds
//! - [`Export`]: the download and clipboard payloads
//!
//! Everything here is pure and synchronous. Renders share a read-only
//! template registry and can run concurrently.
//!
//! ## Quick Start
//!
//! ```rust
//! use mailsig_render::{render, to_preview, ColorMode, SignatureData};
//!
//! let data = SignatureData {
//!     name: "Ana Lee".into(),
//!     company: "Acme".into(),
//!     email: "a@acme.com".into(),
//!     text_color: "#333333".into(),
//!     text_color_dark: "#eeeeee".into(),
//!     ..SignatureData::default()
//! };
//!
//! let html = render("minimal", &data).unwrap();
//! assert!(html.contains("@media (prefers-color-scheme: dark)"));
//!
//! let dark = to_preview(&html, &data, ColorMode::Dark);
//! assert!(dark.contains("color: #eeeeee;"));
//! assert!(!dark.contains("prefers-color-scheme: dark"));
//! ```
//!
//! ## Contrast
//!
//! ```rust
//! use mailsig_render::{contrast_ratio, ContrastGrade};
//!
//! let ratio = contrast_ratio("#000000", "#ffffff").unwrap();
//! assert!((ratio - 21.0).abs() < 1e-9);
//! assert_eq!(ContrastGrade::from_ratio(ratio), ContrastGrade::Aaa);
//! ```

pub mod color;
pub mod compose;
mod data;
mod error;
pub mod export;
mod palette;
pub mod preview;
pub mod template;

pub use color::{
    contrast_ratio, relative_luminance, ContrastCheck, ContrastGrade, ContrastReport, Rgb,
};
pub use data::SignatureData;
pub use error::{ColorError, RenderError};
pub use export::{Export, DOWNLOAD_FILE_NAME};
pub use palette::{ColorMode, Palette};
pub use preview::{plain_text, to_preview};
pub use template::{registry, render, Template, TemplateRegistry};

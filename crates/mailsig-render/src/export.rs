//! Output payloads handed to the outside world.
//!
//! A signature leaves the renderer in one of three ways:
//!
//! - downloaded as a file named [`DOWNLOAD_FILE_NAME`]
//! - copied as raw HTML for a mail client's HTML source editor
//! - copied "as rendered", which puts the light preview on the clipboard as
//!   `text/html` and its visible text as `text/plain`
//!
//! The first two carry the shippable document unchanged. Only the third
//! goes through the preview transformer.

use serde::Serialize;

use crate::data::SignatureData;
use crate::error::RenderError;
use crate::palette::ColorMode;
use crate::preview::{plain_text, to_preview};
use crate::template::registry;

/// File name used when the shippable HTML is saved.
pub const DOWNLOAD_FILE_NAME: &str = "email-signature.html";

/// A clipboard or file payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    /// `text/html` content.
    pub html: String,
    /// `text/plain` content, present for rendered copies only.
    pub plain: Option<String>,
}

impl Export {
    /// The shippable document, with its dark-mode rules intact.
    pub fn shippable(template_id: &str, data: &SignatureData) -> Result<Self, RenderError> {
        let html = registry().get(template_id)?.render(data)?;
        Ok(Self { html, plain: None })
    }

    /// The "copy as rendered" payload: light preview plus plain text.
    pub fn rendered(template_id: &str, data: &SignatureData) -> Result<Self, RenderError> {
        let shippable = registry().get(template_id)?.render(data)?;
        let html = to_preview(&shippable, data, ColorMode::Light);
        let plain = plain_text(&html);
        Ok(Self {
            html,
            plain: Some(plain),
        })
    }
}

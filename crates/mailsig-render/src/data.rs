//! Signature input record.
//!
//! [`SignatureData`] is what the form collects. It is passed by reference
//! into every render and never mutated by the engine. Field names serialize
//! in camelCase so a form payload (`logoDarkUrl`, `textColorDark`, ...)
//! deserializes directly.

use serde::{Deserialize, Serialize};

use crate::palette::Palette;

/// Default light text color.
pub const DEFAULT_TEXT_COLOR: &str = "#005a70";
/// Default dark text color.
pub const DEFAULT_TEXT_COLOR_DARK: &str = "#d3f1f8";
/// Default light link color.
pub const DEFAULT_LINK_COLOR: &str = "#007e9e";
/// Default dark link color.
pub const DEFAULT_LINK_COLOR_DARK: &str = "#54bfd9";

/// Structured signature data.
///
/// `name` and `email` are expected but not enforced. Every other text field
/// is optional: an empty string suppresses the matching markup. Colors are
/// assumed to be `#rrggbb`; the renderer inserts them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureData {
    pub name: String,
    pub title: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub logo_url: String,
    pub logo_dark_url: String,
    pub text_color: String,
    pub text_color_dark: String,
    pub link_color: String,
    pub link_color_dark: String,
}

impl Default for SignatureData {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            company: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            logo_url: String::new(),
            logo_dark_url: String::new(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            text_color_dark: DEFAULT_TEXT_COLOR_DARK.to_string(),
            link_color: DEFAULT_LINK_COLOR.to_string(),
            link_color_dark: DEFAULT_LINK_COLOR_DARK.to_string(),
        }
    }
}

impl SignatureData {
    /// The prefilled record the form starts from.
    pub fn sample() -> Self {
        Self {
            name: "Elodie Remy".to_string(),
            email: "contact@gwarell.fr".to_string(),
            phone: "06 06 06 06 06".to_string(),
            website: "www.gwarell.fr".to_string(),
            logo_url: "https://www.gwarell.fr/gwarell-logo-light@2x.png".to_string(),
            logo_dark_url: "https://www.gwarell.fr/gwarell-logo-dark@2x.png".to_string(),
            ..Self::default()
        }
    }

    /// Whether a logo URL is set.
    pub fn has_logo(&self) -> bool {
        !self.logo_url.is_empty()
    }

    /// Logo shown in dark mode, falling back to the light logo.
    pub fn logo_dark_url(&self) -> &str {
        if self.logo_dark_url.is_empty() {
            &self.logo_url
        } else {
            &self.logo_dark_url
        }
    }

    /// The four configured colors.
    pub fn palette(&self) -> Palette {
        Palette {
            text: self.text_color.clone(),
            text_dark: self.text_color_dark.clone(),
            link: self.link_color.clone(),
            link_dark: self.link_color_dark.clone(),
        }
    }
}

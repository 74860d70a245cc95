//! WCAG contrast evaluation.
//!
//! Implements the WCAG 2.x relative luminance and contrast ratio formulas,
//! and grades the signature palette against the preview backgrounds.
//!
//! # Example
//!
//! ```rust
//! use mailsig_render::color::{contrast_ratio, ContrastGrade};
//!
//! let ratio = contrast_ratio("#000000", "#ffffff").unwrap();
//! assert!((ratio - 21.0).abs() < 1e-6);
//! assert_eq!(ContrastGrade::from_ratio(ratio), ContrastGrade::Aaa);
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::ColorError;
use crate::palette::{ColorMode, Palette};

/// Background the light preview is judged against.
pub const LIGHT_BACKGROUND: &str = "#ffffff";
/// Background the dark preview is judged against.
pub const DARK_BACKGROUND: &str = "#1a1a1a";

/// Minimum ratio for AA body text.
pub const AA_THRESHOLD: f64 = 4.5;
/// Minimum ratio for AAA body text.
pub const AAA_THRESHOLD: f64 = 7.0;

/// An 8-bit RGB triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses a `#rrggbb` hex string. Shorthand and named colors are rejected.
    pub fn from_hex(value: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidColor(value.to_string());
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Linearizes an 8-bit sRGB channel.
///
/// Uses the 0.03928 knee of the WCAG definition, not the 0.04045 of sRGB.
fn linearize(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of a color, in `0.0..=1.0`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.0) + 0.7152 * linearize(rgb.1) + 0.0722 * linearize(rgb.2)
}

/// Contrast ratio between two `#rrggbb` colors, in `1.0..=21.0`.
///
/// Symmetric in its arguments.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColor`] if either argument is not a 6-digit
/// hex color.
pub fn contrast_ratio(a: &str, b: &str) -> Result<f64, ColorError> {
    let la = relative_luminance(Rgb::from_hex(a)?);
    let lb = relative_luminance(Rgb::from_hex(b)?);
    Ok((la.max(lb) + 0.05) / (la.min(lb) + 0.05))
}

/// WCAG conformance band for a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ContrastGrade {
    Fail,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl ContrastGrade {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= AAA_THRESHOLD {
            ContrastGrade::Aaa
        } else if ratio >= AA_THRESHOLD {
            ContrastGrade::Aa
        } else {
            ContrastGrade::Fail
        }
    }

    /// Whether the ratio is legible for body text (AA or better).
    pub fn passes(self) -> bool {
        self >= ContrastGrade::Aa
    }
}

impl fmt::Display for ContrastGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContrastGrade::Fail => "Fail",
            ContrastGrade::Aa => "AA",
            ContrastGrade::Aaa => "AAA",
        })
    }
}

/// One graded foreground/background pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastCheck {
    pub label: &'static str,
    pub mode: ColorMode,
    pub foreground: String,
    pub background: &'static str,
    pub ratio: f64,
    pub grade: ContrastGrade,
}

impl ContrastCheck {
    fn evaluate(
        label: &'static str,
        mode: ColorMode,
        foreground: &str,
        background: &'static str,
    ) -> Result<Self, ColorError> {
        let ratio = contrast_ratio(foreground, background)?;
        Ok(Self {
            label,
            mode,
            foreground: foreground.to_string(),
            background,
            ratio,
            grade: ContrastGrade::from_ratio(ratio),
        })
    }

    /// Ratio formatted the way the form shows it, e.g. `4.5:1`.
    pub fn ratio_label(&self) -> String {
        format!("{:.1}:1", self.ratio)
    }
}

/// Contrast of the text and link colors in both modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastReport {
    pub checks: Vec<ContrastCheck>,
}

impl ContrastReport {
    /// Grades light colors against [`LIGHT_BACKGROUND`] and dark colors
    /// against [`DARK_BACKGROUND`].
    pub fn for_palette(palette: &Palette) -> Result<Self, ColorError> {
        let mut checks = Vec::with_capacity(4);
        for (mode, background) in [
            (ColorMode::Light, LIGHT_BACKGROUND),
            (ColorMode::Dark, DARK_BACKGROUND),
        ] {
            checks.push(ContrastCheck::evaluate("text", mode, palette.text(mode), background)?);
            checks.push(ContrastCheck::evaluate("link", mode, palette.link(mode), background)?);
        }
        Ok(Self { checks })
    }

    /// Whether every check reaches AA.
    pub fn all_pass(&self) -> bool {
        self.checks.iter().all(|c| c.grade.passes())
    }
}

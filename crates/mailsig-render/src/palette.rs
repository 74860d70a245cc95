//! Light/dark color modes and the four-color signature palette.
//!
//! A signature defines each color twice: once for light rendering, once for
//! dark. Nothing else varies between modes, so the palette is the whole of
//! the "theme".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color mode a preview is forced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// Returns the lowercase name used in CLI flags and payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(format!("unknown color mode '{}' (expected light or dark)", other)),
        }
    }
}

/// The text and link colors of a signature, for both modes.
///
/// Values are `#rrggbb` strings exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub text: String,
    pub text_dark: String,
    pub link: String,
    pub link_dark: String,
}

impl Palette {
    /// Text color for the given mode.
    pub fn text(&self, mode: ColorMode) -> &str {
        match mode {
            ColorMode::Light => &self.text,
            ColorMode::Dark => &self.text_dark,
        }
    }

    /// Link color for the given mode.
    pub fn link(&self, mode: ColorMode) -> &str {
        match mode {
            ColorMode::Light => &self.link,
            ColorMode::Dark => &self.link_dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette {
            text: "#333333".into(),
            text_dark: "#f5f5f5".into(),
            link: "#1a73e8".into(),
            link_dark: "#91add4".into(),
        }
    }

    #[test]
    fn test_mode_selects_variant() {
        let p = palette();
        assert_eq!(p.text(ColorMode::Light), "#333333");
        assert_eq!(p.text(ColorMode::Dark), "#f5f5f5");
        assert_eq!(p.link(ColorMode::Light), "#1a73e8");
        assert_eq!(p.link(ColorMode::Dark), "#91add4");
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("dark".parse::<ColorMode>(), Ok(ColorMode::Dark));
        assert_eq!(" Light ".parse::<ColorMode>(), Ok(ColorMode::Light));
        assert!("dim".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_mode_display_roundtrip() {
        for mode in [ColorMode::Light, ColorMode::Dark] {
            assert_eq!(mode.to_string().parse::<ColorMode>(), Ok(mode));
        }
    }
}

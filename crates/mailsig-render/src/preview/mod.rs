//! Forced-mode preview transformer.
//!
//! Preview surfaces do not reliably evaluate `prefers-color-scheme` against
//! injected markup, so the preview bakes one palette into the inline styles
//! of an already-rendered document instead. The shippable document is never
//! modified; [`to_preview`] returns a new string.
//!
//! The rewrite is scoped to attributes. Each start tag is tokenized, and
//! only its `style` and `class` values are edited:
//!
//! 1. Dark-mode stylesheet rules are removed from every `<style>` element.
//! 2. Dark mode: light text and link colors in `color` declarations become
//!    their dark counterparts, the gradient stop follows the link color,
//!    the light logo is force-hidden and the dark logo container shown.
//! 3. Light mode: the light logo is force-shown, the dark logo container
//!    collapsed, and the `dark-text` / `dark-link` hooks are removed so no
//!    leftover rule can override the inline colors.
//!
//! Tags that are not changed are copied byte for byte.

mod css;
mod html;
mod text;

pub use text::plain_text;

use tracing::{debug, trace};

use self::css::{recolor, strip_dark_rules, InlineStyle};
use self::html::{StartTag, Token, Tokenizer};
use crate::data::SignatureData;
use crate::palette::{ColorMode, Palette};

/// Class on the light-mode logo `<img>`.
pub const LIGHT_IMG_CLASS: &str = "light-img";
/// Class on the container wrapping the dark-mode logo.
pub const DARK_IMG_CLASS: &str = "dark-img";
/// Class on text elements recolored in dark mode.
pub const DARK_TEXT_CLASS: &str = "dark-text";
/// Class on links recolored in dark mode.
pub const DARK_LINK_CLASS: &str = "dark-link";

const LIGHT_IMG_HIDDEN: &str =
    "display:none !important; margin:0 !important; padding:0 !important; height:0 !important;";
const DARK_IMG_COLLAPSED: &str = "display:none !important; height:0 !important; max-height:0 !important; margin:0 !important; padding:0 !important; overflow:hidden !important;";

/// Which palette a `color` declaration is mapped from first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorRole {
    Text,
    Link,
}

/// Rewrites a rendered signature for forced-mode display.
///
/// `data` supplies the palette whose literal values appear in `html`.
/// Output is deterministic for identical input.
pub fn to_preview(html: &str, data: &SignatureData, mode: ColorMode) -> String {
    let rewriter = Rewriter {
        palette: data.palette(),
        mode,
    };

    let mut out = String::with_capacity(html.len());
    let mut edited = 0usize;
    let mut in_style = false;
    for token in Tokenizer::new(html) {
        match token {
            Token::StartTag(tag) => {
                in_style = tag.is("style");
                match rewriter.rewrite_tag(tag) {
                    Rewrite::Unchanged(raw) => out.push_str(raw),
                    Rewrite::Edited(tag) => {
                        edited += 1;
                        out.push_str(&tag);
                    }
                }
            }
            Token::RawText(css) if in_style => out.push_str(&strip_dark_rules(css)),
            other => out.push_str(other.raw()),
        }
    }

    debug!(mode = %mode, edited_tags = edited, bytes = out.len(), "built preview");
    out
}

enum Rewrite<'a> {
    Unchanged(&'a str),
    Edited(String),
}

struct Rewriter {
    palette: Palette,
    mode: ColorMode,
}

impl Rewriter {
    fn rewrite_tag<'a>(&self, mut tag: StartTag<'a>) -> Rewrite<'a> {
        let changed = match self.mode {
            ColorMode::Dark => self.force_dark(&mut tag),
            ColorMode::Light => self.force_light(&mut tag),
        };
        if !changed {
            return Rewrite::Unchanged(tag.raw);
        }
        trace!(tag = tag.name, mode = %self.mode, "rewrote tag");
        Rewrite::Edited(tag.to_string())
    }

    fn force_dark(&self, tag: &mut StartTag<'_>) -> bool {
        if tag.has_class(LIGHT_IMG_CLASS) {
            tag.set_attr("style", LIGHT_IMG_HIDDEN);
            return true;
        }

        let Some(source) = tag.attr("style") else {
            return false;
        };
        let mut style = InlineStyle::parse(source);

        let role = if tag.has_class(DARK_LINK_CLASS) {
            Some(ColorRole::Link)
        } else if tag.has_class(DARK_TEXT_CLASS) {
            Some(ColorRole::Text)
        } else {
            None
        };
        let mut changed = self.recolor_dark(&mut style, role);

        if tag.has_class(DARK_IMG_CLASS) {
            style.set("display", "block");
            style.set("overflow", "visible");
            style.set("max-height", "none");
            changed = true;
        }

        if changed {
            tag.set_attr("style", style.to_string());
        }
        changed
    }

    fn recolor_dark(&self, style: &mut InlineStyle, role: Option<ColorRole>) -> bool {
        let p = &self.palette;
        let text = (p.text.as_str(), p.text_dark.as_str());
        let link = (p.link.as_str(), p.link_dark.as_str());
        let color_pairs = match role {
            Some(ColorRole::Link) => [link, text],
            Some(ColorRole::Text) | None => [text, link],
        };

        style.rewrite(|property, value| match property {
            "color" => recolor(value, &color_pairs),
            "background" | "background-image" | "background-color" => recolor(value, &[link]),
            _ => None,
        })
    }

    fn force_light(&self, tag: &mut StartTag<'_>) -> bool {
        let mut changed = false;

        if tag.has_class(LIGHT_IMG_CLASS) {
            let mut style = tag.attr("style").map(InlineStyle::parse).unwrap_or_default();
            style.set("display", "block !important");
            tag.set_attr("style", style.to_string());
            changed = true;
        }
        if tag.has_class(DARK_IMG_CLASS) {
            tag.set_attr("style", DARK_IMG_COLLAPSED);
            changed = true;
        }

        if let Some(classes) = tag.attr("class") {
            let kept: Vec<&str> = classes
                .split_ascii_whitespace()
                .filter(|c| *c != DARK_TEXT_CLASS && *c != DARK_LINK_CLASS)
                .collect();
            if kept.len() != classes.split_ascii_whitespace().count() {
                if kept.is_empty() {
                    tag.remove_attr("class");
                } else {
                    let kept = kept.join(" ");
                    tag.set_attr("class", kept);
                }
                changed = true;
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> SignatureData {
        SignatureData {
            name: "Ana Lee".into(),
            email: "a@acme.com".into(),
            text_color: "#333333".into(),
            text_color_dark: "#eeeeee".into(),
            link_color: "#1a73e8".into(),
            link_color_dark: "#8ab4f8".into(),
            ..SignatureData::default()
        }
    }

    fn dark(html: &str) -> String {
        to_preview(html, &data(), ColorMode::Dark)
    }

    fn light(html: &str) -> String {
        to_preview(html, &data(), ColorMode::Light)
    }

    mod stylesheet {
        use super::*;

        #[test]
        fn dark_rules_removed_in_both_modes() {
            let html = "<style>a { b: c; } @media (prefers-color-scheme: dark) { .dark-text { color: #eeeeee; } } [data-ogsc] .dark-text { color: #eeeeee; }</style>";
            for out in [dark(html), light(html)] {
                assert_eq!(out, "<style>a { b: c; }</style>");
            }
        }

        #[test]
        fn text_outside_style_is_untouched() {
            let html = "<p>@media (prefers-color-scheme: dark) #333333</p>";
            assert_eq!(dark(html), html);
        }
    }

    mod dark_mode {
        use super::*;

        #[test]
        fn recolors_by_class() {
            let out = dark(
                r#"<span style="color: #333333;" class="dark-text">x</span><a style="color: #1a73e8; text-decoration: underline;" class="dark-link">y</a>"#,
            );
            assert_eq!(
                out,
                r#"<span style="color: #eeeeee;" class="dark-text">x</span><a style="color: #8ab4f8; text-decoration: underline;" class="dark-link">y</a>"#
            );
        }

        #[test]
        fn untagged_element_maps_text_first() {
            let out = dark(r#"<table style="font-size: 12px; color: #333333;">"#);
            assert_eq!(out, r#"<table style="font-size: 12px; color: #eeeeee;">"#);
        }

        #[test]
        fn no_chained_replacement() {
            let mut d = data();
            // Dark text equals light link.
            d.text_color_dark = "#1a73e8".into();
            let out = to_preview(
                r#"<span style="color: #333333;" class="dark-text">x</span>"#,
                &d,
                ColorMode::Dark,
            );
            assert!(out.contains("color: #1a73e8;"));
        }

        #[test]
        fn equal_text_and_link_colors() {
            let mut d = data();
            d.link_color = "#333333".into();
            let out = to_preview(
                r#"<span style="color: #333333;" class="dark-text"></span><a style="color: #333333;" class="dark-link"></a>"#,
                &d,
                ColorMode::Dark,
            );
            assert!(out.contains(r#"<span style="color: #eeeeee;""#));
            assert!(out.contains(r#"<a style="color: #8ab4f8;""#));
        }

        #[test]
        fn attribute_values_outside_style_untouched() {
            let html = r##"<a href="#333333" title="color: #333333" style="margin: 0;">x</a>"##;
            assert_eq!(dark(html), html);
        }

        #[test]
        fn gradient_stop_follows_link() {
            let out = dark(
                r#"<div class="gradient-line" style="height: 2px; background: linear-gradient(90deg, #1a73e8 0%, transparent 100%);">"#,
            );
            assert!(out.contains("linear-gradient(90deg, #8ab4f8 0%, transparent 100%)"));
            assert!(!out.contains("#1a73e8"));
        }

        #[test]
        fn image_visibility_inverted() {
            let out = dark(
                r#"<img class="light-img" src="l.png" style="display: block; max-width: 90px;"><div class="dark-img" style="display: none; overflow: hidden; max-height: 0px; margin-bottom: 12px;">"#,
            );
            assert!(out.contains(&format!(
                r#"<img class="light-img" src="l.png" style="{}">"#,
                LIGHT_IMG_HIDDEN
            )));
            assert!(out.contains(
                r#"<div class="dark-img" style="display: block; overflow: visible; max-height: none; margin-bottom: 12px;">"#
            ));
        }

        #[test]
        fn unrelated_tags_copied_verbatim() {
            let html = "<td   valign=top style='padding:0'>";
            assert_eq!(dark(html), html);
        }
    }

    mod light_mode {
        use super::*;

        #[test]
        fn keeps_colors_and_strips_hooks() {
            let out = light(
                r#"<a href="mailto:a@acme.com" style="color: #1a73e8;" class="dark-link mobile-block">a</a><span style="color: #333333;" class="dark-text">b</span>"#,
            );
            assert_eq!(
                out,
                r#"<a href="mailto:a@acme.com" style="color: #1a73e8;" class="mobile-block">a</a><span style="color: #333333;">b</span>"#
            );
        }

        #[test]
        fn image_visibility_forced() {
            let out = light(
                r#"<img class="light-img" style="display: block; border: 0;"><div class="dark-img" style="display: none; overflow: hidden; max-height: 0px;">"#,
            );
            assert!(out.contains(
                r#"<img class="light-img" style="display: block !important; border: 0;">"#
            ));
            assert!(out.contains(&format!(
                r#"<div class="dark-img" style="{}">"#,
                DARK_IMG_COLLAPSED
            )));
        }

        #[test]
        fn light_img_without_style_gets_one() {
            let out = light(r#"<img class="light-img" src="x">"#);
            assert_eq!(
                out,
                r#"<img class="light-img" src="x" style="display: block !important;">"#
            );
        }
    }
}

//! Plain-text fallback for clipboard export.

use super::css::InlineStyle;
use super::html::{StartTag, Token, Tokenizer};

/// Elements that start a new line.
const BLOCK_ELEMENTS: &[&str] = &["div", "p", "tr", "br", "table", "li", "h1", "h2", "h3"];

/// Extracts the visible text of a rendered signature, roughly as a browser's
/// `innerText` would.
///
/// The head, comments and style content are dropped. So is everything
/// inside an element hidden with `display: none`, which is how the dark
/// logo container sits in light rendering. Whitespace collapses to single
/// spaces, block elements break lines, and blank lines are removed.
pub fn plain_text(html: &str) -> String {
    let mut text = TextBuilder::default();
    let mut in_head = false;
    let mut hidden: Option<Hidden> = None;

    for token in Tokenizer::new(html) {
        if let Some(h) = hidden.as_mut() {
            if h.closes(&token) {
                hidden = None;
            }
            continue;
        }

        match token {
            Token::StartTag(tag) if tag.is("head") => in_head = true,
            Token::EndTag { name, .. } if name.eq_ignore_ascii_case("head") => in_head = false,
            _ if in_head => {}
            Token::StartTag(tag) => {
                if is_hidden(&tag) {
                    if !tag.is_void() {
                        hidden = Some(Hidden::new(tag.name));
                    }
                    continue;
                }
                if is_block(tag.name) {
                    text.line_break();
                }
            }
            Token::EndTag { name, .. } => {
                if is_block(name) {
                    text.line_break();
                }
            }
            Token::Text(raw) => text.push(&decode_entities(raw)),
            Token::RawText(_) | Token::Comment(_) | Token::Declaration(_) => {}
        }
    }

    text.finish()
}

fn is_block(name: &str) -> bool {
    BLOCK_ELEMENTS.iter().any(|b| name.eq_ignore_ascii_case(b))
}

fn is_hidden(tag: &StartTag<'_>) -> bool {
    tag.attr("style")
        .map(InlineStyle::parse)
        .and_then(|style| {
            style
                .get("display")
                .map(|d| d.trim_start().to_ascii_lowercase().starts_with("none"))
        })
        .unwrap_or(false)
}

/// Tracks nesting of the hidden element's own tag name.
struct Hidden {
    name: String,
    depth: usize,
}

impl Hidden {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            depth: 1,
        }
    }

    /// Consumes `token`; true when it closes the hidden element.
    fn closes(&mut self, token: &Token<'_>) -> bool {
        match token {
            Token::StartTag(tag) if tag.is(&self.name) && !tag.is_void() => {
                self.depth += 1;
                false
            }
            Token::EndTag { name, .. } if name.eq_ignore_ascii_case(&self.name) => {
                self.depth -= 1;
                self.depth == 0
            }
            _ => false,
        }
    }
}

#[derive(Default)]
struct TextBuilder {
    out: String,
    pending_space: bool,
}

impl TextBuilder {
    fn push(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !self.out.is_empty() && !self.out.ends_with('\n') {
                self.out.push(' ');
            }
            self.pending_space = false;
            self.out.push(c);
        }
    }

    fn line_break(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.pending_space = false;
    }

    fn finish(self) -> String {
        self.out
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Decodes the named entities the composer and templates emit, plus
/// numeric references. Unknown entities are left as written.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            decode_entity(entity).map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, len)) => {
                out.push(c);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

//! Minimal HTML tokenizer for rewriting rendered signatures.
//!
//! This is not an HTML parser. It splits a document into text, markup and
//! start tags, and parses start-tag attributes so callers can edit `style`
//! and `class` values in place. Everything it does not edit is passed
//! through byte for byte via the token's raw slice.
//!
//! The contents of `<style>` and `<script>` are emitted as a single
//! [`Token::RawText`], so CSS never gets mistaken for markup.

use std::fmt;

/// Elements whose content is raw text.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

/// Elements that never have an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Character data between tags.
    Text(&'a str),
    /// Contents of a raw-text element (`<style>`, `<script>`).
    RawText(&'a str),
    /// Comment, including conditional comments such as `<!--[if !mso]><!-->`.
    Comment(&'a str),
    /// Doctype or processing instruction.
    Declaration(&'a str),
    StartTag(StartTag<'a>),
    EndTag { raw: &'a str, name: &'a str },
}

impl<'a> Token<'a> {
    /// The token's source text.
    pub(crate) fn raw(&self) -> &'a str {
        match self {
            Token::Text(raw)
            | Token::RawText(raw)
            | Token::Comment(raw)
            | Token::Declaration(raw)
            | Token::EndTag { raw, .. } => *raw,
            Token::StartTag(tag) => tag.raw,
        }
    }
}

/// A parsed start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StartTag<'a> {
    pub raw: &'a str,
    pub name: &'a str,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

/// One attribute. `value` is kept as written (entities are not decoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
    pub name: String,
    pub value: Option<String>,
    quote: Option<char>,
}

impl<'a> StartTag<'a> {
    pub(crate) fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    /// Sets an attribute value, appending the attribute if missing.
    pub(crate) fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = Some(value),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: Some(value),
                quote: None,
            }),
        }
    }

    pub(crate) fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|a| !a.name.eq_ignore_ascii_case(name));
    }

    /// Whether the space-separated `class` list contains `class`.
    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|list| list.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub(crate) fn is_void(&self) -> bool {
        self.self_closing || VOID_ELEMENTS.iter().any(|v| self.is(v))
    }
}

impl fmt::Display for StartTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attr in &self.attributes {
            write!(f, " {}", attr.name)?;
            if let Some(value) = &attr.value {
                let quote = match attr.quote {
                    Some('\'') if !value.contains('\'') => '\'',
                    _ => '"',
                };
                let value = if quote == '"' {
                    value.replace('"', "&quot;")
                } else {
                    value.clone()
                };
                write!(f, "={}{}{}", quote, value, quote)?;
            }
        }
        if self.self_closing {
            f.write_str(" />")
        } else {
            f.write_str(">")
        }
    }
}

/// Tokenizer over an HTML document.
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Set after a `<style>`/`<script>` start tag; the next token is its
    /// raw content.
    raw_text_until: Option<&'static str>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text_until: None,
        }
    }

    fn take(&mut self, len: usize) -> &'a str {
        let slice = &self.input[self.pos..self.pos + len];
        self.pos += len;
        slice
    }

    fn raw_text(&mut self, element: &str) -> Option<Token<'a>> {
        let remaining = &self.input[self.pos..];
        let close = format!("</{}", element);
        let end = find_ignore_ascii_case(remaining, &close).unwrap_or(remaining.len());
        if end == 0 {
            return None;
        }
        Some(Token::RawText(self.take(end)))
    }

    /// Tries to read markup at `<`. Returns `None` if the `<` is literal text.
    fn markup(&mut self) -> Option<Token<'a>> {
        let remaining = &self.input[self.pos..];
        let after = &remaining[1..];

        if after.starts_with("!--") {
            let end = remaining[4..].find("-->").map(|i| i + 4 + 3)?;
            return Some(Token::Comment(self.take(end)));
        }
        if after.starts_with('!') || after.starts_with('?') {
            let end = remaining.find('>')? + 1;
            return Some(Token::Declaration(self.take(end)));
        }
        if let Some(rest) = after.strip_prefix('/') {
            let name_len = tag_name_len(rest);
            if name_len == 0 {
                return None;
            }
            let end = remaining.find('>')? + 1;
            let raw = self.take(end);
            return Some(Token::EndTag {
                raw,
                name: &raw[2..2 + name_len],
            });
        }

        let name_len = tag_name_len(after);
        if name_len == 0 {
            return None;
        }
        let (attributes, self_closing, end) = parse_attributes(remaining, 1 + name_len)?;
        let raw = self.take(end);
        let tag = StartTag {
            raw,
            name: &raw[1..1 + name_len],
            attributes,
            self_closing,
        };
        self.raw_text_until = RAW_TEXT_ELEMENTS
            .iter()
            .copied()
            .find(|element| tag.is(element));
        Some(Token::StartTag(tag))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(element) = self.raw_text_until.take() {
            if let Some(token) = self.raw_text(element) {
                return Some(token);
            }
        }

        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];
        if remaining.starts_with('<') {
            if let Some(token) = self.markup() {
                return Some(token);
            }
            // Literal '<': emit it with the text that follows.
            let end = remaining[1..].find('<').map_or(remaining.len(), |i| i + 1);
            return Some(Token::Text(self.take(end)));
        }

        let end = remaining.find('<').unwrap_or(remaining.len());
        Some(Token::Text(self.take(end)))
    }
}

/// Length of the tag name at the start of `s` (`[A-Za-z][A-Za-z0-9-]*`).
fn tag_name_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    if !bytes.first().is_some_and(|b| b.is_ascii_alphabetic()) {
        return 0;
    }
    bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'-')
        .count()
}

/// Parses attributes of the start tag in `tag`, beginning at byte `start`.
///
/// Returns the attributes, whether the tag is self-closing, and the byte
/// length of the whole tag. `None` if the tag is never closed.
fn parse_attributes(tag: &str, start: usize) -> Option<(Vec<Attribute>, bool, usize)> {
    let bytes = tag.as_bytes();
    let mut attributes = Vec::new();
    let mut i = start;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match *bytes.get(i)? {
            b'>' => return Some((attributes, false, i + 1)),
            b'/' if bytes.get(i + 1) == Some(&b'>') => return Some((attributes, true, i + 2)),
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let name = tag[name_start..i].to_string();

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes.get(j) != Some(&b'=') {
            attributes.push(Attribute {
                name,
                value: None,
                quote: None,
            });
            continue;
        }
        i = j + 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let (value, quote) = match *bytes.get(i)? {
            q @ (b'"' | b'\'') => {
                let close = tag[i + 1..].find(q as char)? + i + 1;
                let value = &tag[i + 1..close];
                let quote = q as char;
                i = close + 1;
                (value, Some(quote))
            }
            _ => {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                (&tag[value_start..i], None)
            }
        };
        attributes.push(Attribute {
            name,
            value: Some(value.to_string()),
            quote,
        });
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Tokenizer::new(input).collect()
    }

    mod tokenize {
        use super::*;

        #[test]
        fn plain_text() {
            assert_eq!(tokens("hello"), vec![Token::Text("hello")]);
        }

        #[test]
        fn raw_slices_cover_input() {
            let input = r#"<!DOCTYPE html><p class="a">x &amp; y</p><!-- c --><br/>"#;
            let joined: String = Tokenizer::new(input).map(|t| t.raw()).collect();
            assert_eq!(joined, input);
        }

        #[test]
        fn doctype_is_declaration() {
            assert_eq!(
                tokens("<!DOCTYPE html>"),
                vec![Token::Declaration("<!DOCTYPE html>")]
            );
        }

        #[test]
        fn conditional_comments() {
            let input = "<!--[if !mso]><!--><div></div><!--<![endif]-->";
            let toks = tokens(input);
            assert_eq!(toks[0], Token::Comment("<!--[if !mso]><!-->"));
            assert!(matches!(&toks[1], Token::StartTag(t) if t.name == "div"));
            assert!(matches!(toks[2], Token::EndTag { name: "div", .. }));
            assert_eq!(toks[3], Token::Comment("<!--<![endif]-->"));
        }

        #[test]
        fn style_content_is_raw_text() {
            let input = "<style>a > b { color: red; }</style>";
            let toks = tokens(input);
            assert_eq!(toks.len(), 3);
            assert_eq!(toks[1], Token::RawText("a > b { color: red; }"));
            assert!(matches!(toks[2], Token::EndTag { name: "style", .. }));
        }

        #[test]
        fn empty_style_element() {
            let toks = tokens("<style></style>");
            assert_eq!(toks.len(), 2);
        }

        #[test]
        fn literal_less_than_is_text() {
            let toks = tokens("a < b <i>c</i>");
            assert_eq!(toks[0], Token::Text("a "));
            assert_eq!(toks[1], Token::Text("< b "));
            assert!(matches!(&toks[2], Token::StartTag(t) if t.name == "i"));
        }

        #[test]
        fn unterminated_tag_is_text() {
            let toks = tokens("x <a href=\"y");
            let joined: String = toks.iter().map(|t| t.raw()).collect();
            assert_eq!(joined, "x <a href=\"y");
            assert!(toks.iter().all(|t| matches!(t, Token::Text(_))));
        }
    }

    mod attributes {
        use super::*;

        fn start_tag(input: &str) -> StartTag<'_> {
            match Tokenizer::new(input).next() {
                Some(Token::StartTag(tag)) => tag,
                other => panic!("expected start tag, got {:?}", other),
            }
        }

        #[test]
        fn quoted_unquoted_and_bare() {
            let tag = start_tag(r#"<img src="a.png" width=90 alt='x > y' hidden>"#);
            assert_eq!(tag.attr("src"), Some("a.png"));
            assert_eq!(tag.attr("width"), Some("90"));
            assert_eq!(tag.attr("alt"), Some("x > y"));
            assert_eq!(tag.attr("hidden"), None);
            assert_eq!(tag.attributes.len(), 4);
        }

        #[test]
        fn class_lookup() {
            let tag = start_tag(r#"<a class="dark-link mobile-block">"#);
            assert!(tag.has_class("dark-link"));
            assert!(tag.has_class("mobile-block"));
            assert!(!tag.has_class("dark"));
        }

        #[test]
        fn unchanged_tag_reserializes_identically() {
            let raw = r#"<a href="mailto:a@acme.com" style="color: #1a73e8;" class="dark-link" aria-label="Email Ana">"#;
            assert_eq!(start_tag(raw).to_string(), raw);
        }

        #[test]
        fn set_and_remove() {
            let mut tag = start_tag(r#"<div class="dark-img" style="display: none;">"#);
            tag.set_attr("style", "display: block;");
            tag.remove_attr("class");
            assert_eq!(tag.to_string(), r#"<div style="display: block;">"#);
        }

        #[test]
        fn self_closing_preserved() {
            let tag = start_tag(r#"<br class="x"/>"#);
            assert!(tag.self_closing);
            assert!(tag.is_void());
            assert_eq!(tag.to_string(), r#"<br class="x" />"#);
        }

        #[test]
        fn single_quotes_kept_when_possible() {
            let mut tag = start_tag(r#"<td style='font-family: "Segoe UI";'>"#);
            tag.set_attr("style", r#"font-family: "Segoe UI"; color: #000000;"#);
            assert_eq!(
                tag.to_string(),
                r#"<td style='font-family: "Segoe UI"; color: #000000;'>"#
            );
        }
    }
}

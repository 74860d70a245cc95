//! CSS helpers for the preview transformer.
//!
//! Two concerns live here:
//!
//! - [`strip_dark_rules`] removes dark-mode-conditional rules from a
//!   stylesheet. It uses `cssparser` to find rule boundaries and cuts whole
//!   rules out of the source, so every kept rule keeps its exact bytes.
//! - [`InlineStyle`] splits a `style` attribute into declarations that can
//!   be read and replaced by property name.

use std::fmt;
use std::ops::Range;

use cssparser::{
    AtRuleParser, CowRcStr, ParseError, Parser, ParserInput, ParserState, QualifiedRuleParser,
    StyleSheetParser,
};

/// Selector prefixes some webmail clients add to mark dark-mode rendering.
const DARK_SELECTOR_HOOKS: &[&str] = &["[data-ogsc]", "[data-ogsb]"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    DarkMode,
    Other,
}

/// Classifies top-level rules without interpreting their contents.
struct RuleClassifier;

impl<'i> QualifiedRuleParser<'i> for RuleClassifier {
    type Prelude = RuleKind;
    type QualifiedRule = RuleKind;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        let selector = input.slice_from(start).trim_start();
        let dark = DARK_SELECTOR_HOOKS
            .iter()
            .any(|hook| selector.starts_with(hook));
        Ok(if dark { RuleKind::DarkMode } else { RuleKind::Other })
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        Ok(prelude)
    }
}

impl<'i> AtRuleParser<'i> for RuleClassifier {
    type Prelude = RuleKind;
    type AtRule = RuleKind;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        let condition: String = input
            .slice_from(start)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let dark =
            name.eq_ignore_ascii_case("media") && condition.contains("prefers-color-scheme:dark");
        Ok(if dark { RuleKind::DarkMode } else { RuleKind::Other })
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        Ok(prelude)
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(prelude)
    }
}

/// Removes `@media (prefers-color-scheme: dark)` rules and rules whose
/// selector starts with a webmail dark-mode hook.
///
/// Whitespace before a removed rule goes with it. Rules that fail to parse
/// are kept as written.
pub(crate) fn strip_dark_rules(css: &str) -> String {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut classifier = RuleClassifier;
    let mut rules = StyleSheetParser::new(&mut parser, &mut classifier);

    let mut removed: Vec<Range<usize>> = Vec::new();
    loop {
        let start = rules.input.position().byte_index();
        let Some(result) = rules.next() else {
            break;
        };
        let end = rules.input.position().byte_index();
        if let Ok(RuleKind::DarkMode) = result {
            removed.push(start..end);
        }
    }

    if removed.is_empty() {
        return css.to_string();
    }

    let mut out = String::with_capacity(css.len());
    let mut cursor = 0;
    for range in removed {
        out.push_str(&css[cursor..range.start]);
        cursor = range.end;
    }
    out.push_str(&css[cursor..]);
    out
}

/// One `property: value` pair from a `style` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    property: String,
    /// `None` for a fragment without a colon, which is written back as is.
    value: Option<String>,
}

/// A parsed `style` attribute.
///
/// Serializes as `property: value;` pairs separated by single spaces, the
/// form the built-in templates write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    pub(crate) fn parse(style: &str) -> Self {
        let declarations = split_declarations(style)
            .into_iter()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| match d.split_once(':') {
                Some((property, value)) => Declaration {
                    property: property.trim().to_string(),
                    value: Some(value.trim().to_string()),
                },
                None => Declaration {
                    property: d.to_string(),
                    value: None,
                },
            })
            .collect();
        Self { declarations }
    }

    /// Value of the first declaration of `property`.
    pub(crate) fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property.eq_ignore_ascii_case(property))
            .and_then(|d| d.value.as_deref())
    }

    /// Replaces the value of every `property` declaration, appending one if
    /// there is none.
    pub(crate) fn set(&mut self, property: &str, value: &str) {
        let mut found = false;
        for declaration in self
            .declarations
            .iter_mut()
            .filter(|d| d.property.eq_ignore_ascii_case(property))
        {
            declaration.value = Some(value.to_string());
            found = true;
        }
        if !found {
            self.declarations.push(Declaration {
                property: property.to_string(),
                value: Some(value.to_string()),
            });
        }
    }

    /// Rewrites values in place. `f` receives the lowercased property name
    /// and the value, and returns the replacement if any.
    ///
    /// Returns whether anything changed.
    pub(crate) fn rewrite<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(&str, &str) -> Option<String>,
    {
        let mut changed = false;
        for declaration in &mut self.declarations {
            let Some(value) = declaration.value.as_mut() else {
                continue;
            };
            if let Some(new) = f(&declaration.property.to_ascii_lowercase(), value) {
                if new != *value {
                    *value = new;
                    changed = true;
                }
            }
        }
        changed
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match &declaration.value {
                Some(value) => write!(f, "{}: {};", declaration.property, value)?,
                None => write!(f, "{};", declaration.property)?,
            }
        }
        Ok(())
    }
}

/// Splits on `;` outside quotes and parentheses.
fn split_declarations(style: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&style[start..]);
    parts
}

/// Replaces `#rrggbb` tokens in `value` using the first matching
/// `(from, to)` pair, compared case-insensitively.
///
/// Each token is mapped once, so a replacement is never itself replaced.
/// Returns `None` if no token matched.
pub(crate) fn recolor(value: &str, pairs: &[(&str, &str)]) -> Option<String> {
    let bytes = value.as_bytes();
    let mut out = String::with_capacity(value.len());
    let mut cursor = 0;
    let mut changed = false;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'#' && is_hex_token(bytes, i) {
            let token = &value[i..i + 7];
            if let Some((_, to)) = pairs
                .iter()
                .find(|(from, _)| from.eq_ignore_ascii_case(token))
            {
                out.push_str(&value[cursor..i]);
                out.push_str(to);
                cursor = i + 7;
                changed = true;
            }
            i += 7;
        } else {
            i += 1;
        }
    }

    if !changed {
        return None;
    }
    out.push_str(&value[cursor..]);
    Some(out)
}

/// Whether a 6-digit hex color starts at `at` and is not part of a longer
/// token.
fn is_hex_token(bytes: &[u8], at: usize) -> bool {
    let end = at + 7;
    end <= bytes.len()
        && bytes[at + 1..end].iter().all(u8::is_ascii_hexdigit)
        && !bytes.get(end).is_some_and(|b| b.is_ascii_alphanumeric())
}

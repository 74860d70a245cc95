//! The fixed table of built-in templates.
//!
//! The registry is a `static` slice: it exists before `main`, is never
//! mutated, and needs no synchronization. Lookups are linear over five
//! entries, which keeps iteration order stable for listings.
//!
//! # Company Suppression
//!
//! Templates that show a logo may let it "speak for" the company. Each
//! template states its own [`CompanyRule`]:
//!
//! | Template | Logo | Company rule |
//! |----------|------|--------------|
//! | `minimal` | never | always shown |
//! | `professional-plus` | left column | hidden under logo |
//! | `modern-gradient` | top | hidden under logo |
//! | `compact-horizontal` | left | hidden under logo only without title |
//! | `compact-vertical` | top | always shown |

use serde::Serialize;
use tracing::debug;

use super::engine;
use crate::compose::{CompanyRule, SignatureFields};
use crate::data::SignatureData;
use crate::error::RenderError;

/// A built-in signature template.
///
/// Stateless: [`render`](Template::render) depends on its argument only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Unique key (e.g. `"modern-gradient"`).
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub company_rule: CompanyRule,
    /// Whether the layout has a logo slot.
    pub shows_logo: bool,
    /// Whether the layout draws the gradient separator.
    pub gradient: bool,
    #[serde(skip)]
    source: &'static str,
}

/// Context handed to the template source.
#[derive(Serialize)]
struct TemplateContext<'a> {
    #[serde(flatten)]
    fields: &'a SignatureFields,
    gradient: bool,
}

impl Template {
    /// Renders a complete HTML document for `data`.
    ///
    /// Output is byte-identical for identical input.
    pub fn render(&self, data: &SignatureData) -> Result<String, RenderError> {
        let fields = SignatureFields::compose(data, self.company_rule, self.shows_logo);
        let html = engine::render_source(
            self.source,
            TemplateContext {
                fields: &fields,
                gradient: self.gradient,
            },
        )?;
        debug!(template = self.id, bytes = html.len(), "rendered signature");
        Ok(html)
    }
}

const TEMPLATES: &[Template] = &[
    Template {
        id: "minimal",
        display_name: "Minimal",
        description: "Text only - name, title line and contact links",
        company_rule: CompanyRule::Always,
        shows_logo: false,
        gradient: false,
        source: "minimal.jinja",
    },
    Template {
        id: "professional-plus",
        display_name: "Professional Plus",
        description: "Logo column with a divider and labelled contact lines",
        company_rule: CompanyRule::HideUnderLogo,
        shows_logo: true,
        gradient: false,
        source: "professional-plus.jinja",
    },
    Template {
        id: "modern-gradient",
        display_name: "Modern Gradient",
        description: "Logo on top with a link-colored gradient separator",
        company_rule: CompanyRule::HideUnderLogo,
        shows_logo: true,
        gradient: true,
        source: "modern-gradient.jinja",
    },
    Template {
        id: "compact-horizontal",
        display_name: "Compact Horizontal",
        description: "Small logo beside a two-line text block",
        company_rule: CompanyRule::HideUnderLogoWithoutTitle,
        shows_logo: true,
        gradient: false,
        source: "compact-horizontal.jinja",
    },
    Template {
        id: "compact-vertical",
        display_name: "Compact Vertical",
        description: "Stacked layout - logo on top",
        company_rule: CompanyRule::Always,
        shows_logo: true,
        gradient: false,
        source: "compact-vertical.jinja",
    },
];

static REGISTRY: TemplateRegistry = TemplateRegistry {
    templates: TEMPLATES,
};

/// Read-only lookup over the built-in templates.
#[derive(Debug)]
pub struct TemplateRegistry {
    templates: &'static [Template],
}

impl TemplateRegistry {
    /// Looks up a template by id.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownTemplate`] for ids not in the table.
    pub fn get(&self, id: &str) -> Result<&'static Template, RenderError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| RenderError::UnknownTemplate(id.to_string()))
    }

    /// Whether `id` names a built-in template.
    pub fn contains(&self, id: &str) -> bool {
        self.templates.iter().any(|t| t.id == id)
    }

    /// Template ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        self.templates.iter().map(|t| t.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// The process-wide template registry.
pub fn registry() -> &'static TemplateRegistry {
    &REGISTRY
}

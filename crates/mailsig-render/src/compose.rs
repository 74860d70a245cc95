//! Field composition shared by every template.
//!
//! Templates differ in layout only. The rules deciding *which* fragments
//! appear, and with what hrefs and labels, live here so the five templates
//! cannot drift apart:
//!
//! - the name is always present
//! - title and company are joined with a middle dot, with the company
//!   dropped under a logo according to the template's [`CompanyRule`]
//! - the logo block exists only when a logo URL is set, with the dark
//!   variant falling back to the light one
//! - phone hrefs have their whitespace stripped, display text does not
//! - websites are linked as `https://<value>` without normalization
//!
//! The result is a [`SignatureFields`] view model serialized into the
//! template context. All user text in it is already HTML-escaped.

use serde::Serialize;

use crate::data::SignatureData;

/// Separator between title and company.
pub const SEPARATOR: &str = " · ";

/// When a template hides the company name behind its logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyRule {
    /// The company is always listed.
    Always,
    /// The company is dropped whenever a logo is shown.
    HideUnderLogo,
    /// The company is dropped when a logo is shown and there is no title.
    HideUnderLogoWithoutTitle,
}

impl CompanyRule {
    fn hides_company(self, logo_shown: bool, has_title: bool) -> bool {
        match self {
            CompanyRule::Always => false,
            CompanyRule::HideUnderLogo => logo_shown,
            CompanyRule::HideUnderLogoWithoutTitle => logo_shown && !has_title,
        }
    }
}

/// An anchor: escaped href, visible text and accessible label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub text: String,
    pub label: String,
}

/// Light and dark logo sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Logo {
    pub src: String,
    pub dark_src: String,
    pub alt: String,
}

/// Palette as inserted into inline styles and the dark-mode stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Colors {
    pub text: String,
    pub text_dark: String,
    pub link: String,
    pub link_dark: String,
}

/// Template view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureFields {
    pub name: String,
    /// Title and/or company joined with [`SEPARATOR`]; `None` when both are
    /// absent or suppressed.
    pub title_line: Option<String>,
    pub logo: Option<Logo>,
    pub email: Link,
    pub phone: Option<Link>,
    pub website: Option<Link>,
    pub colors: Colors,
}

impl SignatureFields {
    /// Applies the conditional-field rules to `data`.
    ///
    /// `shows_logo` is false for templates without a logo slot; those never
    /// emit a logo and never suppress the company.
    pub fn compose(data: &SignatureData, rule: CompanyRule, shows_logo: bool) -> Self {
        let logo_shown = shows_logo && data.has_logo();

        Self {
            name: escape_html(&data.name),
            title_line: title_line(data, rule, logo_shown),
            logo: logo_shown.then(|| Logo {
                src: escape_html(&data.logo_url),
                dark_src: escape_html(data.logo_dark_url()),
                alt: escape_html(&logo_alt(data)),
            }),
            email: Link {
                href: format!("mailto:{}", escape_html(&data.email)),
                text: escape_html(&data.email),
                label: escape_html(&format!("Email {}", data.name)),
            },
            phone: present(&data.phone).map(|phone| Link {
                href: format!("tel:{}", escape_html(&dialable(phone))),
                text: escape_html(phone),
                label: escape_html(&format!("Call {}", data.name)),
            }),
            website: present(&data.website).map(|site| Link {
                href: format!("https://{}", escape_html(site)),
                text: escape_html(site),
                label: "Visit website".to_string(),
            }),
            colors: Colors {
                text: data.text_color.clone(),
                text_dark: data.text_color_dark.clone(),
                link: data.link_color.clone(),
                link_dark: data.link_color_dark.clone(),
            },
        }
    }
}

fn present(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn title_line(data: &SignatureData, rule: CompanyRule, logo_shown: bool) -> Option<String> {
    let title = present(&data.title);
    let company = present(&data.company)
        .filter(|_| !rule.hides_company(logo_shown, title.is_some()));

    let parts: Vec<String> = title.into_iter().chain(company).map(escape_html).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(SEPARATOR))
    }
}

fn logo_alt(data: &SignatureData) -> String {
    match present(&data.company) {
        Some(company) => format!("{} logo", company),
        None => format!("{} logo", data.name),
    }
}

/// Phone number as dialed: every whitespace character removed.
pub fn dialable(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Escapes text for use in HTML content and double- or single-quoted
/// attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> SignatureData {
        SignatureData {
            name: "Ana Lee".into(),
            title: "Engineer".into(),
            company: "Acme".into(),
            email: "a@acme.com".into(),
            ..SignatureData::default()
        }
    }

    fn with_logo(mut data: SignatureData) -> SignatureData {
        data.logo_url = "https://x/a.png".into();
        data
    }

    mod title_line {
        use super::*;

        #[test]
        fn joins_title_and_company() {
            let fields = SignatureFields::compose(&data(), CompanyRule::Always, true);
            assert_eq!(fields.title_line.as_deref(), Some("Engineer · Acme"));
        }

        #[test]
        fn no_logo_keeps_company_under_every_rule() {
            for rule in [
                CompanyRule::Always,
                CompanyRule::HideUnderLogo,
                CompanyRule::HideUnderLogoWithoutTitle,
            ] {
                let fields = SignatureFields::compose(&data(), rule, true);
                assert_eq!(fields.title_line.as_deref(), Some("Engineer · Acme"));
            }
        }

        #[test]
        fn hide_under_logo_leaves_title_alone() {
            let fields = SignatureFields::compose(&with_logo(data()), CompanyRule::HideUnderLogo, true);
            assert_eq!(fields.title_line.as_deref(), Some("Engineer"));
        }

        #[test]
        fn hide_under_logo_without_title_keeps_company_next_to_title() {
            let fields = SignatureFields::compose(
                &with_logo(data()),
                CompanyRule::HideUnderLogoWithoutTitle,
                true,
            );
            assert_eq!(fields.title_line.as_deref(), Some("Engineer · Acme"));
        }

        #[test]
        fn hide_under_logo_without_title_drops_lone_company() {
            let mut d = with_logo(data());
            d.title.clear();
            let fields =
                SignatureFields::compose(&d, CompanyRule::HideUnderLogoWithoutTitle, true);
            assert_eq!(fields.title_line, None);
        }

        #[test]
        fn template_without_logo_slot_never_hides_company() {
            let mut d = with_logo(data());
            d.title.clear();
            let fields = SignatureFields::compose(&d, CompanyRule::HideUnderLogo, false);
            assert_eq!(fields.title_line.as_deref(), Some("Acme"));
            assert!(fields.logo.is_none());
        }

        #[test]
        fn blank_fields_are_absent() {
            let mut d = data();
            d.title = "   ".into();
            d.company.clear();
            let fields = SignatureFields::compose(&d, CompanyRule::Always, true);
            assert_eq!(fields.title_line, None);
        }
    }

    mod links {
        use super::*;

        #[test]
        fn email_is_mailto_with_named_label() {
            let fields = SignatureFields::compose(&data(), CompanyRule::Always, true);
            assert_eq!(fields.email.href, "mailto:a@acme.com");
            assert_eq!(fields.email.label, "Email Ana Lee");
        }

        #[test]
        fn phone_href_strips_whitespace_only() {
            let mut d = data();
            d.phone = "06 06\t06 06 06".into();
            let phone = SignatureFields::compose(&d, CompanyRule::Always, true)
                .phone
                .unwrap();
            assert_eq!(phone.href, "tel:0606060606");
            assert_eq!(phone.text, "06 06\t06 06 06");
            assert_eq!(phone.label, "Call Ana Lee");
        }

        #[test]
        fn website_keeps_value_verbatim() {
            let mut d = data();
            d.website = "https://acme.com".into();
            let site = SignatureFields::compose(&d, CompanyRule::Always, true)
                .website
                .unwrap();
            assert_eq!(site.href, "https://https://acme.com");
            assert_eq!(site.text, "https://acme.com");
        }

        #[test]
        fn missing_optional_links() {
            let fields = SignatureFields::compose(&data(), CompanyRule::Always, true);
            assert!(fields.phone.is_none());
            assert!(fields.website.is_none());
        }
    }

    mod logo {
        use super::*;

        #[test]
        fn dark_source_falls_back() {
            let fields = SignatureFields::compose(&with_logo(data()), CompanyRule::Always, true);
            let logo = fields.logo.unwrap();
            assert_eq!(logo.src, "https://x/a.png");
            assert_eq!(logo.dark_src, "https://x/a.png");
            assert_eq!(logo.alt, "Acme logo");
        }

        #[test]
        fn alt_uses_name_without_company() {
            let mut d = with_logo(data());
            d.company.clear();
            let logo = SignatureFields::compose(&d, CompanyRule::Always, true)
                .logo
                .unwrap();
            assert_eq!(logo.alt, "Ana Lee logo");
        }
    }

    mod escaping {
        use super::*;

        #[test]
        fn escapes_markup_characters() {
            assert_eq!(
                escape_html(r#"<b>"R&D"</b> 'x'"#),
                "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt; &#39;x&#39;"
            );
        }

        #[test]
        fn user_text_is_escaped_in_view_model() {
            let mut d = data();
            d.name = "Tom & <Jerry>".into();
            d.logo_url = "https://x/a.png?w=90&h=30".into();
            let fields = SignatureFields::compose(&d, CompanyRule::Always, true);
            assert_eq!(fields.name, "Tom &amp; &lt;Jerry&gt;");
            assert_eq!(fields.email.label, "Email Tom &amp; &lt;Jerry&gt;");
            assert_eq!(fields.logo.unwrap().src, "https://x/a.png?w=90&amp;h=30");
        }

        #[test]
        fn plain_text_passes_through() {
            assert_eq!(escape_html("Élodie · Rémy"), "Élodie · Rémy");
        }
    }
}

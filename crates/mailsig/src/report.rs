//! Terminal reports for the `templates` and `contrast` commands.
//!
//! Reports are MiniJinja templates. A `style` filter wraps values in
//! `console` styles when color is on and passes them through otherwise.
//! Columns are padded before styling, since escape codes would throw off
//! the widths.

use console::Style;
use mailsig_render::{ContrastGrade, ContrastReport, TemplateRegistry};
use minijinja::{context, Environment};
use serde::Serialize;

const TEMPLATES_REPORT: &str = r#"{{ "Templates" | style("header") }}
{% for row in rows %}
  {{ row.id | style("id") }}  {{ row.name }}  {{ row.description | style("muted") }}
{% endfor %}
"#;

const CONTRAST_REPORT: &str = r#"{{ "Contrast (WCAG 2.x)" | style("header") }}
{% for row in rows %}
  {{ row.check }}  {{ row.colors | style("muted") }}  {{ row.ratio }}  {{ row.grade | style(row.grade_style) }}
{% endfor %}
{% if all_pass %}{{ "All colors reach AA." | style("pass") }}{% else %}{{ "Some colors are below AA (4.5:1)." | style("fail") }}{% endif %}
"#;

fn style_named(name: &str) -> Style {
    match name {
        "header" => Style::new().bold(),
        "id" => Style::new().cyan(),
        "muted" => Style::new().dim(),
        "aaa" => Style::new().green().bold(),
        "pass" => Style::new().green(),
        "fail" => Style::new().red().bold(),
        _ => Style::new(),
    }
}

fn environment(use_color: bool) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("style", move |value: String, name: String| -> String {
        if use_color {
            style_named(&name)
                .force_styling(true)
                .apply_to(value)
                .to_string()
        } else {
            value
        }
    });
    env
}

#[derive(Serialize)]
struct TemplateRow {
    id: String,
    name: String,
    description: &'static str,
}

/// Lists the registry as aligned columns.
pub fn templates(registry: &TemplateRegistry, use_color: bool) -> Result<String, minijinja::Error> {
    let id_width = registry.ids().map(str::len).max().unwrap_or(0);
    let name_width = registry.iter().map(|t| t.display_name.len()).max().unwrap_or(0);
    let rows: Vec<TemplateRow> = registry
        .iter()
        .map(|t| TemplateRow {
            id: format!("{:<width$}", t.id, width = id_width),
            name: format!("{:<width$}", t.display_name, width = name_width),
            description: t.description,
        })
        .collect();

    environment(use_color).render_str(TEMPLATES_REPORT, context! { rows })
}

#[derive(Serialize)]
struct ContrastRow {
    check: String,
    colors: String,
    ratio: String,
    grade: String,
    grade_style: &'static str,
}

/// Renders the four contrast checks with their grades.
pub fn contrast(report: &ContrastReport, use_color: bool) -> Result<String, minijinja::Error> {
    let rows: Vec<ContrastRow> = report
        .checks
        .iter()
        .map(|check| ContrastRow {
            check: format!("{:<11}", format!("{} {}", check.mode, check.label)),
            colors: format!("{} on {}", check.foreground, check.background),
            ratio: format!("{:>6}", check.ratio_label()),
            grade: format!("{:<4}", check.grade),
            grade_style: match check.grade {
                ContrastGrade::Aaa => "aaa",
                ContrastGrade::Aa => "pass",
                ContrastGrade::Fail => "fail",
            },
        })
        .collect();

    environment(use_color).render_str(
        CONTRAST_REPORT,
        context! { rows, all_pass => report.all_pass() },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsig_render::{registry, Palette};

    fn palette(text: &str, link: &str) -> Palette {
        Palette {
            text: text.into(),
            text_dark: "#f5f5f5".into(),
            link: link.into(),
            link_dark: "#91add4".into(),
        }
    }

    #[test]
    fn test_templates_plain() {
        let out = templates(registry(), false).unwrap();
        assert!(out.starts_with("Templates\n"));
        assert!(out.contains(&format!("  {:<18}  Minimal ", "minimal")));
        assert!(out.contains("compact-vertical"));
        assert_eq!(out.lines().count(), 1 + registry().len());
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_templates_colored() {
        let out = templates(registry(), true).unwrap();
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn test_contrast_rows() {
        let report = ContrastReport::for_palette(&palette("#000000", "#1a73e8")).unwrap();
        let out = contrast(&report, false).unwrap();
        assert!(out.contains("light text   #000000 on #ffffff  21.0:1  AAA"), "{}", out);
        assert!(out.contains("dark link"));
        assert!(out.contains("#91add4 on #1a1a1a"));
    }

    #[test]
    fn test_contrast_summary() {
        let good = ContrastReport::for_palette(&palette("#000000", "#1a73e8")).unwrap();
        assert!(contrast(&good, false).unwrap().contains("All colors reach AA."));

        let bad = ContrastReport::for_palette(&palette("#cccccc", "#1a73e8")).unwrap();
        let out = contrast(&bad, false).unwrap();
        assert!(out.contains("Fail"));
        assert!(out.contains("Some colors are below AA (4.5:1)."));
    }
}

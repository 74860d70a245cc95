//! Signature data loading.
//!
//! Data comes from, in increasing priority:
//!
//! 1. the built-in sample record, when no file is given
//! 2. a YAML (`.yaml`, `.yml`) or JSON (`.json`) file using the form's
//!    camelCase field names, with missing fields defaulted
//! 3. per-field flags such as `--name` or `--link-color-dark`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use mailsig_render::{Rgb, SignatureData};
use tracing::debug;

/// Extensions accepted for data files.
pub const DATA_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Flags selecting and overriding the signature data.
#[derive(Debug, Clone, Default, Args)]
pub struct DataArgs {
    /// YAML or JSON file with signature data (defaults to the sample record)
    #[arg(short, long, env = "MAILSIG_DATA", value_name = "PATH")]
    pub data: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long, value_name = "URL")]
    pub logo_url: Option<String>,
    #[arg(long, value_name = "URL")]
    pub logo_dark_url: Option<String>,

    #[arg(long, value_name = "HEX")]
    pub text_color: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub text_color_dark: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub link_color: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub link_color_dark: Option<String>,
}

impl DataArgs {
    /// Loads the data file (or the sample), applies overrides and checks
    /// that every color is `#rrggbb`.
    pub fn resolve(&self) -> anyhow::Result<SignatureData> {
        let mut data = match &self.data {
            Some(path) => load(path)?,
            None => SignatureData::sample(),
        };
        self.apply(&mut data);
        validate_colors(&data)?;
        Ok(data)
    }

    fn apply(&self, data: &mut SignatureData) {
        let overrides = [
            (&self.name, &mut data.name),
            (&self.title, &mut data.title),
            (&self.company, &mut data.company),
            (&self.email, &mut data.email),
            (&self.phone, &mut data.phone),
            (&self.website, &mut data.website),
            (&self.logo_url, &mut data.logo_url),
            (&self.logo_dark_url, &mut data.logo_dark_url),
            (&self.text_color, &mut data.text_color),
            (&self.text_color_dark, &mut data.text_color_dark),
            (&self.link_color, &mut data.link_color),
            (&self.link_color_dark, &mut data.link_color_dark),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
    }
}

/// Reads a data file, choosing the format by extension.
pub fn load(path: &Path) -> anyhow::Result<SignatureData> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let data = parse(path, &contents)?;
    debug!(path = %path.display(), "loaded signature data");
    Ok(data)
}

fn parse(path: &Path, contents: &str) -> anyhow::Result<SignatureData> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let data = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(contents)
            .with_context(|| format!("parsing {} as YAML", path.display()))?,
        "json" => serde_json::from_str(contents)
            .with_context(|| format!("parsing {} as JSON", path.display()))?,
        _ => bail!(
            "unsupported data file '{}': expected one of .{}",
            path.display(),
            DATA_EXTENSIONS.join(", .")
        ),
    };
    Ok(data)
}

fn validate_colors(data: &SignatureData) -> anyhow::Result<()> {
    for (field, value) in [
        ("textColor", &data.text_color),
        ("textColorDark", &data.text_color_dark),
        ("linkColor", &data.link_color),
        ("linkColorDark", &data.link_color_dark),
    ] {
        Rgb::from_hex(value).with_context(|| format!("{} is not usable", field))?;
    }
    Ok(())
}

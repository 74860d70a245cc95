//! Command-line surface.
//!
//! [`execute`] runs a parsed [`Cli`] and returns what should be printed on
//! stdout, so commands can be driven from tests without a process.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use mailsig_render::{
    registry, to_preview, ColorMode, ContrastReport, Export, SignatureData, DOWNLOAD_FILE_NAME,
};
use tracing::info;

use crate::config::DataArgs;
use crate::report;

/// Render dark-mode-aware HTML email signatures.
#[derive(Debug, Parser)]
#[command(name = "mailsig", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored terminal output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the built-in templates
    Templates,

    /// Render the shippable HTML signature
    Render {
        /// Template id (see `mailsig templates`)
        #[arg(short, long)]
        template: String,

        /// Write to this file, or into this directory as email-signature.html
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Render a preview with one color mode baked in
    Preview {
        #[arg(short, long)]
        template: String,

        #[arg(short, long, default_value_t = ColorMode::Light)]
        mode: ColorMode,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Print the "copy as rendered" payload
    Copy {
        #[arg(short, long)]
        template: String,

        /// Print the plain-text fallback instead of the HTML
        #[arg(long)]
        plain: bool,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Grade text and link colors against the preview backgrounds
    Contrast {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Print the sample signature as YAML, a starting point for --data
    Sample,
}

/// Runs a command and returns its stdout.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let use_color = !cli.no_color && console::colors_enabled();

    match &cli.command {
        Command::Templates => Ok(report::templates(registry(), use_color)?),
        Command::Render {
            template,
            out,
            data,
        } => {
            let export = Export::shippable(template, &data.resolve()?)?;
            match out {
                Some(path) => {
                    let path = write_export(path, &export.html)?;
                    Ok(format!("wrote {}\n", path.display()))
                }
                None => Ok(export.html),
            }
        }
        Command::Preview {
            template,
            mode,
            data,
        } => {
            let data = data.resolve()?;
            let html = registry().get(template)?.render(&data)?;
            Ok(to_preview(&html, &data, *mode))
        }
        Command::Copy {
            template,
            plain,
            data,
        } => {
            let export = Export::rendered(template, &data.resolve()?)?;
            match (*plain, export.plain) {
                (true, Some(mut text)) => {
                    text.push('\n');
                    Ok(text)
                }
                _ => Ok(export.html),
            }
        }
        Command::Contrast { data } => {
            let report = ContrastReport::for_palette(&data.resolve()?.palette())?;
            Ok(report::contrast(&report, use_color)?)
        }
        Command::Sample => Ok(serde_yaml::to_string(&SignatureData::sample())?),
    }
}

/// Writes `html` to `path`, or to `path/email-signature.html` when `path`
/// is a directory. Returns the file written.
fn write_export(path: &Path, html: &str) -> anyhow::Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(DOWNLOAD_FILE_NAME)
    } else {
        path.to_path_buf()
    };
    fs::write(&target, html).with_context(|| format!("writing {}", target.display()))?;
    info!(path = %target.display(), bytes = html.len(), "wrote signature");
    Ok(target)
}

//! # mailsig
//!
//! Command-line front end for [`mailsig_render`]. Reads signature data from
//! a YAML or JSON file (or uses the built-in sample), then renders, previews
//! or grades it.
//!
//! ```text
//! mailsig sample > me.yaml
//! mailsig render -t modern-gradient --data me.yaml --out .
//! mailsig preview -t modern-gradient --data me.yaml --mode dark
//! mailsig contrast --data me.yaml
//! ```

pub mod cli;
pub mod config;
pub mod logging;
mod report;

pub use cli::{execute, Cli, Command};

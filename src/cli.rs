use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::options::DiscoveryOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Tree,
}

#[derive(Parser, Debug)]
#[command(name = "binsuite")]
#[command(about = "Discover the tests in a compiled test binary using the builder it declares", long_about = None)]
pub struct Args {
    /// Path to the test binary
    #[arg(long, value_name = "BINARY", required_unless_present = "list_builders")]
    pub path: Option<String>,

    /// Discovery option passed to the builder. Can be specified multiple times.
    #[arg(long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Discovery options file (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Output format (tree, json)
    #[arg(short = 'f', long, default_value = "tree")]
    pub format: OutputFormat,

    /// Fail instead of reporting a not-runnable binary when loading or builder resolution fails
    #[arg(long)]
    pub strict: bool,

    /// List the registered test builders and exit
    #[arg(long)]
    pub list_builders: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref options_file) = self.options_file {
            validate_file(options_file)?;
        }
        for pair in &self.options {
            DiscoveryOptions::parse_pair(pair)?;
        }
        Ok(())
    }

    pub fn discovery_options(&self) -> Result<DiscoveryOptions> {
        DiscoveryOptions::from_sources(self.options_file.as_deref(), &self.options)
            .context("Invalid discovery options")
    }
}

pub fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    Ok(())
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Tree => "tree",
        }
    }
}

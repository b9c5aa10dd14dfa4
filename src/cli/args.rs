//! CLI argument parsing using clap

use crate::config;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for ruleplan commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

impl From<OutputFormat> for config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => config::OutputFormat::Human,
            OutputFormat::Jsonl => config::OutputFormat::Jsonl,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorChoice> for config::ColorOption {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => config::ColorOption::Auto,
            ColorChoice::Always => config::ColorOption::Always,
            ColorChoice::Never => config::ColorOption::Never,
        }
    }
}

/// ruleplan CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "ruleplan")]
#[command(about = "Compile field validation rules into bail-aware execution plans")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    pub config: PathBuf,

    /// Output coloring (overrides the configuration)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available ruleplan subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter ruleplan.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Compile the configured field declarations
    Compile {
        /// Fields to compile (defaults to all configured fields)
        fields: Vec<String>,

        /// Output format (overrides the configuration)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Compile a single declaration given on the command line
    Explain {
        /// Pipe declaration, e.g. "bail|required|min:3"
        declaration: String,

        /// Output format (overrides the configuration)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// List all registered rules
    List {
        /// Output format (overrides the configuration)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print the value at a path inside a JSON document
    Get {
        /// JSON document
        file: PathBuf,

        /// Path expression, e.g. "addresses[0].city"
        path: String,
    },

    /// Write a JSON value at a path inside a JSON document
    Set {
        /// JSON document (created if missing)
        file: PathBuf,

        /// Path expression, e.g. "addresses[0].city"
        path: String,

        /// Value as JSON, e.g. '"Paris"' or '{"zip": 75001}'
        value: String,
    },
}

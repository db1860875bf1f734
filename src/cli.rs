use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::payload::merge::KeyCase;

#[derive(Parser)]
#[command(
    name = "morph",
    about = "Assemble request payloads for the Morpheus cloud-management appliance",
    long_about = "Morph combines payload templates, JSON/YAML payload files and -O key=value options \
                  into a single request body, pruning blank fields and turning on/off tokens into booleans.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MORPH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and inspect request payloads
    #[command(subcommand)]
    Payload(PayloadCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum PayloadCommands {
    /// Merge templates, payload files and options into one request body
    Build {
        /// Template file providing default fields (JSON or YAML), merged first
        #[arg(short, long = "template")]
        templates: Vec<PathBuf>,

        /// Payload file (JSON or YAML), merged after templates
        #[arg(short, long = "payload")]
        payloads: Vec<PathBuf>,

        /// Payload field in key=value format; dotted keys nest
        #[arg(short = 'O', long = "option")]
        options: Vec<String>,

        /// Nest the result under this object key, e.g. "group"
        #[arg(long)]
        wrap: Option<String>,

        /// Concatenate sequences found on both sides instead of replacing them
        #[arg(long)]
        concat_arrays: bool,

        /// Keep null and empty-string fields
        #[arg(long)]
        no_compact: bool,

        /// Leave on/off and true/false strings as they are
        #[arg(long)]
        no_booleanize: bool,

        /// Fail when the assembled payload has no fields
        #[arg(long)]
        require_changes: bool,

        /// Print JSON on a single line
        #[arg(long)]
        compact_json: bool,
    },

    /// Rewrite the top-level keys of a payload file
    Keys {
        /// Payload file (JSON or YAML)
        file: PathBuf,

        /// Casing applied to top-level keys
        #[arg(long, value_enum)]
        case: CaseArg,

        /// Print JSON on a single line
        #[arg(long)]
        compact_json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CaseArg {
    Upper,
    Lower,
    Capitalize,
}

impl From<CaseArg> for KeyCase {
    fn from(arg: CaseArg) -> Self {
        match arg {
            CaseArg::Upper => KeyCase::Upper,
            CaseArg::Lower => KeyCase::Lower,
            CaseArg::Capitalize => KeyCase::Capitalize,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Initialize configuration file
    Init,

    /// Set configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::options::ClientOptions;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
}

impl VerbosityLevel {
    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

/// ConcreteGo API client tooling
#[derive(Parser, Debug, Clone)]
#[command(name = "concretego")]
#[command(about = "Check ConcreteGo client configuration and convert API payloads")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Load client options and report every missing field
    CheckConfig {
        /// Configuration file (TOML or JSON); standard locations are searched when omitted
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,

        /// Configuration section holding the client options
        #[arg(short = 's', long = "section", default_value = ClientOptions::SECTION)]
        section: String,
    },
    /// Convert a charges request from JSON to XML
    EncodeCharges {
        /// JSON file with the charges request
        input: PathBuf,

        /// Prefix the output with an XML declaration
        #[arg(long = "document")]
        document: bool,
    },
    /// Convert a reason code query response from XML to JSON
    DecodeReasonCodes {
        /// XML file with the `ReasonCodeQueryRs` document
        input: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

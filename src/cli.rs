//! Command-line interface definitions for `pfs-ls`
//!
//! Arguments are grouped by the component that consumes them.

use anyhow::Result;
use clap::Parser;
use tracing::Level;

/// List a directory: type, size, modification time and name of each entry
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to list
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: String,

    /// Render timestamps in UTC to the second instead of local time with
    /// nanoseconds (always on for wide-character platforms)
    #[arg(long)]
    pub utc: bool,

    /// Output and logging configuration
    #[command(flatten)]
    pub output: OutputConfig,
}

/// Output and logging configuration
///
/// Used by: `main()` when installing the tracing subscriber
#[derive(clap::Args, Debug, Clone, Default)]
#[command(next_help_heading = "Output Options")]
pub struct OutputConfig {
    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all diagnostics except errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl OutputConfig {
    /// Maximum log level for the chosen verbosity
    #[must_use]
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

impl Args {
    /// Validate command-line arguments
    ///
    /// # Errors
    ///
    /// Returns an error if both --quiet and --verbose are used.
    pub fn validate(&self) -> Result<()> {
        if self.output.quiet && self.output.verbose > 0 {
            anyhow::bail!("Cannot use both --quiet and --verbose options");
        }
        Ok(())
    }

    /// Whether timestamps should be rendered in UTC
    #[must_use]
    pub const fn use_utc(&self) -> bool {
        self.utc || cfg!(windows)
    }
}

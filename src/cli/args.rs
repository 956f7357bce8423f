//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::MascotArg;
use crate::config::MAX_COLUMNS;

/// Parse and validate a column width (1-1000)
fn parse_columns(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid column count", s))?;
    if !(1..=MAX_COLUMNS).contains(&n) {
        return Err(format!("Column count must be between 1 and {}, got {}", MAX_COLUMNS, n));
    }
    Ok(n)
}

/// Render text as cowsay-style monospace images
#[derive(Parser, Debug)]
#[command(name = "monosay")]
#[command(version, about = "Render text as cowsay-style monospace PNG images", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render text in a speech bubble
    Say {
        /// Mascot under the bubble
        #[arg(long, short, default_value = "cow")]
        mascot: MascotArg,

        /// Bubble width in columns (default: from config, 40)
        #[arg(long, short, value_parser = parse_columns)]
        width: Option<usize>,

        /// Minimum image width in columns (default: from config, 50)
        #[arg(long, value_parser = parse_columns)]
        columns: Option<usize>,

        /// Output PNG path
        #[arg(long, short, default_value = "monosay.png")]
        output: PathBuf,

        /// Text to say
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Render text as-is in a monospace image
    Mono {
        /// Image width in columns (default: from config, 80)
        #[arg(long, value_parser = parse_columns)]
        columns: Option<usize>,

        /// Output PNG path
        #[arg(long, short, default_value = "monosay.png")]
        output: PathBuf,

        /// Text to render; `-` reads stdin
        text: String,
    },
    /// Run a chat message through the command dispatcher
    Dispatch {
        /// Directory receiving delivered images
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Recipient name used in delivered file names
        #[arg(long, default_value = "local")]
        recipient: String,

        /// Message text, e.g. "/cowsay hello"
        message: String,
    },
    /// Print the chat command usage
    Usage,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

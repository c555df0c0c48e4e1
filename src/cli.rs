//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Build and inspect JT905 frames from hex input
#[derive(Parser, Debug)]
#[command(name = "jt905-frame")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML config file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Destination buffer size in bytes (overrides config)
    #[arg(long, value_name = "BYTES", global = true)]
    pub buffer_size: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wrap a hex body in flags and check code, then escape it
    Frame {
        /// Message body as hex ("0x" prefix and spaces allowed)
        hex: String,

        /// Print the whole physical buffer instead of the escaped frame
        #[arg(long)]
        physical: bool,
    },

    /// Escape hex bytes without framing
    Escape {
        /// Bytes as hex
        hex: String,
    },

    /// Print the XOR check code of hex bytes
    Checksum {
        /// Bytes as hex
        hex: String,
    },
}

// =============================================================================
// Tests
// =============================================================================

//! jt905-frame - build and inspect JT905 frames
//!
//! Usage:
//!   jt905-frame frame <HEX> [--physical]   Flags, check code, escaping
//!   jt905-frame escape <HEX>               Escape transform only
//!   jt905-frame checksum <HEX>             XOR check code

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use jt905_writer::config::{self, Config};
use jt905_writer::{frame, logging, xor, Result};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => match config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    logging::init_tracing(cli.verbose, &config.logs.level);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let buffer_size = cli.buffer_size.unwrap_or(config.writer.buffer_size);
    debug!(buffer_size, escape = ?config.writer.escape, "writer settings");

    match &cli.command {
        Command::Frame { hex, physical } => {
            let body = frame::parse_hex(hex)?;
            let built = frame::build_frame(&body, config.writer.escape, buffer_size)?;
            let out = if *physical {
                &built.physical
            } else {
                &built.encoded
            };
            println!("{}", frame::to_hex(out));
        }
        Command::Escape { hex } => {
            let bytes = frame::parse_hex(hex)?;
            println!("{}", frame::to_hex(&frame::escape(&bytes)?));
        }
        Command::Checksum { hex } => {
            let bytes = frame::parse_hex(hex)?;
            println!("{:02X}", xor(&bytes));
        }
    }

    Ok(())
}

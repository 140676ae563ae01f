mod cli;
mod commands;
mod encoder;
mod error;
mod output;
mod presets;
mod queue;
mod utils;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use encoder::FfmpegCompressor;
use presets::PresetStore;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{debug, warn};
use utils::{ffmpeg_available, init_logging, install_interrupt_handler};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_dir = cli.config.unwrap_or_else(PresetStore::default_dir);
    let store = PresetStore::in_dir(&config_dir);
    debug!("Using presets file {}", store.path().display());

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Commands::Compress(args) => {
            if !ffmpeg_available(&args.ffmpeg) {
                bail!("{} not found; install ffmpeg or pass --ffmpeg <PATH>", args.ffmpeg);
            }

            let cancel_flag = Arc::new(AtomicBool::new(false));
            if let Err(e) = install_interrupt_handler(cancel_flag.clone()) {
                warn!("Failed to install interrupt handler: {}", e);
            }

            let compressor =
                FfmpegCompressor::new(args.overwrite, cancel_flag).with_program(&args.ffmpeg);
            commands::run_compress(args, &store, compressor, &mut stdout, &mut io::stderr().lock())
        }
        Commands::Presets(command) => commands::run_presets(command, &store, &mut stdout),
        Commands::CheckTools { ffmpeg } => commands::check_tools(ffmpeg, &mut stdout),
    }
}


use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "video-compress")]
#[command(author, version, about = "Video Compressor: compress videos and manage presets")]
pub struct Cli {
    /// Directory holding presets.toml
    #[arg(short, long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compress one or more videos
    Compress(CompressArgs),

    /// Manage compression presets
    #[command(subcommand)]
    Presets(PresetsCommand),

    /// Check that ffmpeg is available
    CheckTools {
        /// ffmpeg executable to check
        #[arg(long, default_value = "ffmpeg", value_name = "PATH")]
        ffmpeg: String,
    },
}

#[derive(Debug, Args)]
pub struct CompressArgs {
    /// Input files, or directories to search for videos
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Parallel compression jobs
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Output file or directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Preset name to use
    #[arg(short, long, default_value = "default")]
    pub preset: String,

    /// Override video codec from preset
    #[arg(long)]
    pub video_codec: Option<String>,

    /// Override encoder speed preset from preset
    #[arg(long, visible_alias = "ffpreset")]
    pub speed_preset: Option<String>,

    /// Override CRF value from preset
    #[arg(long)]
    pub crf: Option<u8>,

    /// Overwrite existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// ffmpeg executable to run
    #[arg(long, default_value = "ffmpeg", value_name = "PATH")]
    pub ffmpeg: String,
}

#[derive(Debug, Subcommand)]
pub enum PresetsCommand {
    /// List all presets
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one preset
    Show {
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add or overwrite a preset
    Add(AddPresetArgs),

    /// Delete a named preset
    Remove { name: String },
}

#[derive(Debug, Args)]
pub struct AddPresetArgs {
    pub name: String,

    /// ffmpeg video codec
    #[arg(long, default_value = "libx264")]
    pub video_codec: String,

    /// ffmpeg speed preset
    #[arg(long, default_value = "medium")]
    pub preset: String,

    /// ffmpeg CRF value
    #[arg(long, default_value_t = 23)]
    pub crf: u8,

    /// Free-form description
    #[arg(long, default_value = "")]
    pub description: String,
}

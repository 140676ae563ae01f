use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single compression task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressError {
    #[error("creating output directory {}: {message}", path.display())]
    CreateOutputDir { path: PathBuf, message: String },

    #[error("failed to start ffmpeg: {0}")]
    Spawn(String),

    #[error("ffmpeg exited with {status}: {stderr}")]
    Ffmpeg { status: String, stderr: String },

    #[error("interrupted")]
    Interrupted,

    #[error("compression panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Failed(String),
}

/// Preset store errors
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("reading presets file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing presets file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("serializing presets: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("creating config directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("writing presets file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown preset {name:?}; available: {}", available.join(", "))]
    NotFound {
        name: String,
        available: Vec<String>,
    },
}

pub mod command_builder;
pub mod ffmpeg;

pub use ffmpeg::FfmpegCompressor;

use crate::error::CompressError;
use std::path::Path;

/// The unit of work run by the pool: encode `source` into `destination`
///
/// Implementations may block for as long as the encode takes. Any
/// `Fn(&Path, &Path, &[String]) -> Result<(), CompressError>` closure is a
/// compressor, which is how tests inject fakes.
pub trait Compressor: Send + Sync {
    fn compress(
        &self,
        source: &Path,
        destination: &Path,
        args: &[String],
    ) -> Result<(), CompressError>;
}

impl<F> Compressor for F
where
    F: Fn(&Path, &Path, &[String]) -> Result<(), CompressError> + Send + Sync,
{
    fn compress(
        &self,
        source: &Path,
        destination: &Path,
        args: &[String],
    ) -> Result<(), CompressError> {
        self(source, destination, args)
    }
}

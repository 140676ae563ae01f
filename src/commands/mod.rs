pub mod compress;
pub mod presets;

pub use compress::run_compress;
pub use presets::run_presets;

use crate::utils::ffmpeg_available;
use anyhow::{Result, bail};
use std::io::Write;

/// Report whether the external tools are installed
pub fn check_tools(ffmpeg: &str, out: &mut impl Write) -> Result<()> {
    if !ffmpeg_available(ffmpeg) {
        bail!("{} not found; install ffmpeg or pass --ffmpeg <PATH>", ffmpeg);
    }
    writeln!(out, "✓ {}", ffmpeg)?;
    Ok(())
}

use super::Compressor;
use crate::encoder::command_builder::{EncodingParams, build_ffmpeg_args, format_command};
use crate::error::CompressError;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Lines of ffmpeg stderr kept in error messages
const STDERR_TAIL_LINES: usize = 5;

/// Compressor that runs the external `ffmpeg` binary
#[derive(Debug, Clone)]
pub struct FfmpegCompressor {
    program: String,
    overwrite: bool,
    cancel_flag: Arc<AtomicBool>,
}

impl FfmpegCompressor {
    pub fn new(overwrite: bool, cancel_flag: Arc<AtomicBool>) -> Self {
        Self {
            program: "ffmpeg".to_string(),
            overwrite,
            cancel_flag,
        }
    }

    /// Use a different ffmpeg executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

impl Compressor for FfmpegCompressor {
    fn compress(
        &self,
        source: &Path,
        destination: &Path,
        args: &[String],
    ) -> Result<(), CompressError> {
        if self.is_cancelled() {
            return Err(CompressError::Interrupted);
        }

        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CompressError::CreateOutputDir {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let params = EncodingParams {
            input: source,
            output: destination,
            args,
            overwrite: self.overwrite,
        };
        let ffmpeg_args = build_ffmpeg_args(&params);
        info!("Running: {}", format_command(&self.program, &ffmpeg_args));

        // Never delete a file that was there before we started
        let existed_before = destination.exists();

        let mut child = Command::new(&self.program)
            .args(&ffmpeg_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CompressError::Spawn(e.to_string()))?;

        let stderr = spawn_stderr_reader(&mut child);
        let result = self.wait_for_exit(&mut child);
        let stderr = stderr
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        match result {
            Ok(status) if status.success() => {
                debug!("Finished {}", destination.display());
                Ok(())
            }
            Ok(status) => {
                if !existed_before {
                    remove_partial(destination);
                }
                Err(CompressError::Ffmpeg {
                    status: status.to_string(),
                    stderr: tail(&stderr, STDERR_TAIL_LINES),
                })
            }
            Err(e) => {
                if !existed_before {
                    remove_partial(destination);
                }
                Err(e)
            }
        }
    }
}

impl FfmpegCompressor {
    /// Poll the child until it exits or the cancel flag is raised
    fn wait_for_exit(&self, child: &mut Child) -> Result<ExitStatus, CompressError> {
        loop {
            if self.is_cancelled() {
                warn!("Interrupted, stopping ffmpeg (pid {})", child.id());
                let _ = child.kill();
                let _ = child.wait();
                return Err(CompressError::Interrupted);
            }

            match child.try_wait() {
                // ffmpeg shares our process group and may exit on ctrl-c first
                Ok(Some(status)) if !status.success() && self.is_cancelled() => {
                    return Err(CompressError::Interrupted);
                }
                Ok(Some(status)) => return Ok(status),
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CompressError::Failed(format!(
                        "Failed to check ffmpeg status: {}",
                        e
                    )));
                }
            }
        }
    }
}

/// Drain stderr on a helper thread so a chatty ffmpeg never blocks on a full pipe
fn spawn_stderr_reader(child: &mut Child) -> Option<JoinHandle<String>> {
    let mut stderr = child.stderr.take()?;
    Some(thread::spawn(move || {
        let mut buf = String::new();
        let _ = stderr.read_to_string(&mut buf);
        buf
    }))
}

fn remove_partial(path: &Path) {
    if path.exists()
        && let Err(e) = std::fs::remove_file(path)
    {
        warn!("Failed to remove partial output {}: {}", path.display(), e);
    }
}

/// Last `lines` non-empty lines of `text`
fn tail(text: &str, lines: usize) -> String {
    let last: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .rev()
        .take(lines)
        .collect();
    last.into_iter().rev().collect::<Vec<_>>().join("\n")
}

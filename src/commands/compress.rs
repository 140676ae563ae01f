use crate::cli::CompressArgs;
use crate::encoder::Compressor;
use crate::output::{derive_output, expand_inputs, is_directory_hint};
use crate::presets::{PresetOverrides, PresetStore};
use crate::queue::{Pool, Task, TaskResult};
use crate::utils::{format_file_size, has_enough_space};
use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Compress every input with the selected preset and report each outcome
///
/// Returns an error when setup fails (no task runs) or when at least one
/// task failed (after every task has been reported).
pub fn run_compress<C: Compressor>(
    args: &CompressArgs,
    store: &PresetStore,
    compressor: C,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let preset = store
        .get(&args.preset)
        .with_context(|| format!("loading presets from {}", store.path().display()))?;

    let overrides = PresetOverrides {
        video_codec: args.video_codec.clone(),
        speed_preset: args.speed_preset.clone(),
        crf: args.crf,
    };
    let preset = preset.with_overrides(&overrides);
    let ffmpeg_args = preset.ffmpeg_args();

    let tasks = plan_tasks(&args.files, args.output.as_deref(), &ffmpeg_args)?;
    for task in &tasks {
        warn_if_low_space(task);
    }

    let mut pool = Pool::new(args.jobs, compressor);
    for task in tasks {
        pool.add(task);
    }
    let total = pool.len();

    info!(
        "Compressing {} files with preset {} ({} jobs)",
        total,
        args.preset,
        pool.concurrency()
    );
    let start = Instant::now();
    let mut results = pool.run();
    info!("Batch finished in {:.1}s", start.elapsed().as_secs_f64());

    results.sort_by(|a, b| a.task.source.cmp(&b.task.source));
    let failures = report(&results, out, err)?;

    if failures > 0 {
        bail!("{} of {} files failed to compress", failures, total);
    }
    writeln!(out, "All done!")?;
    Ok(())
}

/// Build one task per input file, rejecting plans that cannot work
fn plan_tasks(inputs: &[PathBuf], output: Option<&str>, ffmpeg_args: &[String]) -> Result<Vec<Task>> {
    let files = expand_inputs(inputs);
    if files.is_empty() {
        bail!("no video files found in the given inputs");
    }

    if files.len() > 1
        && let Some(hint) = output.filter(|h| !h.is_empty())
        && !Path::new(hint).is_dir()
        && !is_directory_hint(hint)
    {
        bail!(
            "output {:?} is a single file but {} inputs were given; pass a directory ending with '/'",
            hint,
            files.len()
        );
    }

    let mut claimed = HashSet::new();
    files
        .into_iter()
        .map(|source| {
            let destination = derive_output(&source, output);
            let key = comparable_path(&destination);
            if key == comparable_path(&source) {
                bail!(
                    "output for {} would overwrite the input",
                    source.display()
                );
            }
            if !claimed.insert(key) {
                bail!(
                    "{} and another input would both be written to {}",
                    source.display(),
                    destination.display()
                );
            }
            Ok(Task::new(source, destination, ffmpeg_args.to_vec()))
        })
        .collect()
}

/// Resolve `path` for identity checks, including files that do not exist yet
fn comparable_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}

fn warn_if_low_space(task: &Task) {
    let Ok(metadata) = std::fs::metadata(&task.source) else {
        return;
    };
    let target_dir = match task.destination.parent() {
        Some(p) if !p.as_os_str().is_empty() && p.exists() => p,
        _ => Path::new("."),
    };
    if !has_enough_space(target_dir, metadata.len()) {
        warn!(
            "Low disk space in {} for {} ({})",
            target_dir.display(),
            task.filename(),
            format_file_size(metadata.len())
        );
    }
}

/// Print one line per result, returning the number of failures
fn report(results: &[TaskResult], out: &mut impl Write, err: &mut impl Write) -> Result<usize> {
    let mut failures = 0;
    for result in results {
        let task = &result.task;
        match &result.error {
            None => {
                let size = std::fs::metadata(&task.destination)
                    .map(|m| format!(" ({})", format_file_size(m.len())))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "✓ {} -> {}{}",
                    task.source.display(),
                    task.destination.display(),
                    size
                )?;
            }
            Some(e) => {
                failures += 1;
                writeln!(err, "Error compressing {}: {}", task.source.display(), e)?;
            }
        }
    }
    Ok(failures)
}

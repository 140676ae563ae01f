use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use walkdir::WalkDir;

/// Suffix appended to the file stem when no output is given
pub const OUTPUT_SUFFIX: &str = "-compressed";

/// Choose the destination for `input`
///
/// - no hint: next to the input as `<stem>-compressed.<ext>`
/// - hint is an existing directory, or ends with a separator: inside it,
///   keeping the input's file name
/// - anything else: the hint itself
pub fn derive_output(input: &Path, hint: Option<&str>) -> PathBuf {
    let hint = match hint {
        Some(h) if !h.is_empty() => h,
        _ => return suffixed(input),
    };

    let hint_path = Path::new(hint);
    if hint_path.is_dir() || is_directory_hint(hint) {
        let trimmed = hint.trim_end_matches(['/', MAIN_SEPARATOR]);
        let dir = if trimmed.is_empty() {
            hint_path
        } else {
            Path::new(trimmed)
        };
        return match input.file_name() {
            Some(name) => dir.join(name),
            None => dir.to_path_buf(),
        };
    }

    hint_path.to_path_buf()
}

/// Whether the hint names a directory by its trailing separator
pub fn is_directory_hint(hint: &str) -> bool {
    hint.ends_with('/') || hint.ends_with(MAIN_SEPARATOR)
}

fn suffixed(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };
    input.with_file_name(name)
}

/// Check if a path is a video file
pub fn is_video_file(path: &Path) -> bool {
    const VIDEO_EXTENSIONS: [&str; 9] = [
        "mp4", "mkv", "avi", "mov", "webm", "m4v", "ts", "wmv", "flv",
    ];

    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Replace directory arguments with the video files found beneath them
///
/// Files given explicitly are kept as-is whatever their extension. Files
/// found in a directory are sorted.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = WalkDir::new(input)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_video_file(e.path()))
            .map(|e| e.into_path())
            .collect();
        found.sort();
        files.extend(found);
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_hint_appends_suffix() {
        let input = Path::new("videos").join("input.mp4");
        assert_eq!(
            derive_output(&input, None),
            Path::new("videos").join("input-compressed.mp4")
        );
        assert_eq!(
            derive_output(Path::new("clip"), Some("")),
            PathBuf::from("clip-compressed")
        );
    }

    #[test]
    fn test_existing_directory_hint() {
        let dir = TempDir::new().unwrap();
        let hint = dir.path().to_str().unwrap();
        assert_eq!(
            derive_output(Path::new("in.mov"), Some(hint)),
            dir.path().join("in.mov")
        );
    }

    #[test]
    fn test_trailing_separator_hint() {
        assert_eq!(
            derive_output(Path::new("b.mp4"), Some("output/")),
            Path::new("output").join("b.mp4")
        );
        assert_eq!(
            derive_output(Path::new("c.mp4"), Some("multiple//")),
            Path::new("multiple").join("c.mp4")
        );
        let hint = format!("nested{}", MAIN_SEPARATOR);
        assert_eq!(
            derive_output(&Path::new("src").join("a.avi"), Some(&hint)),
            Path::new("nested").join("a.avi")
        );
    }

    #[test]
    fn test_explicit_file_hint() {
        assert_eq!(
            derive_output(Path::new("one.webm"), Some("out.webm")),
            PathBuf::from("out.webm")
        );
    }

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("a.MKV")));
        assert!(is_video_file(Path::new("dir/b.mp4")));
        assert!(!is_video_file(Path::new("notes.txt")));
        assert!(!is_video_file(Path::new("noext")));
    }

    #[test]
    fn test_expand_inputs_walks_directories() {
        let dir = TempDir::new().unwrap();
        let season = dir.path().join("season1");
        std::fs::create_dir_all(&season).unwrap();
        std::fs::write(season.join("e02.mkv"), b"").unwrap();
        std::fs::write(season.join("e01.mkv"), b"").unwrap();
        std::fs::write(season.join("cover.jpg"), b"").unwrap();

        let explicit = PathBuf::from("single.mp4");
        let files = expand_inputs(&[explicit.clone(), dir.path().to_path_buf()]);
        assert_eq!(
            files,
            vec![explicit, season.join("e01.mkv"), season.join("e02.mkv")]
        );
    }
}

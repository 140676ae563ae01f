use crate::error::CompressError;
use std::path::PathBuf;

/// One compression job
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    /// Input video
    pub source: PathBuf,
    /// Where the encoded file is written
    pub destination: PathBuf,
    /// Encoder arguments resolved from a preset, passed through untouched
    pub args: Vec<String>,
}

impl Task {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            args,
        }
    }

    /// Get the source filename
    pub fn filename(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Outcome of running one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub task: Task,
    /// `None` on success
    pub error: Option<CompressError>,
}

impl TaskResult {
    pub fn from_outcome(task: Task, outcome: Result<(), CompressError>) -> Self {
        Self {
            task,
            error: outcome.err(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_field_equality() {
        let a = Task::new("in.mp4", "out.mp4", vec!["-crf".into(), "23".into()]);
        let b = Task::new("in.mp4", "out.mp4", vec!["-crf".into(), "23".into()]);
        let c = Task::new("in.mp4", "out.mp4", vec!["-crf".into(), "28".into()]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_result_from_outcome() {
        let task = Task::new("videos/a.mkv", "a-compressed.mkv", Vec::new());
        assert_eq!(task.filename(), "a.mkv");
        assert_eq!(Task::new("/", "out.mkv", Vec::new()).filename(), "Unknown");

        let ok = TaskResult::from_outcome(task.clone(), Ok(()));
        assert!(ok.is_success());

        let failed = TaskResult::from_outcome(task, Err(CompressError::Interrupted));
        assert!(!failed.is_success());
        assert_eq!(failed.error, Some(CompressError::Interrupted));
    }
}

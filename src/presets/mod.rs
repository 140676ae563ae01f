pub mod types;

pub use types::{Preset, PresetOverrides};

use crate::error::PresetError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use types::{PresetFile, builtin_presets};

/// Presets persisted as a TOML file
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    pub const FILE_NAME: &'static str = "presets.toml";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/presets.toml`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    /// Get the default configuration directory
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("video-compress")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every preset, keyed and sorted by name
    ///
    /// A missing file is seeded with the built-in presets.
    pub fn load_all(&self) -> Result<BTreeMap<String, Preset>, PresetError> {
        if let Some(file) = self.read_file()? {
            debug!(
                "Loaded {} presets from {}",
                file.presets.len(),
                self.path.display()
            );
            return Ok(file.presets);
        }

        let file = PresetFile {
            presets: builtin_presets(),
        };
        // Save defaults for future editing
        if let Err(e) = self.write_file(&file) {
            warn!("Failed to save default presets: {}", e);
        }
        Ok(file.presets)
    }

    /// Look up one preset
    pub fn get(&self, name: &str) -> Result<Preset, PresetError> {
        let mut all = self.load_all()?;
        all.remove(name).ok_or_else(|| PresetError::NotFound {
            name: name.to_string(),
            available: all.into_keys().collect(),
        })
    }

    /// Insert or overwrite the preset called `name`
    pub fn save(&self, name: &str, preset: Preset) -> Result<(), PresetError> {
        let mut presets = self.load_all()?;
        presets.insert(name.to_string(), preset);
        self.write_file(&PresetFile { presets })?;
        info!("Saved preset {} to {}", name, self.path.display());
        Ok(())
    }

    /// Remove the preset called `name`, returning it
    pub fn delete(&self, name: &str) -> Result<Preset, PresetError> {
        let mut presets = self.load_all()?;
        let removed = match presets.remove(name) {
            Some(preset) => preset,
            None => {
                return Err(PresetError::NotFound {
                    name: name.to_string(),
                    available: presets.into_keys().collect(),
                });
            }
        };
        self.write_file(&PresetFile { presets })?;
        info!("Deleted preset {} from {}", name, self.path.display());
        Ok(removed)
    }

    fn read_file(&self) -> Result<Option<PresetFile>, PresetError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PresetError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let file = toml::from_str(&content).map_err(|source| PresetError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(file))
    }

    fn write_file(&self, file: &PresetFile) -> Result<(), PresetError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| PresetError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let toml_string = toml::to_string_pretty(file)?;
        std::fs::write(&self.path, toml_string).map_err(|source| PresetError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> PresetStore {
        PresetStore::in_dir(&dir.path().join("config"))
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.toml");
        std::fs::write(
            &path,
            r#"
[presets.default]
video_codec = "libx264"
preset = "medium"
crf = 23

[presets.archive]
video_codec = "libx265"
preset = "slow"
crf = 20
description = "High quality HEVC"
"#,
        )
        .unwrap();

        let all = PresetStore::new(&path).load_all().unwrap();
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["archive", "default"]);
        assert_eq!(all["archive"].video_codec, "libx265");
        assert_eq!(all["archive"].crf, 20);
        assert_eq!(all["archive"].description, "High quality HEVC");
        assert_eq!(all["default"].speed_preset, "medium");
    }

    #[test]
    fn test_missing_file_is_seeded() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let all = store.load_all().unwrap();
        assert_eq!(all.get("default"), Some(&Preset::default()));
        assert!(store.path().exists());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.toml");
        std::fs::write(&path, "presets = [not toml").unwrap();

        let err = PresetStore::new(&path).load_all().unwrap_err();
        assert!(matches!(err, PresetError::Parse { .. }));
    }

    #[test]
    fn test_save_then_get() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let preset = Preset {
            video_codec: "h264".to_string(),
            speed_preset: "fast".to_string(),
            crf: 30,
            description: String::new(),
        };

        store.save("new-preset", preset.clone()).unwrap();
        assert_eq!(store.get("new-preset").unwrap(), preset);
        // Seeded presets survive the write
        assert!(store.get("default").is_ok());

        let written = std::fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("[presets.new-preset]"));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut preset = Preset::default();
        store.save("x", preset.clone()).unwrap();
        preset.crf = 18;
        store.save("x", preset).unwrap();
        assert_eq!(store.get("x").unwrap().crf, 18);
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save("temp", Preset::default()).unwrap();

        let removed = store.delete("temp").unwrap();
        assert_eq!(removed, Preset::default());
        assert!(!store.load_all().unwrap().contains_key("temp"));
    }

    #[test]
    fn test_unknown_preset_lists_available() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        match store.delete("missing") {
            Err(PresetError::NotFound { name, available }) => {
                assert_eq!(name, "missing");
                assert_eq!(available, vec!["default"]);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        let err = store.get("missing").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown preset \"missing\"; available: default"
        );
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named bundle of ffmpeg encoder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// FFmpeg video encoder (`-c:v`)
    pub video_codec: String,
    /// Encoder speed preset (`-preset`)
    #[serde(rename = "preset")]
    pub speed_preset: String,
    /// Constant rate factor (`-crf`)
    pub crf: u8,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            speed_preset: "medium".to_string(),
            crf: 23,
            description: "Balanced H.264 encode".to_string(),
        }
    }
}

impl Preset {
    /// FFmpeg arguments for this preset, without input and output
    pub fn ffmpeg_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-preset".to_string(),
            self.speed_preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
        ]
    }

    /// Apply command-line overrides on top of this preset
    pub fn with_overrides(mut self, overrides: &PresetOverrides) -> Self {
        if let Some(codec) = &overrides.video_codec {
            self.video_codec = codec.clone();
        }
        if let Some(speed) = &overrides.speed_preset {
            self.speed_preset = speed.clone();
        }
        if let Some(crf) = overrides.crf {
            self.crf = crf;
        }
        self
    }
}

/// Per-invocation replacements for preset fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetOverrides {
    pub video_codec: Option<String>,
    pub speed_preset: Option<String>,
    pub crf: Option<u8>,
}

/// On-disk layout of the presets file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PresetFile {
    #[serde(default)]
    pub presets: BTreeMap<String, Preset>,
}

/// Presets written on first use
pub(super) fn builtin_presets() -> BTreeMap<String, Preset> {
    BTreeMap::from([("default".to_string(), Preset::default())])
}

//! Engine options with TOML preset support.
//!
//! Playback timing, rig naming and recognition endpoints live here. Options
//! serialize to/from TOML so a preset can override just one section.

mod animation;
mod recognition;
mod rig;

use std::path::Path;

pub use animation::AnimationOptions;
pub use recognition::RecognitionOptions;
pub use rig::{RigOptions, RigPreset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SignposeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Pose and pause timing.
    pub animation: AnimationOptions,
    /// Bone naming of the attached model.
    pub rig: RigOptions,
    /// Recognition service endpoints.
    pub recognition: RecognitionOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SignposeError> {
        let content =
            std::fs::read_to_string(path).map_err(SignposeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SignposeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SignposeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SignposeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SignposeError::Io)?;
        }
        std::fs::write(path, content).map_err(SignposeError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

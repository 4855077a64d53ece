//! Skeleton descriptions: the hand-off format between a model loader and
//! the [`BoneRegistry`].
//!
//! A real loader walks the model's node tree; this module accepts the same
//! information as a flat JSON/TOML list (parents listed before children) and
//! can synthesize a skeleton straight from a [`RigNaming`] for headless use.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::naming::{Finger, RigNaming};
use super::registry::BoneRegistry;
use crate::error::SignposeError;

/// One bone as reported by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneDesc {
    /// Model bone name.
    pub name: String,
    /// Parent bone name, absent for roots.
    #[serde(default)]
    pub parent: Option<String>,
    /// Local Euler rotation in radians.
    #[serde(default)]
    pub rotation: Vec3,
}

/// Flat skeleton description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonDesc {
    /// Bones, parents first.
    pub bones: Vec<BoneDesc>,
}

impl SkeletonDesc {
    /// Parse a description from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self, SignposeError> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        if is_toml {
            toml::from_str(&content)
                .map_err(|e| SignposeError::SkeletonParse(e.to_string()))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| SignposeError::SkeletonParse(e.to_string()))
        }
    }

    /// Build a registry, resolving parents by name.
    pub fn into_registry(self) -> Result<BoneRegistry, SignposeError> {
        let mut registry = BoneRegistry::new();
        for bone in self.bones {
            let parent = match &bone.parent {
                Some(name) => Some(registry.get(name).ok_or_else(|| {
                    SignposeError::SkeletonParse(format!(
                        "bone `{}` listed before its parent `{name}`",
                        bone.name
                    ))
                })?),
                None => None,
            };
            let _ = registry.register(bone.name, parent, bone.rotation)?;
        }
        Ok(registry)
    }

    /// Synthetic skeleton covering every bone a naming refers to, all at
    /// zero rotation: shoulder → forearm → hand → finger chains.
    #[must_use]
    pub fn from_naming(naming: &RigNaming) -> Self {
        let mut bones = Vec::new();
        let mut last_arm: Option<String> = None;
        for name in [&naming.shoulder, &naming.forearm, &naming.hand]
            .into_iter()
            .flatten()
        {
            bones.push(BoneDesc {
                name: name.clone(),
                parent: last_arm.clone(),
                rotation: Vec3::ZERO,
            });
            last_arm = Some(name.clone());
        }
        for finger in Finger::ALL {
            let mut parent = last_arm.clone();
            for name in naming.chain(finger) {
                bones.push(BoneDesc {
                    name: name.clone(),
                    parent: parent.clone(),
                    rotation: Vec3::ZERO,
                });
                parent = Some(name.clone());
            }
        }
        Self { bones }
    }
}

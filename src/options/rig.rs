use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::skeleton::RigNaming;

/// Built-in bone naming schemes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RigPreset {
    /// Standalone hand model, three joints per digit.
    #[default]
    HandModel,
    /// Mixamo humanoid with arm bones and four joints per digit.
    Mixamo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rig", inline)]
#[serde(default)]
/// Which bone names pose roles map onto.
pub struct RigOptions {
    /// Naming preset.
    #[schemars(title = "Preset")]
    pub preset: RigPreset,
    /// Bone name prefix for the Mixamo preset.
    #[schemars(title = "Mixamo Prefix")]
    pub mixamo_prefix: String,
    /// Full naming table, overriding the preset when present.
    #[schemars(skip)]
    pub naming: Option<RigNaming>,
}

impl RigOptions {
    /// Resolve the naming adapter these options describe.
    #[must_use]
    pub fn naming(&self) -> RigNaming {
        if let Some(naming) = &self.naming {
            return naming.clone();
        }
        match self.preset {
            RigPreset::HandModel => RigNaming::hand_model(),
            RigPreset::Mixamo => RigNaming::mixamo(&self.mixamo_prefix),
        }
    }
}

impl Default for RigOptions {
    fn default() -> Self {
        Self {
            preset: RigPreset::HandModel,
            mixamo_prefix: "mixamorigRight".to_owned(),
            naming: None,
        }
    }
}

//! Pose specifications: what a named pose asks the skeleton to do.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::skeleton::{BoneRole, Finger};

/// Target rotation for one bone role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoneTarget {
    /// Joint to rotate.
    pub role: BoneRole,
    /// Local Euler target (radians).
    pub rotation: Vec3,
}

impl BoneTarget {
    /// Target for a role.
    #[must_use]
    pub fn new(role: BoneRole, rotation: Vec3) -> Self {
        Self { role, rotation }
    }
}

/// Per-finger curl amounts, 0 = open, 1 = fully closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerCurl {
    /// Thumb curl.
    pub thumb: f32,
    /// Index finger curl.
    pub index: f32,
    /// Middle finger curl.
    pub middle: f32,
    /// Ring finger curl.
    pub ring: f32,
    /// Pinky curl.
    pub pinky: f32,
}

impl FingerCurl {
    /// Curl from `[thumb, index, middle, ring, pinky]`.
    #[must_use]
    pub const fn new(amounts: [f32; 5]) -> Self {
        let [thumb, index, middle, ring, pinky] = amounts;
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    /// Same amount on every finger.
    #[must_use]
    pub const fn uniform(amount: f32) -> Self {
        Self::new([amount; 5])
    }

    /// Amount for one finger.
    #[must_use]
    pub fn amount(&self, finger: Finger) -> f32 {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }
}

/// One step of a composite sign, with its own duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoseStep {
    /// Rotate explicit bones together.
    Bones {
        /// Bone targets animated concurrently.
        targets: Vec<BoneTarget>,
        /// Step duration in milliseconds.
        duration_ms: u64,
    },
    /// Curl the fingers.
    Curl {
        /// Curl amounts.
        curl: FingerCurl,
        /// Step duration in milliseconds.
        duration_ms: u64,
    },
    /// Keep the current pose for a while.
    Hold {
        /// Hold duration in milliseconds.
        duration_ms: u64,
    },
}

impl PoseStep {
    /// Explicit bone step.
    #[must_use]
    pub fn bones(targets: Vec<BoneTarget>, duration_ms: u64) -> Self {
        Self::Bones {
            targets,
            duration_ms,
        }
    }

    /// Single-bone step.
    #[must_use]
    pub fn bone(role: BoneRole, rotation: Vec3, duration_ms: u64) -> Self {
        Self::bones(vec![BoneTarget::new(role, rotation)], duration_ms)
    }

    /// Finger curl step.
    #[must_use]
    pub fn curl(curl: FingerCurl, duration_ms: u64) -> Self {
        Self::Curl { curl, duration_ms }
    }

    /// Hold step.
    #[must_use]
    pub fn hold(duration_ms: u64) -> Self {
        Self::Hold { duration_ms }
    }

    /// How long this step runs.
    #[must_use]
    pub fn duration(&self) -> Duration {
        let ms = match self {
            Self::Bones { duration_ms, .. }
            | Self::Curl { duration_ms, .. }
            | Self::Hold { duration_ms } => *duration_ms,
        };
        Duration::from_millis(ms)
    }
}

/// A named target the sequencer can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoseSpec {
    /// Explicit bone rotations (one or more), applied together.
    Bones {
        /// Bone targets.
        targets: Vec<BoneTarget>,
    },
    /// Finger curl expanded through the curl profiles.
    Curl {
        /// Curl amounts.
        curl: FingerCurl,
    },
    /// Ordered steps, each finishing before the next starts.
    Sequence {
        /// Steps in performance order.
        steps: Vec<PoseStep>,
    },
}

impl PoseSpec {
    /// Number of steps this spec performs.
    #[must_use]
    pub fn step_count(&self) -> usize {
        match self {
            Self::Bones { .. } | Self::Curl { .. } => 1,
            Self::Sequence { steps } => steps.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_durations() {
        assert_eq!(
            PoseStep::hold(420).duration(),
            Duration::from_millis(420)
        );
        assert_eq!(
            PoseStep::curl(FingerCurl::uniform(1.0), 200).duration(),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_sequence_from_toml() {
        let spec: PoseSpec = toml::from_str(
            r#"
kind = "sequence"

[[steps]]
kind = "bones"
duration_ms = 300
targets = [{ role = "forearm", rotation = [-0.2, 0.0, 0.0] }]

[[steps]]
kind = "curl"
duration_ms = 200
curl = { index = 1.0, pinky = 0.5 }

[[steps]]
kind = "hold"
duration_ms = 120
"#,
        )
        .unwrap();

        let PoseSpec::Sequence { steps } = &spec else {
            panic!("expected a sequence, got {spec:?}");
        };
        assert_eq!(spec.step_count(), 3);
        assert_eq!(
            steps[0],
            PoseStep::bone(BoneRole::ForeArm, Vec3::new(-0.2, 0.0, 0.0), 300)
        );
        let PoseStep::Curl { curl, .. } = steps[1] else {
            panic!("expected a curl step");
        };
        assert_eq!(curl.amount(Finger::Index), 1.0);
        assert_eq!(curl.amount(Finger::Thumb), 0.0);
    }
}

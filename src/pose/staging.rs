//! Arm staging around a fingerspelled letter on rigs that have an arm.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::spec::{FingerCurl, PoseStep};
use crate::skeleton::BoneRole;

/// Loose hand the signs and staged letters relax into.
pub const RELAXED: FingerCurl = FingerCurl::new([0.05, 0.05, 0.05, 0.05, 0.03]);

/// Raises the hand into view, forms the handshape, holds it, relaxes and
/// lowers the arm again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterStaging {
    /// Raised upper arm rotation.
    pub shoulder: Vec3,
    /// Raised forearm rotation.
    pub forearm: Vec3,
    /// Upper arm raise duration (ms).
    pub raise_ms: u64,
    /// Forearm raise duration (ms).
    pub forearm_ms: u64,
    /// Handshape duration (ms).
    pub curl_ms: u64,
    /// How long the handshape is held (ms).
    pub hold_ms: u64,
    /// Handshape the fingers relax into afterwards.
    pub relax: FingerCurl,
    /// Relax duration (ms).
    pub relax_ms: u64,
    /// Forearm return duration (ms).
    pub forearm_return_ms: u64,
    /// Upper arm return duration (ms).
    pub shoulder_return_ms: u64,
}

impl Default for LetterStaging {
    fn default() -> Self {
        Self {
            shoulder: Vec3::new(-0.6, 1.0, -0.6),
            forearm: Vec3::new(-0.15, 0.0, 0.0),
            raise_ms: 280,
            forearm_ms: 220,
            curl_ms: 220,
            hold_ms: 420,
            relax: RELAXED,
            relax_ms: 200,
            forearm_return_ms: 240,
            shoulder_return_ms: 300,
        }
    }
}

impl LetterStaging {
    /// Steps performing `curl` inside this staging.
    #[must_use]
    pub fn steps(&self, curl: FingerCurl) -> Vec<PoseStep> {
        vec![
            PoseStep::bone(BoneRole::Shoulder, self.shoulder, self.raise_ms),
            PoseStep::bone(BoneRole::ForeArm, self.forearm, self.forearm_ms),
            PoseStep::curl(curl, self.curl_ms),
            PoseStep::hold(self.hold_ms),
            PoseStep::curl(self.relax, self.relax_ms),
            PoseStep::bone(BoneRole::ForeArm, Vec3::ZERO, self.forearm_return_ms),
            PoseStep::bone(BoneRole::Shoulder, Vec3::ZERO, self.shoulder_return_ms),
        ]
    }
}

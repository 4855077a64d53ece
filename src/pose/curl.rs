//! Finger curl expansion: one scalar per finger → per-joint rotations.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::spec::{BoneTarget, FingerCurl};
use crate::skeleton::{BoneRole, Finger, RigNaming};

/// How a curl amount maps onto one finger chain.
///
/// For joint `i` counted outward from the palm:
/// `curl_axis · amount · gain · max(base_factor − i·decay_per_joint, 0)
///  + fixed_axis · amount · gain`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlProfile {
    /// Factor applied to the joint nearest the palm.
    pub base_factor: f32,
    /// How much less each successive joint curls.
    pub decay_per_joint: f32,
    /// Overall scale (sign flips the curl direction for mirrored rigs).
    pub gain: f32,
    /// Axis weights of the decaying curl.
    pub curl_axis: Vec3,
    /// Axis weights applied uniformly to every joint of the chain.
    pub fixed_axis: Vec3,
}

impl CurlProfile {
    /// Long fingers of the standalone hand rig: curl about X.
    pub const FINGER: Self = Self {
        base_factor: 1.0,
        decay_per_joint: 0.28,
        gain: 1.0,
        curl_axis: Vec3::X,
        fixed_axis: Vec3::ZERO,
    };

    /// Thumb of the standalone hand rig: curls about Y and tucks in on Z.
    pub const THUMB: Self = Self {
        base_factor: 1.0,
        decay_per_joint: 0.4,
        gain: 1.0,
        curl_axis: Vec3::Y,
        fixed_axis: Vec3::new(0.0, 0.0, 0.4),
    };

    /// Any digit of the Mixamo avatar, thumb included: curl about X.
    pub const AVATAR_DIGIT: Self = Self {
        base_factor: 0.9,
        decay_per_joint: 0.25,
        gain: 1.1,
        curl_axis: Vec3::X,
        fixed_axis: Vec3::ZERO,
    };

    /// Rotation for joint `joint` of a finger curled by `amount`.
    #[must_use]
    pub fn joint_rotation(&self, amount: f32, joint: usize) -> Vec3 {
        let amount = amount.clamp(0.0, 1.0) * self.gain;
        let factor =
            (self.decay_per_joint.mul_add(-(joint as f32), self.base_factor))
                .max(0.0);
        self.curl_axis * (amount * factor) + self.fixed_axis * amount
    }
}

impl Default for CurlProfile {
    fn default() -> Self {
        Self::FINGER
    }
}

/// Curl profiles for the long fingers and the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlProfiles {
    /// Index, middle, ring and pinky.
    pub finger: CurlProfile,
    /// Thumb chain.
    pub thumb: CurlProfile,
}

impl CurlProfiles {
    /// Standalone hand rig.
    #[must_use]
    pub const fn hand_model() -> Self {
        Self {
            finger: CurlProfile::FINGER,
            thumb: CurlProfile::THUMB,
        }
    }

    /// Mixamo avatar, where every digit shares one profile.
    #[must_use]
    pub const fn mixamo() -> Self {
        Self {
            finger: CurlProfile::AVATAR_DIGIT,
            thumb: CurlProfile::AVATAR_DIGIT,
        }
    }

    /// Profile used for a finger.
    #[must_use]
    pub fn for_finger(&self, finger: Finger) -> &CurlProfile {
        match finger {
            Finger::Thumb => &self.thumb,
            _ => &self.finger,
        }
    }

    /// Expand a curl into bone targets for every joint the rig names.
    #[must_use]
    pub fn expand(
        &self,
        curl: &FingerCurl,
        naming: &RigNaming,
    ) -> Vec<BoneTarget> {
        let mut targets = Vec::new();
        for finger in Finger::ALL {
            let profile = self.for_finger(finger);
            let amount = curl.amount(finger);
            for joint in 0..naming.chain(finger).len() {
                targets.push(BoneTarget::new(
                    BoneRole::Finger(finger, joint as u8),
                    profile.joint_rotation(amount, joint),
                ));
            }
        }
        targets
    }
}

impl Default for CurlProfiles {
    fn default() -> Self {
        Self::hand_model()
    }
}

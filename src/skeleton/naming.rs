//! Symbolic bone roles and the per-model naming adapter.
//!
//! Pose data never names model bones directly. It targets a [`BoneRole`]
//! and a [`RigNaming`] maps that role onto whatever the loaded model calls
//! the joint, so the same pose table drives a standalone hand rig and a full
//! Mixamo avatar.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::registry::{BoneId, BoneRegistry};
use crate::pose::{BoneTarget, CurlProfiles, FingerCurl, LetterStaging};

/// The five digits of a hand, thumb first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Finger {
    /// Thumb (rotates on its own axis convention).
    Thumb,
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Pinky finger.
    Pinky,
}

impl Finger {
    /// All fingers, thumb first.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Lowercase name used in config files and role strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

impl FromStr for Finger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Finger::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown finger `{s}`"))
    }
}

/// A joint addressed by what it does rather than what the model calls it.
///
/// Serialized as a short string: `shoulder`, `forearm`, `hand`, or
/// `<finger>.<joint>` where joint 0 is nearest the palm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BoneRole {
    /// Upper arm of the signing side.
    Shoulder,
    /// Forearm of the signing side.
    ForeArm,
    /// Wrist/hand root of the signing side.
    Hand,
    /// Finger segment, joint index counted outward from the palm.
    Finger(Finger, u8),
}

impl fmt::Display for BoneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoneRole::Shoulder => f.write_str("shoulder"),
            BoneRole::ForeArm => f.write_str("forearm"),
            BoneRole::Hand => f.write_str("hand"),
            BoneRole::Finger(finger, joint) => {
                write!(f, "{}.{joint}", finger.as_str())
            }
        }
    }
}

impl FromStr for BoneRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shoulder" => Ok(BoneRole::Shoulder),
            "forearm" => Ok(BoneRole::ForeArm),
            "hand" => Ok(BoneRole::Hand),
            _ => {
                let (finger, joint) = s
                    .split_once('.')
                    .ok_or_else(|| format!("unknown bone role `{s}`"))?;
                let joint = joint
                    .parse::<u8>()
                    .map_err(|e| format!("bad joint index in `{s}`: {e}"))?;
                Ok(BoneRole::Finger(finger.parse()?, joint))
            }
        }
    }
}

impl TryFrom<String> for BoneRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BoneRole> for String {
    fn from(role: BoneRole) -> Self {
        role.to_string()
    }
}

/// Maps [`BoneRole`]s to the bone names of one particular model, along
/// with how that model's fingers bend and how it stages a letter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigNaming {
    /// Upper arm bone, if the model has an arm.
    pub shoulder: Option<String>,
    /// Forearm bone.
    pub forearm: Option<String>,
    /// Hand/wrist bone.
    pub hand: Option<String>,
    /// Thumb chain, palm outward.
    pub thumb: Vec<String>,
    /// Index finger chain, palm outward.
    pub index: Vec<String>,
    /// Middle finger chain, palm outward.
    pub middle: Vec<String>,
    /// Ring finger chain, palm outward.
    pub ring: Vec<String>,
    /// Pinky chain, palm outward.
    pub pinky: Vec<String>,
    /// Curl expansion constants for this model's joint axes.
    pub curl: CurlProfiles,
    /// Arm moves framing each fingerspelled letter, for rigs with an arm.
    pub letter_staging: Option<LetterStaging>,
}

impl RigNaming {
    /// Standalone left-hand rig with three joints per digit.
    #[must_use]
    pub fn hand_model() -> Self {
        let names = |list: [&str; 3]| list.map(str::to_owned).to_vec();
        Self {
            shoulder: None,
            forearm: None,
            hand: None,
            thumb: names(["thumb01L_5", "thumb02L_4", "thumb03L_3"]),
            index: names(["f_index01L_2", "f_index02L_1", "f_index03L_0"]),
            middle: names(["f_middle01L_9", "f_middle02L_8", "f_middle03L_7"]),
            ring: names(["f_ring01L_13", "f_ring02L_12", "f_ring03L_11"]),
            pinky: names(["f_pinky01L_17", "f_pinky02L_16", "f_pinky03L_15"]),
            curl: CurlProfiles::hand_model(),
            letter_staging: None,
        }
    }

    /// Mixamo humanoid naming, e.g. `mixamo("mixamorigRight")`.
    ///
    /// Finger chains have four joints named `<prefix>Hand<Finger><1..4>`.
    #[must_use]
    pub fn mixamo(prefix: &str) -> Self {
        let chain = |finger: &str| -> Vec<String> {
            (1..=4).map(|i| format!("{prefix}Hand{finger}{i}")).collect()
        };
        Self {
            shoulder: Some(format!("{prefix}Arm")),
            forearm: Some(format!("{prefix}ForeArm")),
            hand: Some(format!("{prefix}Hand")),
            thumb: chain("Thumb"),
            index: chain("Index"),
            middle: chain("Middle"),
            ring: chain("Ring"),
            pinky: chain("Pinky"),
            curl: CurlProfiles::mixamo(),
            letter_staging: Some(LetterStaging::default()),
        }
    }

    /// Bone names of one finger, palm outward.
    #[must_use]
    pub fn chain(&self, finger: Finger) -> &[String] {
        match finger {
            Finger::Thumb => &self.thumb,
            Finger::Index => &self.index,
            Finger::Middle => &self.middle,
            Finger::Ring => &self.ring,
            Finger::Pinky => &self.pinky,
        }
    }

    /// Model bone name for a role, if this rig has one.
    #[must_use]
    pub fn bone_name(&self, role: BoneRole) -> Option<&str> {
        match role {
            BoneRole::Shoulder => self.shoulder.as_deref(),
            BoneRole::ForeArm => self.forearm.as_deref(),
            BoneRole::Hand => self.hand.as_deref(),
            BoneRole::Finger(finger, joint) => self
                .chain(finger)
                .get(joint as usize)
                .map(String::as_str),
        }
    }

    /// Expand a finger curl into bone targets for every joint this rig names.
    #[must_use]
    pub fn expand_curl(&self, curl: &FingerCurl) -> Vec<BoneTarget> {
        self.curl.expand(curl, self)
    }

    /// Resolve a role to a registered bone.
    #[must_use]
    pub fn resolve(
        &self,
        role: BoneRole,
        registry: &BoneRegistry,
    ) -> Option<BoneId> {
        registry.get(self.bone_name(role)?)
    }

    /// Every role this naming knows about, arm first.
    #[must_use]
    pub fn roles(&self) -> Vec<BoneRole> {
        let arm = [
            (BoneRole::Shoulder, self.shoulder.is_some()),
            (BoneRole::ForeArm, self.forearm.is_some()),
            (BoneRole::Hand, self.hand.is_some()),
        ];
        let mut roles: Vec<BoneRole> = arm
            .into_iter()
            .filter_map(|(role, present)| present.then_some(role))
            .collect();
        for finger in Finger::ALL {
            for joint in 0..self.chain(finger).len() {
                roles.push(BoneRole::Finger(finger, joint as u8));
            }
        }
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_round_trip() {
        for role in [
            BoneRole::Shoulder,
            BoneRole::ForeArm,
            BoneRole::Hand,
            BoneRole::Finger(Finger::Pinky, 2),
        ] {
            assert_eq!(role.to_string().parse::<BoneRole>(), Ok(role));
        }
        assert!("elbow".parse::<BoneRole>().is_err());
        assert!("index.x".parse::<BoneRole>().is_err());
        assert!("toe.1".parse::<BoneRole>().is_err());
    }

    #[test]
    fn test_hand_model_names() {
        let naming = RigNaming::hand_model();
        assert_eq!(
            naming.bone_name(BoneRole::Finger(Finger::Index, 0)),
            Some("f_index01L_2")
        );
        assert_eq!(naming.bone_name(BoneRole::Finger(Finger::Index, 3)), None);
        assert_eq!(naming.bone_name(BoneRole::Shoulder), None);
        assert_eq!(naming.roles().len(), 15);
    }

    #[test]
    fn test_mixamo_names() {
        let naming = RigNaming::mixamo("mixamorigRight");
        assert_eq!(
            naming.bone_name(BoneRole::ForeArm),
            Some("mixamorigRightForeArm")
        );
        assert_eq!(
            naming.bone_name(BoneRole::Finger(Finger::Thumb, 3)),
            Some("mixamorigRightHandThumb4")
        );
        assert_eq!(naming.roles().len(), 3 + 5 * 4);
    }

    #[test]
    fn test_naming_from_toml() {
        let naming: RigNaming = toml::from_str(
            r#"
hand = "Wrist"
index = ["Idx0", "Idx1"]
"#,
        )
        .unwrap();
        assert_eq!(naming.bone_name(BoneRole::Hand), Some("Wrist"));
        assert_eq!(naming.chain(Finger::Index).len(), 2);
        assert!(naming.chain(Finger::Thumb).is_empty());
        assert_eq!(naming.curl, CurlProfiles::hand_model());
        assert!(naming.letter_staging.is_none());
    }

    #[test]
    fn test_curl_constants_from_toml() {
        let naming: RigNaming = toml::from_str(
            r"
index = ['Idx0', 'Idx1']

[curl.finger]
decay_per_joint = 0.25
gain = -1.1
",
        )
        .unwrap();
        assert_eq!(naming.curl.finger.decay_per_joint, 0.25);
        assert_eq!(naming.curl.finger.gain, -1.1);
        // unspecified fields fall back to the profile default
        assert_eq!(naming.curl.finger.base_factor, 1.0);
        assert_eq!(naming.curl.thumb, CurlProfiles::hand_model().thumb);

        let tip = naming.expand_curl(&FingerCurl::uniform(1.0))[1];
        assert!((tip.rotation.x + 1.1 * 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_presets_carry_their_own_bend() {
        let mixamo = RigNaming::mixamo("mixamorigRight");
        assert_eq!(mixamo.curl, CurlProfiles::mixamo());
        assert!(mixamo.letter_staging.is_some());
        let hand = RigNaming::hand_model();
        assert_eq!(hand.curl, CurlProfiles::hand_model());
        assert!(hand.letter_staging.is_none());
    }
}

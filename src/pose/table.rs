//! The pose table: letters, named signs and the sign vocabulary.
//!
//! All numbers live in [`PoseTableConfig`], which ships with built-in
//! defaults and can be replaced wholesale from a TOML file.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::spec::{BoneTarget, FingerCurl, PoseSpec, PoseStep};
use super::staging::RELAXED;
use crate::error::SignposeError;
use crate::skeleton::{BoneRole, Finger};

/// Fingerspelling alphabet: `[thumb, index, middle, ring, pinky]`.
const ALPHABET: [(char, [f32; 5]); 26] = [
    ('a', [0.9, 1.0, 1.0, 1.0, 1.0]),
    ('b', [0.1, 0.0, 0.0, 0.0, 0.0]),
    ('c', [0.4, 0.5, 0.5, 0.5, 0.5]),
    ('d', [1.0, 0.0, 1.0, 1.0, 1.0]),
    ('e', [1.0, 1.0, 1.0, 1.0, 1.0]),
    ('f', [0.25, 0.0, 1.0, 1.0, 1.0]),
    ('g', [1.0, 0.0, 1.0, 1.0, 1.0]),
    ('h', [1.0, 0.0, 0.0, 1.0, 1.0]),
    ('i', [1.0, 1.0, 1.0, 1.0, 0.0]),
    ('j', [1.0, 1.0, 1.0, 1.0, 0.0]),
    ('k', [1.0, 0.0, 0.0, 1.0, 1.0]),
    ('l', [0.0, 0.0, 1.0, 1.0, 1.0]),
    ('m', [1.0, 1.0, 1.0, 0.8, 1.0]),
    ('n', [1.0, 1.0, 0.8, 1.0, 1.0]),
    ('o', [0.4, 0.4, 0.4, 0.4, 0.4]),
    ('p', [1.0, 0.0, 0.0, 1.0, 1.0]),
    ('q', [1.0, 0.0, 1.0, 1.0, 1.0]),
    ('r', [1.0, 0.0, 0.0, 1.0, 1.0]),
    ('s', [1.0, 1.0, 1.0, 1.0, 1.0]),
    ('t', [1.0, 1.0, 1.0, 1.0, 1.0]),
    ('u', [1.0, 0.0, 0.0, 1.0, 1.0]),
    ('v', [1.0, 0.0, 0.0, 1.0, 1.0]),
    ('w', [1.0, 0.0, 0.0, 0.0, 1.0]),
    ('x', [1.0, 0.4, 1.0, 1.0, 1.0]),
    ('y', [0.0, 1.0, 1.0, 1.0, 0.0]),
    ('z', [1.0, 0.0, 1.0, 1.0, 1.0]),
];

/// A canned multi-step sign and the words that trigger it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignDef {
    /// Pose table name of the sign.
    pub name: String,
    /// Tokens that match exactly (lowercase).
    #[serde(default)]
    pub words: Vec<String>,
    /// Token prefixes that match (lowercase).
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Steps performed in order.
    pub steps: Vec<PoseStep>,
}

impl SignDef {
    /// Whether a lowercase token triggers this sign.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.words.iter().any(|w| w == token)
            || self.prefixes.iter().any(|p| token.starts_with(p.as_str()))
    }
}

/// Serializable pose table data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseTableConfig {
    /// Fingerspelling handshapes keyed by lowercase letter.
    pub letters: BTreeMap<String, FingerCurl>,
    /// Canned signs, matched in order.
    pub signs: Vec<SignDef>,
    /// Additional named poses (e.g. `neutral`).
    pub poses: BTreeMap<String, PoseSpec>,
}

impl Default for PoseTableConfig {
    fn default() -> Self {
        let letters = ALPHABET
            .iter()
            .map(|(c, amounts)| (c.to_string(), FingerCurl::new(*amounts)))
            .collect();
        let mut poses = BTreeMap::new();
        let _ = poses.insert(
            "neutral".to_owned(),
            PoseSpec::Sequence {
                steps: neutral_steps(),
            },
        );
        Self {
            letters,
            signs: default_signs(),
            poses,
        }
    }
}

impl PoseTableConfig {
    /// Load a table from a TOML file. Missing sections use defaults.
    pub fn load(path: &Path) -> Result<Self, SignposeError> {
        let content = std::fs::read_to_string(path).map_err(SignposeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SignposeError::OptionsParse(e.to_string()))
    }

    /// Save the table to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SignposeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SignposeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SignposeError::Io)?;
        }
        std::fs::write(path, content).map_err(SignposeError::Io)
    }
}

/// Read-only lookup from names to [`PoseSpec`]s.
#[derive(Debug, Clone)]
pub struct PoseTable {
    specs: FxHashMap<String, PoseSpec>,
    signs: Vec<SignDef>,
}

impl PoseTable {
    /// Build the lookup structures from config data.
    ///
    /// Names are lowercased; later entries replace earlier ones, with named
    /// poses applied after letters and signs.
    #[must_use]
    pub fn from_config(config: PoseTableConfig) -> Self {
        let mut specs = FxHashMap::default();
        for (letter, curl) in config.letters {
            let _ = specs.insert(letter.to_lowercase(), PoseSpec::Curl { curl });
        }
        for sign in &config.signs {
            let _ = specs.insert(
                sign.name.to_lowercase(),
                PoseSpec::Sequence {
                    steps: sign.steps.clone(),
                },
            );
        }
        for (name, spec) in config.poses {
            let _ = specs.insert(name.to_lowercase(), spec);
        }
        Self {
            specs,
            signs: config.signs,
        }
    }

    /// Look up a pose by name (case-insensitive).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&PoseSpec> {
        self.specs
            .get(name)
            .or_else(|| self.specs.get(&name.to_lowercase()))
    }

    /// Pose for a single fingerspelled character.
    #[must_use]
    pub fn letter(&self, c: char) -> Option<&PoseSpec> {
        if !c.is_alphabetic() {
            return None;
        }
        self.lookup(&c.to_lowercase().to_string())
    }

    /// Name of the canned sign a lowercase token triggers, if any.
    #[must_use]
    pub fn match_sign(&self, token: &str) -> Option<&str> {
        self.signs
            .iter()
            .find(|sign| sign.matches(token))
            .map(|sign| sign.name.as_str())
    }

    /// Number of named poses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for PoseTable {
    fn default() -> Self {
        Self::from_config(PoseTableConfig::default())
    }
}

fn arm_raise(shoulder: Vec3, forearm: Vec3) -> [PoseStep; 2] {
    [
        PoseStep::bone(BoneRole::Shoulder, shoulder, 300),
        PoseStep::bone(BoneRole::ForeArm, forearm, 250),
    ]
}

fn arm_return() -> [PoseStep; 3] {
    [
        PoseStep::curl(RELAXED, 200),
        PoseStep::bone(BoneRole::ForeArm, Vec3::ZERO, 300),
        PoseStep::bone(BoneRole::Shoulder, Vec3::ZERO, 350),
    ]
}

fn hello_steps() -> Vec<PoseStep> {
    let wrist = |y: f32, ms: u64| {
        PoseStep::bone(BoneRole::Hand, Vec3::new(-0.1, y, 0.0), ms)
    };
    let mut steps = vec![
        PoseStep::bone(BoneRole::Shoulder, Vec3::new(-0.6, 0.0, -0.9), 350),
        PoseStep::bone(BoneRole::Shoulder, Vec3::new(-1.0, 0.0, -0.9), 300),
        PoseStep::bone(BoneRole::ForeArm, Vec3::new(-0.4, 1.0, 0.0), 250),
        PoseStep::curl(FingerCurl::new([0.15, 0.15, 0.15, 0.15, 0.12]), 200),
        wrist(0.5, 220),
    ];
    for _ in 0..2 {
        steps.push(wrist(0.8, 160));
        steps.push(wrist(0.45, 160));
    }
    steps.extend(arm_return());
    steps
}

fn thank_you_steps() -> Vec<PoseStep> {
    let palm = |y: f32, ms: u64| {
        PoseStep::bone(BoneRole::Hand, Vec3::new(-0.05, y, 0.0), ms)
    };
    let mut steps = vec![
        PoseStep::bone(BoneRole::Shoulder, Vec3::new(-0.9, 1.0, -0.7), 350),
        PoseStep::bone(BoneRole::ForeArm, Vec3::new(-0.25, 0.0, 0.0), 300),
        PoseStep::curl(FingerCurl::uniform(0.05), 200),
        palm(0.5, 250),
        palm(0.9, 200),
        palm(0.5, 200),
    ];
    steps.extend(arm_return());
    steps
}

fn yes_steps() -> Vec<PoseStep> {
    let mut steps = arm_raise(
        Vec3::new(-0.6, 1.0, -0.6),
        Vec3::new(-0.2, 0.0, 0.0),
    )
    .to_vec();
    steps.push(PoseStep::curl(FingerCurl::uniform(1.0), 200));
    for _ in 0..2 {
        steps.push(PoseStep::bone(
            BoneRole::ForeArm,
            Vec3::new(-0.4, 0.0, 0.0),
            150,
        ));
        steps.push(PoseStep::bone(
            BoneRole::ForeArm,
            Vec3::new(-0.2, 0.0, 0.0),
            150,
        ));
    }
    steps.extend(arm_return());
    steps
}

fn no_steps() -> Vec<PoseStep> {
    let thumb = |x: [f32; 3]| {
        (0..3)
            .map(|joint| {
                BoneTarget::new(
                    BoneRole::Finger(Finger::Thumb, joint as u8),
                    Vec3::new(x[joint], 0.0, 0.0),
                )
            })
            .collect::<Vec<_>>()
    };
    let mut steps = arm_raise(
        Vec3::new(-0.8, 1.0, -0.6),
        Vec3::new(-0.25, 0.0, 0.0),
    )
    .to_vec();
    steps.push(PoseStep::curl(FingerCurl::new([0.7, 0.0, 0.0, 1.0, 1.0]), 200));
    for _ in 0..2 {
        steps.push(PoseStep::bones(thumb([-0.9, -0.765, -0.63]), 100));
        steps.push(PoseStep::hold(20));
        steps.push(PoseStep::bones(thumb([-0.2; 3]), 100));
        steps.push(PoseStep::hold(20));
    }
    steps.extend(arm_return());
    steps
}

fn neutral_steps() -> Vec<PoseStep> {
    let mut targets = vec![
        BoneTarget::new(BoneRole::Shoulder, Vec3::new(1.3, 0.0, -0.35)),
        BoneTarget::new(BoneRole::ForeArm, Vec3::ZERO),
    ];
    // every joint a four-joint chain could have; rigs skip what they lack
    for finger in Finger::ALL {
        for joint in 0..4 {
            targets.push(BoneTarget::new(
                BoneRole::Finger(finger, joint),
                Vec3::new(0.5, 0.5, 0.0),
            ));
        }
    }
    vec![PoseStep::bones(targets, 400)]
}

fn default_signs() -> Vec<SignDef> {
    let words = |list: &[&str]| -> Vec<String> {
        list.iter().map(|w| (*w).to_owned()).collect()
    };
    vec![
        SignDef {
            name: "hello".to_owned(),
            words: words(&["hi", "hello", "hii", "hey"]),
            prefixes: Vec::new(),
            steps: hello_steps(),
        },
        SignDef {
            name: "thank_you".to_owned(),
            words: words(&["thank", "thanks", "thankyou", "thankyou!"]),
            prefixes: words(&["thank"]),
            steps: thank_you_steps(),
        },
        SignDef {
            name: "yes".to_owned(),
            words: words(&["yes"]),
            prefixes: Vec::new(),
            steps: yes_steps(),
        },
        SignDef {
            name: "no".to_owned(),
            words: words(&["no"]),
            prefixes: Vec::new(),
            steps: no_steps(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_letter_resolves() {
        let table = PoseTable::default();
        for c in 'a'..='z' {
            assert!(
                matches!(table.letter(c), Some(PoseSpec::Curl { .. })),
                "missing letter {c}"
            );
            assert_eq!(table.letter(c), table.letter(c.to_ascii_uppercase()));
        }
        assert!(table.letter('9').is_none());
        assert!(table.letter(' ').is_none());
    }

    #[test]
    fn test_named_signs_resolve() {
        let table = PoseTable::default();
        for name in ["hello", "thank_you", "yes", "no", "neutral"] {
            assert!(
                matches!(table.lookup(name), Some(PoseSpec::Sequence { .. })),
                "missing sign {name}"
            );
        }
        assert!(table.lookup("goodbye").is_none());
        assert!(table.lookup("HELLO").is_some());
    }

    #[test]
    fn test_sign_vocabulary() {
        let table = PoseTable::default();
        assert_eq!(table.match_sign("hi"), Some("hello"));
        assert_eq!(table.match_sign("hey"), Some("hello"));
        assert_eq!(table.match_sign("thanks"), Some("thank_you"));
        assert_eq!(table.match_sign("thankful"), Some("thank_you"));
        assert_eq!(table.match_sign("yes"), Some("yes"));
        assert_eq!(table.match_sign("no"), Some("no"));
        assert_eq!(table.match_sign("not"), None);
        assert_eq!(table.match_sign("high"), None);
    }

    #[test]
    fn test_letter_a_handshape() {
        let table = PoseTable::default();
        let Some(PoseSpec::Curl { curl }) = table.lookup("a") else {
            panic!("letter a should be a curl");
        };
        assert!((curl.amount(Finger::Thumb) - 0.9).abs() < 1e-6);
        assert_eq!(curl.amount(Finger::Index), 1.0);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = PoseTableConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: PoseTableConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.letters, config.letters);
        assert_eq!(parsed.signs.len(), config.signs.len());
        assert_eq!(parsed.poses, config.poses);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: PoseTableConfig = toml::from_str(
            r"
[letters.a]
thumb = 0.5
",
        )
        .unwrap();
        // a replaced map drops the built-in letters
        assert_eq!(config.letters.len(), 1);
        assert_eq!(config.letters["a"].thumb, 0.5);
        assert_eq!(config.letters["a"].index, 0.0);
        // unspecified sections keep the built-in data
        assert_eq!(config.signs.len(), 4);
        assert!(config.poses.contains_key("neutral"));
    }

    #[test]
    fn test_neutral_moves_arm_and_fingers_together() {
        let table = PoseTable::default();
        let Some(PoseSpec::Sequence { steps }) = table.lookup("neutral") else {
            panic!("neutral should be a sequence");
        };
        assert_eq!(steps.len(), 1);
        let PoseStep::Bones { targets, .. } = &steps[0] else {
            panic!("neutral should be one bone step");
        };
        assert!(targets.iter().any(|t| t.role == BoneRole::Shoulder));
        let thumb = targets
            .iter()
            .find(|t| t.role == BoneRole::Finger(Finger::Thumb, 0))
            .unwrap();
        assert_eq!(thumb.rotation, Vec3::new(0.5, 0.5, 0.0));
    }
}

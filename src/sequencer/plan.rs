//! Turning requests into an ordered list of cues.

use std::collections::VecDeque;
use std::time::Duration;

use crate::options::AnimationOptions;
use crate::pose::{BoneTarget, PoseSpec, PoseStep, PoseTable};
use crate::skeleton::RigNaming;

/// One unit of sequenced work. Cues never overlap.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    /// Animate a set of roles together.
    Pose {
        /// What is being performed (letter, sign name, ...), for logs.
        label: String,
        /// Role targets, resolved against the registry when the cue starts.
        targets: Vec<BoneTarget>,
        /// How long every bone takes.
        duration: Duration,
    },
    /// Animate every bone back to the captured rest pose.
    Rest {
        /// Reset duration.
        duration: Duration,
    },
    /// Keep the current pose.
    Pause(Duration),
}

impl Cue {
    /// Nominal length of the cue.
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self {
            Self::Pose { duration, .. }
            | Self::Rest { duration }
            | Self::Pause(duration) => *duration,
        }
    }
}

/// Builds cue plans from the pose table.
pub(crate) struct Planner<'a> {
    pub(crate) table: &'a PoseTable,
    pub(crate) naming: &'a RigNaming,
    pub(crate) options: &'a AnimationOptions,
}

impl Planner<'_> {
    /// Cues for one named pose, `None` if the name is unknown.
    pub(crate) fn pose(&self, name: &str) -> Option<VecDeque<Cue>> {
        let spec = self.table.lookup(name)?;
        let mut cues = VecDeque::new();
        self.push_spec(&mut cues, name, spec);
        Some(cues)
    }

    /// Cues for a sentence: canned signs where the vocabulary matches,
    /// fingerspelling otherwise.
    pub(crate) fn sentence(&self, text: &str) -> VecDeque<Cue> {
        let mut cues = VecDeque::new();
        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            let word = self.token(&token);
            if word.is_empty() {
                log::debug!("nothing to perform for `{token}`");
                continue;
            }
            if !cues.is_empty() {
                cues.push_back(Cue::Pause(self.options.word_pause()));
            }
            cues.extend(word);
        }
        cues
    }

    fn token(&self, token: &str) -> VecDeque<Cue> {
        let mut cues = VecDeque::new();
        if let Some(sign) = self.table.match_sign(token) {
            match self.table.lookup(sign) {
                Some(spec) => self.push_spec(&mut cues, sign, spec),
                None => log::debug!("sign `{sign}` has no pose"),
            }
            return cues;
        }

        for letter in token.chars().filter(char::is_ascii_alphabetic) {
            let Some(spec) = self.table.letter(letter) else {
                log::debug!("no handshape for `{letter}`");
                continue;
            };
            if !cues.is_empty() {
                cues.push_back(Cue::Pause(self.options.letter_pause()));
            }
            self.push_spec(&mut cues, &letter.to_string(), spec);
        }
        cues
    }

    fn push_spec(&self, cues: &mut VecDeque<Cue>, label: &str, spec: &PoseSpec) {
        match spec {
            PoseSpec::Bones { targets } => cues.push_back(Cue::Pose {
                label: label.to_owned(),
                targets: targets.clone(),
                duration: self.options.pose_duration(),
            }),
            PoseSpec::Curl { curl } => {
                if let Some(staging) = &self.naming.letter_staging {
                    for step in &staging.steps(*curl) {
                        cues.push_back(self.step(label, step));
                    }
                } else {
                    cues.push_back(Cue::Pose {
                        label: label.to_owned(),
                        targets: self.naming.expand_curl(curl),
                        duration: self.options.letter_duration(),
                    });
                }
            }
            PoseSpec::Sequence { steps } => {
                for step in steps {
                    cues.push_back(self.step(label, step));
                }
            }
        }
    }

    fn step(&self, label: &str, step: &PoseStep) -> Cue {
        match step {
            PoseStep::Bones { targets, .. } => Cue::Pose {
                label: label.to_owned(),
                targets: targets.clone(),
                duration: step.duration(),
            },
            PoseStep::Curl { curl, .. } => Cue::Pose {
                label: label.to_owned(),
                targets: self.naming.expand_curl(curl),
                duration: step.duration(),
            },
            PoseStep::Hold { .. } => Cue::Pause(step.duration()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(cues: &VecDeque<Cue>) -> Vec<String> {
        cues.iter()
            .map(|cue| match cue {
                Cue::Pose { label, .. } => label.clone(),
                Cue::Rest { .. } => "rest".to_owned(),
                Cue::Pause(d) => format!("pause {}", d.as_millis()),
            })
            .collect()
    }

    fn plan(text: &str) -> VecDeque<Cue> {
        let table = PoseTable::default();
        let naming = RigNaming::hand_model();
        let options = AnimationOptions::default();
        Planner {
            table: &table,
            naming: &naming,
            options: &options,
        }
        .sentence(text)
    }

    #[test]
    fn test_pauses_only_between_letters() {
        assert_eq!(labels(&plan("zz9")), ["z", "pause 120", "z"]);
        assert_eq!(labels(&plan("  9 ")), Vec::<String>::new());
    }

    #[test]
    fn test_word_pause_between_tokens() {
        assert_eq!(
            labels(&plan("ab 7 C")),
            ["a", "pause 120", "b", "pause 220", "c"]
        );
    }

    #[test]
    fn test_sign_beats_fingerspelling() {
        let cues = plan("Hi");
        assert!(cues.len() > 2);
        assert!(cues.iter().all(|cue| match cue {
            Cue::Pose { label, .. } => label == "hello",
            _ => true,
        }));
    }

    #[test]
    fn test_letter_cue_uses_letter_duration() {
        let cues = plan("a");
        let Some(Cue::Pose {
            targets, duration, ..
        }) = cues.front()
        else {
            panic!("expected a pose cue");
        };
        assert_eq!(*duration, Duration::from_millis(280));
        // hand model: 5 digits × 3 joints
        assert_eq!(targets.len(), 15);
    }

    #[test]
    fn test_avatar_letter_is_staged() {
        let table = PoseTable::default();
        let naming = RigNaming::mixamo("mixamorigRight");
        let options = AnimationOptions::default();
        let planner = Planner {
            table: &table,
            naming: &naming,
            options: &options,
        };
        let cues = planner.sentence("ab");
        assert_eq!(
            labels(&cues),
            [
                "a", "a", "a", "pause 420", "a", "a", "a", "pause 120", "b", "b",
                "b", "pause 420", "b", "b", "b"
            ]
        );
        let total: Duration = cues.iter().map(Cue::duration).sum();
        assert_eq!(total, Duration::from_millis(2 * 1880 + 120));

        let Some(Cue::Pose { targets, .. }) = cues.get(2) else {
            panic!("expected the handshape cue");
        };
        assert_eq!(targets.len(), 20);
    }

    #[test]
    fn test_unknown_pose_name() {
        let table = PoseTable::default();
        let naming = RigNaming::hand_model();
        let options = AnimationOptions::default();
        let planner = Planner {
            table: &table,
            naming: &naming,
            options: &options,
        };
        assert!(planner.pose("goodbye").is_none());
        assert_eq!(planner.pose("B").as_ref().map(VecDeque::len), Some(1));
    }
}

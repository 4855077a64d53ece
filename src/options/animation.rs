use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Durations and easing for pose playback.
pub struct AnimationOptions {
    /// Duration of one fingerspelled letter, in milliseconds.
    #[schemars(title = "Letter Duration", range(min = 50, max = 2000), extend("step" = 10))]
    pub letter_ms: u64,
    /// Duration of the animated return to the rest pose.
    #[schemars(title = "Reset Duration", range(min = 50, max = 2000), extend("step" = 10))]
    pub reset_ms: u64,
    /// Duration of a named single-step pose.
    #[schemars(title = "Pose Duration", range(min = 50, max = 2000), extend("step" = 10))]
    pub pose_ms: u64,
    /// Pause between words of a sentence.
    #[schemars(title = "Word Pause", range(min = 0, max = 2000), extend("step" = 10))]
    pub word_pause_ms: u64,
    /// Pause between letters of a fingerspelled word.
    #[schemars(title = "Letter Pause", range(min = 0, max = 2000), extend("step" = 10))]
    pub letter_pause_ms: u64,
    /// Easing applied to every bone interpolation.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl AnimationOptions {
    /// Letter duration.
    #[must_use]
    pub fn letter_duration(&self) -> Duration {
        Duration::from_millis(self.letter_ms)
    }

    /// Reset duration.
    #[must_use]
    pub fn reset_duration(&self) -> Duration {
        Duration::from_millis(self.reset_ms)
    }

    /// Named pose duration.
    #[must_use]
    pub fn pose_duration(&self) -> Duration {
        Duration::from_millis(self.pose_ms)
    }

    /// Pause between words.
    #[must_use]
    pub fn word_pause(&self) -> Duration {
        Duration::from_millis(self.word_pause_ms)
    }

    /// Pause between letters.
    #[must_use]
    pub fn letter_pause(&self) -> Duration {
        Duration::from_millis(self.letter_pause_ms)
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            letter_ms: 280,
            reset_ms: 280,
            pose_ms: 280,
            word_pause_ms: 220,
            letter_pause_ms: 120,
            easing: EasingFunction::DEFAULT,
        }
    }
}

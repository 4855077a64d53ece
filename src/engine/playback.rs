//! UI-facing requests for AvatarEngine.

use super::AvatarEngine;
use crate::recognition::RecognitionResponse;
use crate::sequencer::Dispatch;

impl AvatarEngine {
    /// Perform one named pose: a letter, a sign name or `neutral`.
    pub fn play_pose(&mut self, name: &str) -> Dispatch {
        if !self.is_ready() {
            log::debug!("rig not ready, ignoring pose `{name}`");
            return Dispatch::Ignored;
        }
        self.sequencer
            .play_pose(name, &self.table, &self.naming, &self.registry)
    }

    /// Perform a sentence, signing known words and fingerspelling the rest.
    pub fn play_sequence(&mut self, text: &str) -> Dispatch {
        if !self.is_ready() {
            log::debug!("rig not ready, ignoring {text:?}");
            return Dispatch::Ignored;
        }
        self.sequencer
            .play_sequence(text, &self.table, &self.naming, &self.registry)
    }

    /// Animate back to the rest pose captured at attach time.
    pub fn reset(&mut self) -> Dispatch {
        if !self.is_ready() {
            log::debug!("rig not ready, ignoring reset");
            return Dispatch::Ignored;
        }
        self.sequencer.reset(&self.registry, &self.naming)
    }

    /// Relaxed arms-down pose.
    pub fn play_neutral(&mut self) -> Dispatch {
        self.play_pose("neutral")
    }

    /// Perform whatever a recognition service understood.
    ///
    /// Service errors are logged and dropped.
    pub fn play_recognized(&mut self, response: RecognitionResponse) -> Dispatch {
        match response.into_result() {
            Ok(text) => self.play_sequence(&text),
            Err(e) => {
                log::warn!("{e}");
                Dispatch::Ignored
            }
        }
    }
}

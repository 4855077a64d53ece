//! A single in-flight bone interpolation.

use std::time::Duration;

use glam::Vec3;

use super::interpolation::interpolate_rotation;
use crate::skeleton::{BoneId, BoneRegistry};
use crate::util::easing::EasingFunction;

/// Result of advancing an [`AnimationTask`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Still interpolating.
    Running,
    /// Reached `t = 1` on this tick. Reported exactly once.
    Completed,
    /// Completed on an earlier tick; nothing was written.
    Finished,
}

/// Drives one bone from a captured start rotation to a target rotation.
///
/// Time only moves when the owner calls [`advance`](Self::advance) with the
/// frame delta, so the task follows whatever clock the renderer runs.
#[derive(Debug, Clone)]
pub struct AnimationTask {
    bone: BoneId,
    start: Vec3,
    target: Vec3,
    duration: Duration,
    easing: EasingFunction,
    elapsed: Duration,
    done: bool,
}

impl AnimationTask {
    /// Task with an explicit start rotation.
    #[must_use]
    pub fn new(
        bone: BoneId,
        start: Vec3,
        target: Vec3,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            bone,
            start,
            target,
            duration,
            easing,
            elapsed: Duration::ZERO,
            done: false,
        }
    }

    /// Task starting from the bone's rotation right now.
    ///
    /// Returns `None` if the bone is not in the registry.
    #[must_use]
    pub fn start(
        registry: &BoneRegistry,
        bone: BoneId,
        target: Vec3,
        duration: Duration,
        easing: EasingFunction,
    ) -> Option<Self> {
        let start = registry.rotation(bone)?;
        Some(Self::new(bone, start, target, duration, easing))
    }

    /// Bone this task writes.
    #[must_use]
    pub fn bone(&self) -> BoneId {
        self.bone
    }

    /// Rotation captured when the task was created.
    #[must_use]
    pub fn start_rotation(&self) -> Vec3 {
        self.start
    }

    /// Rotation the task ends on.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Total animation duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Normalized progress (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return if self.done { 1.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Whether the task has signalled completion.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by one frame and write the interpolated rotation.
    pub fn advance(
        &mut self,
        dt: Duration,
        registry: &mut BoneRegistry,
    ) -> TaskStatus {
        if self.done {
            return TaskStatus::Finished;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        let t = if self.duration.is_zero() || self.elapsed >= self.duration
        {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };

        if t >= 1.0 {
            // exact target value, not just an equivalent angle
            registry.set_rotation(self.bone, self.target);
            self.done = true;
            return TaskStatus::Completed;
        }

        let rotation =
            interpolate_rotation(self.start, self.target, t, self.easing);
        registry.set_rotation(self.bone, rotation);
        TaskStatus::Running
    }
}

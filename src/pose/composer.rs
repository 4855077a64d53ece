//! Pose composer: fans one pose out into per-bone animation tasks and joins
//! on their completion.

use std::time::Duration;

use glam::Vec3;

use super::spec::BoneTarget;
use crate::animation::{AnimationTask, TaskStatus};
use crate::skeleton::{BoneId, BoneRegistry, RigNaming};
use crate::util::easing::EasingFunction;

/// A pose in flight: one task per resolved bone.
///
/// Complete only once every task has completed. A pose with no resolvable
/// bones is complete from the start.
#[derive(Debug, Clone, Default)]
pub struct PoseApplication {
    tasks: Vec<AnimationTask>,
}

impl PoseApplication {
    /// Number of bones being animated.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether every task has completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(AnimationTask::is_done)
    }

    /// Progress of the slowest task (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.tasks
            .iter()
            .map(AnimationTask::progress)
            .fold(1.0, f32::min)
    }

    /// Advance every task by one frame. Returns `true` once all tasks have
    /// completed.
    ///
    /// Tasks are advanced in creation order, so if two tasks share a bone
    /// the later one's write is what remains after the tick.
    pub fn advance(&mut self, dt: Duration, registry: &mut BoneRegistry) -> bool {
        let mut all_done = true;
        for task in &mut self.tasks {
            if task.advance(dt, registry) == TaskStatus::Running {
                all_done = false;
            }
        }
        all_done
    }
}

/// Builds [`PoseApplication`]s from targets.
pub struct PoseComposer;

impl PoseComposer {
    /// Start animating every target the rig can resolve.
    ///
    /// Roles the naming doesn't map, or whose bone is absent from the
    /// registry, are skipped. Start rotations are captured now.
    #[must_use]
    pub fn apply(
        targets: &[BoneTarget],
        registry: &BoneRegistry,
        naming: &RigNaming,
        duration: Duration,
        easing: EasingFunction,
    ) -> PoseApplication {
        let resolved: Vec<(BoneId, Vec3)> = targets
            .iter()
            .filter_map(|target| match naming.resolve(target.role, registry) {
                Some(bone) => Some((bone, target.rotation)),
                None => {
                    log::debug!("skipping missing bone for role {}", target.role);
                    None
                }
            })
            .collect();
        Self::apply_resolved(&resolved, registry, duration, easing)
    }

    /// Start animating already-resolved bones.
    #[must_use]
    pub fn apply_resolved(
        targets: &[(BoneId, Vec3)],
        registry: &BoneRegistry,
        duration: Duration,
        easing: EasingFunction,
    ) -> PoseApplication {
        let tasks = targets
            .iter()
            .filter_map(|&(bone, target)| {
                AnimationTask::start(registry, bone, target, duration, easing)
            })
            .collect();
        PoseApplication { tasks }
    }

    /// Animate every bone back to its captured rest rotation.
    ///
    /// Completes immediately if no rest pose was captured.
    #[must_use]
    pub fn rest(
        registry: &BoneRegistry,
        duration: Duration,
        easing: EasingFunction,
    ) -> PoseApplication {
        Self::apply_resolved(&registry.rest_targets(), registry, duration, easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::{BoneRole, Finger, SkeletonDesc};

    const FRAME: Duration = Duration::from_millis(16);

    fn hand_rig() -> (BoneRegistry, RigNaming) {
        let naming = RigNaming::hand_model();
        let mut registry = SkeletonDesc::from_naming(&naming)
            .into_registry()
            .unwrap();
        let _ = registry.capture_rest_pose();
        (registry, naming)
    }

    #[test]
    fn test_missing_bones_complete_immediately() {
        let (registry, naming) = hand_rig();
        let before: Vec<Vec3> =
            registry.iter().map(|(_, b)| b.rotation).collect();
        let app = PoseComposer::apply(
            &[BoneTarget::new(BoneRole::Shoulder, Vec3::ONE)],
            &registry,
            &naming,
            Duration::from_millis(300),
            EasingFunction::DEFAULT,
        );
        assert_eq!(app.task_count(), 0);
        assert!(app.is_complete());
        let after: Vec<Vec3> = registry.iter().map(|(_, b)| b.rotation).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_join_waits_for_every_bone() {
        let (mut registry, naming) = hand_rig();
        let targets = [
            BoneTarget::new(BoneRole::Finger(Finger::Index, 0), Vec3::X),
            BoneTarget::new(BoneRole::Finger(Finger::Pinky, 2), Vec3::Y),
            BoneTarget::new(BoneRole::Hand, Vec3::Z),
        ];
        let mut app = PoseComposer::apply(
            &targets,
            &registry,
            &naming,
            Duration::from_millis(100),
            EasingFunction::DEFAULT,
        );
        assert_eq!(app.task_count(), 2);
        assert!(!app.is_complete());
        assert_eq!(app.progress(), 0.0);

        let mut ticks = 0;
        let mut last = 0.0;
        while !app.advance(FRAME, &mut registry) {
            assert!(app.progress() > last);
            last = app.progress();
            ticks += 1;
            assert!(ticks < 100, "pose never completed");
        }
        assert!(app.is_complete());
        assert_eq!(app.progress(), 1.0);
        let index0 = registry.get("f_index01L_2").unwrap();
        let pinky2 = registry.get("f_pinky03L_15").unwrap();
        assert!((registry.rotation(index0).unwrap() - Vec3::X).length() < 1e-5);
        assert!((registry.rotation(pinky2).unwrap() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_rest_restores_capture() {
        let (mut registry, _) = hand_rig();
        let bone = registry.get("thumb02L_4").unwrap();
        registry.set_rotation(bone, Vec3::new(0.4, -0.2, 1.0));

        let mut app = PoseComposer::rest(
            &registry,
            Duration::from_millis(50),
            EasingFunction::DEFAULT,
        );
        assert_eq!(app.task_count(), registry.len());
        while !app.advance(FRAME, &mut registry) {}
        assert_eq!(registry.rotation(bone), Some(Vec3::ZERO));
    }
}

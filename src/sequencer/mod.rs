//! Sequencer: serializes poses, signs and sentences into one
//! non-overlapping performance.
//!
//! The sequencer is an explicit two-state machine. A request made while it
//! is [`Busy`](SequencerState::Busy) is rejected outright: the avatar
//! performs one thing at a time and bursts of input are dropped, not
//! queued. Work only moves forward when [`Sequencer::tick`] is called with
//! the frame delta.

mod plan;

use std::collections::VecDeque;
use std::time::Duration;

pub use plan::Cue;
use plan::Planner;

use crate::options::AnimationOptions;
use crate::pose::{PoseApplication, PoseComposer, PoseTable};
use crate::skeleton::{BoneRegistry, RigNaming};

/// Whether a performance is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SequencerState {
    /// Ready to accept a request.
    #[default]
    Idle,
    /// Performing; new requests are rejected.
    Busy,
}

/// Outcome of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Work started.
    Accepted,
    /// Dropped because a performance is already running.
    Rejected,
    /// Nothing to perform (unknown name, empty text, rig not ready).
    Ignored,
}

/// The cue currently being performed.
#[derive(Debug)]
enum ActiveCue {
    Pose {
        label: String,
        application: PoseApplication,
    },
    Pause {
        duration: Duration,
        elapsed: Duration,
    },
}

impl ActiveCue {
    fn advance(&mut self, dt: Duration, registry: &mut BoneRegistry) -> bool {
        match self {
            Self::Pose { application, .. } => application.advance(dt, registry),
            Self::Pause { duration, elapsed } => {
                *elapsed = elapsed.saturating_add(dt);
                *elapsed >= *duration
            }
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Pose { application, .. } => application.is_complete(),
            Self::Pause { duration, elapsed } => elapsed >= duration,
        }
    }
}

/// Plays cue plans one cue at a time.
#[derive(Debug)]
pub struct Sequencer {
    options: AnimationOptions,
    state: SequencerState,
    pending: VecDeque<Cue>,
    active: Option<ActiveCue>,
}

impl Sequencer {
    /// Idle sequencer using the given timing.
    #[must_use]
    pub fn new(options: AnimationOptions) -> Self {
        Self {
            options,
            state: SequencerState::Idle,
            pending: VecDeque::new(),
            active: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Whether a performance is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state == SequencerState::Busy
    }

    /// Timing in use.
    #[must_use]
    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    /// Replace the timing. Applies to requests made after the call; a
    /// running performance keeps the durations it was planned with.
    pub fn set_options(&mut self, options: AnimationOptions) {
        self.options = options;
    }

    /// Label of the pose cue currently animating, if any.
    #[must_use]
    pub fn current_label(&self) -> Option<&str> {
        match &self.active {
            Some(ActiveCue::Pose { label, .. }) => Some(label.as_str()),
            _ => None,
        }
    }

    /// Cues still waiting behind the active one.
    #[must_use]
    pub fn remaining_cues(&self) -> usize {
        self.pending.len()
    }

    /// Perform one named pose (a letter, a sign, `neutral`, ...).
    pub fn play_pose(
        &mut self,
        name: &str,
        table: &PoseTable,
        naming: &RigNaming,
        registry: &BoneRegistry,
    ) -> Dispatch {
        if self.is_busy() {
            log::debug!("busy, dropping pose `{name}`");
            return Dispatch::Rejected;
        }
        let Some(cues) = self.planner(table, naming).pose(name) else {
            log::debug!("unknown pose `{name}`");
            return Dispatch::Ignored;
        };
        self.begin(cues, registry, naming)
    }

    /// Perform a sentence: canned signs where a token matches the sign
    /// vocabulary, fingerspelling otherwise.
    pub fn play_sequence(
        &mut self,
        text: &str,
        table: &PoseTable,
        naming: &RigNaming,
        registry: &BoneRegistry,
    ) -> Dispatch {
        if self.is_busy() {
            log::debug!("busy, dropping sequence {text:?}");
            return Dispatch::Rejected;
        }
        let cues = self.planner(table, naming).sentence(text);
        if cues.is_empty() {
            log::debug!("nothing to perform in {text:?}");
            return Dispatch::Ignored;
        }
        log::info!("performing {text:?} ({} cues)", cues.len());
        self.begin(cues, registry, naming)
    }

    /// Animate every bone back to its captured rest rotation.
    pub fn reset(
        &mut self,
        registry: &BoneRegistry,
        naming: &RigNaming,
    ) -> Dispatch {
        if self.is_busy() {
            log::debug!("busy, dropping reset");
            return Dispatch::Rejected;
        }
        let cue = Cue::Rest {
            duration: self.options.reset_duration(),
        };
        self.begin(VecDeque::from([cue]), registry, naming)
    }

    /// Advance the active cue by one frame.
    ///
    /// When a cue finishes, the next one starts on the same tick, capturing
    /// its start rotations then. After the last cue the sequencer is idle
    /// again.
    pub fn tick(
        &mut self,
        dt: Duration,
        registry: &mut BoneRegistry,
        naming: &RigNaming,
    ) {
        let Some(active) = &mut self.active else {
            return;
        };
        if active.advance(dt, registry) {
            self.start_next(registry, naming);
        }
    }

    fn planner<'a>(
        &'a self,
        table: &'a PoseTable,
        naming: &'a RigNaming,
    ) -> Planner<'a> {
        Planner {
            table,
            naming,
            options: &self.options,
        }
    }

    fn begin(
        &mut self,
        cues: VecDeque<Cue>,
        registry: &BoneRegistry,
        naming: &RigNaming,
    ) -> Dispatch {
        self.pending = cues;
        self.state = SequencerState::Busy;
        self.start_next(registry, naming);
        Dispatch::Accepted
    }

    /// Start the next cue that has work to do, skipping ones that are
    /// complete on arrival (no resolvable bones, zero-length pauses).
    fn start_next(&mut self, registry: &BoneRegistry, naming: &RigNaming) {
        self.active = None;
        while let Some(cue) = self.pending.pop_front() {
            let active = self.start_cue(cue, registry, naming);
            if !active.is_complete() {
                self.active = Some(active);
                return;
            }
        }
        if self.state == SequencerState::Busy {
            log::debug!("sequence finished");
        }
        self.state = SequencerState::Idle;
    }

    fn start_cue(
        &self,
        cue: Cue,
        registry: &BoneRegistry,
        naming: &RigNaming,
    ) -> ActiveCue {
        let easing = self.options.easing;
        match cue {
            Cue::Pose {
                label,
                targets,
                duration,
            } => {
                log::debug!("pose `{label}`: {} targets", targets.len());
                let application = PoseComposer::apply(
                    &targets, registry, naming, duration, easing,
                );
                ActiveCue::Pose { label, application }
            }
            Cue::Rest { duration } => ActiveCue::Pose {
                label: "rest".to_owned(),
                application: PoseComposer::rest(registry, duration, easing),
            },
            Cue::Pause(duration) => ActiveCue::Pause {
                duration,
                elapsed: Duration::ZERO,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::skeleton::SkeletonDesc;

    const FRAME: Duration = Duration::from_millis(16);

    struct Rig {
        table: PoseTable,
        naming: RigNaming,
        registry: BoneRegistry,
    }

    fn rig(naming: RigNaming) -> Rig {
        let mut registry =
            SkeletonDesc::from_naming(&naming).into_registry().unwrap();
        let _ = registry.capture_rest_pose();
        Rig {
            table: PoseTable::default(),
            naming,
            registry,
        }
    }

    fn run_to_idle(seq: &mut Sequencer, r: &mut Rig) -> usize {
        let mut ticks = 0;
        while seq.is_busy() {
            seq.tick(FRAME, &mut r.registry, &r.naming);
            ticks += 1;
            assert!(ticks < 10_000, "sequencer never went idle");
        }
        ticks
    }

    #[test]
    fn test_busy_rejects_every_request() {
        let mut r = rig(RigNaming::hand_model());
        let mut seq = Sequencer::new(AnimationOptions::default());
        assert_eq!(
            seq.play_pose("a", &r.table, &r.naming, &r.registry),
            Dispatch::Accepted
        );
        assert_eq!(seq.state(), SequencerState::Busy);
        seq.tick(FRAME, &mut r.registry, &r.naming);

        let snapshot: Vec<Vec3> =
            r.registry.iter().map(|(_, b)| b.rotation).collect();
        assert_eq!(
            seq.play_sequence("hello", &r.table, &r.naming, &r.registry),
            Dispatch::Rejected
        );
        assert_eq!(
            seq.play_pose("b", &r.table, &r.naming, &r.registry),
            Dispatch::Rejected
        );
        assert_eq!(seq.reset(&r.registry, &r.naming), Dispatch::Rejected);
        assert_eq!(seq.current_label(), Some("a"));
        assert_eq!(seq.remaining_cues(), 0);
        let after: Vec<Vec3> =
            r.registry.iter().map(|(_, b)| b.rotation).collect();
        assert_eq!(snapshot, after);

        let _ = run_to_idle(&mut seq, &mut r);
        assert_eq!(
            seq.play_pose("b", &r.table, &r.naming, &r.registry),
            Dispatch::Accepted
        );
    }

    #[test]
    fn test_unknown_requests_stay_idle() {
        let r = rig(RigNaming::hand_model());
        let mut seq = Sequencer::new(AnimationOptions::default());
        assert_eq!(
            seq.play_pose("goodbye", &r.table, &r.naming, &r.registry),
            Dispatch::Ignored
        );
        assert_eq!(
            seq.play_sequence("123 !!", &r.table, &r.naming, &r.registry),
            Dispatch::Ignored
        );
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn test_unresolvable_pose_finishes_without_ticks() {
        // an empty naming maps no role to any bone
        let r = rig(RigNaming::hand_model());
        let naming = RigNaming::default();
        let mut seq = Sequencer::new(AnimationOptions::default());
        assert_eq!(
            seq.play_pose("neutral", &r.table, &naming, &r.registry),
            Dispatch::Accepted
        );
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn test_sign_steps_run_in_order() {
        let mut r = rig(RigNaming::mixamo("mixamorigRight"));
        let mut seq = Sequencer::new(AnimationOptions::default());
        let _ = seq.play_sequence("hi", &r.table, &r.naming, &r.registry);
        let shoulder = r.registry.get("mixamorigRightArm").unwrap();
        let forearm = r.registry.get("mixamorigRightForeArm").unwrap();

        // first step only moves the shoulder
        seq.tick(FRAME, &mut r.registry, &r.naming);
        assert_ne!(r.registry.rotation(shoulder), Some(Vec3::ZERO));
        assert_eq!(r.registry.rotation(forearm), Some(Vec3::ZERO));
        assert_eq!(seq.current_label(), Some("hello"));

        let _ = run_to_idle(&mut seq, &mut r);
        // the sign ends with the arm lowered again
        assert_eq!(r.registry.rotation(shoulder), Some(Vec3::ZERO));
    }

    #[test]
    fn test_zz9_timing() {
        let mut r = rig(RigNaming::hand_model());
        let options = AnimationOptions {
            letter_ms: 100,
            letter_pause_ms: 50,
            ..AnimationOptions::default()
        };
        let mut seq = Sequencer::new(options);
        assert_eq!(seq.options().letter_ms, 100);
        let step = Duration::from_millis(10);
        assert_eq!(
            seq.play_sequence("zz9", &r.table, &r.naming, &r.registry),
            Dispatch::Accepted
        );
        let mut ticks = 0;
        while seq.is_busy() {
            seq.tick(step, &mut r.registry, &r.naming);
            ticks += 1;
        }
        // z (10 ticks), pause (5), z (10); nothing before or after
        assert_eq!(ticks, 25);
    }

    #[test]
    fn test_reset_restores_rest_pose() {
        let mut r = rig(RigNaming::mixamo("mixamorigRight"));
        let mut seq = Sequencer::new(AnimationOptions::default());
        let _ = seq.play_sequence("yes", &r.table, &r.naming, &r.registry);
        let _ = run_to_idle(&mut seq, &mut r);
        let forearm = r.registry.get("mixamorigRightForeArm").unwrap();
        r.registry.set_rotation(forearm, Vec3::new(0.3, 2.9, -3.1));

        assert_eq!(seq.reset(&r.registry, &r.naming), Dispatch::Accepted);
        let _ = run_to_idle(&mut seq, &mut r);
        for (id, bone) in r.registry.iter() {
            assert_eq!(Some(bone.rotation), r.registry.rest_rotation(id));
        }
    }
}

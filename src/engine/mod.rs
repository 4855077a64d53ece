//! The avatar engine: rig lifecycle, pose table and sequencer behind one
//! frame-driven handle.

mod options;
mod playback;

use std::time::Duration;

use crate::error::SignposeError;
use crate::options::Options;
use crate::pose::PoseTable;
use crate::sequencer::{Sequencer, SequencerState};
use crate::skeleton::{BoneRegistry, RigNaming, SkeletonDesc};

/// Where the engine is in the model loading lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RigState {
    /// Waiting for the loader to hand over a skeleton.
    Loading,
    /// Skeleton attached and rest pose captured; requests are accepted.
    Ready,
    /// The loader gave up. Requests stay no-ops until a rig is attached.
    Failed(String),
}

/// The avatar animation engine.
///
/// Owns the bone registry, the pose table and the sequencer, and is driven
/// entirely from outside:
///
/// # Loading
///
/// The model loader calls [`attach_rig`](Self::attach_rig) once the
/// skeleton is parsed (or [`fail_load`](Self::fail_load) if it can't be).
/// Requests made before that are ignored.
///
/// # Frame loop
///
/// The renderer calls [`tick`](Self::tick) once per frame with the frame
/// delta, then reads bone rotations through [`registry`](Self::registry).
///
/// # Requests
///
/// UI controls call [`play_pose`](Self::play_pose),
/// [`play_sequence`](Self::play_sequence) and [`reset`](Self::reset). Each
/// returns a [`Dispatch`](crate::sequencer::Dispatch) that callers are free
/// to ignore; [`is_busy`](Self::is_busy) drives enabling/disabling controls.
#[derive(Debug)]
pub struct AvatarEngine {
    /// Runtime timing, rig and recognition options.
    options: Options,
    /// Letters, signs and named poses.
    table: PoseTable,
    /// Performance state machine.
    sequencer: Sequencer,
    /// Loader lifecycle.
    rig_state: RigState,
    /// Live bone rotations (empty until a rig is attached).
    registry: BoneRegistry,
    /// Role → bone name adapter of the attached model.
    naming: RigNaming,
}

// ── Construction ──

impl AvatarEngine {
    /// Engine waiting for a rig.
    #[must_use]
    pub fn new(options: Options, table: PoseTable) -> Self {
        let sequencer = Sequencer::new(options.animation.clone());
        let naming = options.rig.naming();
        Self {
            options,
            table,
            sequencer,
            rig_state: RigState::Loading,
            registry: BoneRegistry::new(),
            naming,
        }
    }

    /// Engine with a synthetic skeleton for the configured rig preset,
    /// already [`Ready`](RigState::Ready).
    ///
    /// # Errors
    ///
    /// Returns [`SignposeError`] if the naming maps two roles to one bone.
    pub fn with_preset_rig(
        options: Options,
        table: PoseTable,
    ) -> Result<Self, SignposeError> {
        let naming = options.rig.naming();
        let registry = SkeletonDesc::from_naming(&naming).into_registry()?;
        let mut engine = Self::new(options, table);
        engine.attach_rig(registry, naming);
        Ok(engine)
    }
}

// ── Lifecycle ──

impl AvatarEngine {
    /// Hand over a loaded skeleton.
    ///
    /// Captures the rest pose (unless the registry already holds one) and
    /// moves to [`RigState::Ready`]. A previously attached rig is replaced
    /// and any performance on it is dropped.
    pub fn attach_rig(&mut self, mut registry: BoneRegistry, naming: RigNaming) {
        let _ = registry.capture_rest_pose();
        let missing = naming
            .roles()
            .into_iter()
            .filter(|role| naming.resolve(*role, &registry).is_none())
            .count();
        if missing > 0 {
            log::debug!("{missing} rig roles have no bone in this model");
        }
        log::info!("rig attached: {} bones", registry.len());

        self.registry = registry;
        self.naming = naming;
        self.sequencer = Sequencer::new(self.options.animation.clone());
        self.rig_state = RigState::Ready;
    }

    /// Record that the loader failed.
    pub fn fail_load(&mut self, error: &SignposeError) {
        log::warn!("model load failed: {error}");
        self.rig_state = RigState::Failed(error.to_string());
    }

    /// Loader lifecycle state.
    #[must_use]
    pub fn rig_state(&self) -> &RigState {
        &self.rig_state
    }

    /// Whether a rig is attached.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.rig_state == RigState::Ready
    }

    /// Advance the current performance by one frame.
    ///
    /// Call once per frame before reading rotations:
    /// ```ignore
    /// engine.tick(dt);
    /// draw(engine.registry());
    /// ```
    pub fn tick(&mut self, dt: Duration) {
        if !self.is_ready() {
            return;
        }
        self.sequencer.tick(dt, &mut self.registry, &self.naming);
    }
}

// ── Accessors ──

impl AvatarEngine {
    /// Live bone rotations.
    #[must_use]
    pub fn registry(&self) -> &BoneRegistry {
        &self.registry
    }

    /// Naming adapter of the attached rig.
    #[must_use]
    pub fn naming(&self) -> &RigNaming {
        &self.naming
    }

    /// Pose table in use.
    #[must_use]
    pub fn table(&self) -> &PoseTable {
        &self.table
    }

    /// Sequencer state.
    #[must_use]
    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Whether a performance is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.sequencer.is_busy()
    }

    /// Label of the pose currently animating, if any.
    #[must_use]
    pub fn current_label(&self) -> Option<&str> {
        self.sequencer.current_label()
    }
}

//! Live bone registry: the single owner of every bone rotation.

use glam::{EulerRot, Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::error::SignposeError;

/// Index of a bone inside a [`BoneRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoneId(pub(crate) usize);

impl BoneId {
    /// Position of the bone in registration order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One joint of the skeleton.
#[derive(Debug, Clone)]
pub struct Bone {
    /// Model bone name, as discovered by the loader.
    pub name: String,
    /// Parent joint, `None` for roots.
    pub parent: Option<BoneId>,
    /// Local Euler rotation (radians, XYZ order).
    pub rotation: Vec3,
}

/// Mapping from bone name to its mutable rotation, plus the rest pose.
///
/// Populated once by the loader, then owned by the animation subsystem.
/// Parents are always registered before their children, so iterating in
/// index order walks the hierarchy top-down.
#[derive(Debug, Clone, Default)]
pub struct BoneRegistry {
    bones: Vec<Bone>,
    by_name: FxHashMap<String, BoneId>,
    rest_pose: Option<Vec<Vec3>>,
}

impl BoneRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bone. The parent must already be registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        parent: Option<BoneId>,
        rotation: Vec3,
    ) -> Result<BoneId, SignposeError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(SignposeError::DuplicateBone(name));
        }
        if let Some(parent) = parent {
            if parent.0 >= self.bones.len() {
                return Err(SignposeError::SkeletonParse(format!(
                    "bone `{name}` references unregistered parent #{}",
                    parent.0
                )));
            }
        }
        if self.rest_pose.is_some() {
            log::warn!("bone `{name}` registered after rest pose capture");
        }

        let id = BoneId(self.bones.len());
        let _ = self.by_name.insert(name.clone(), id);
        self.bones.push(Bone {
            name,
            parent,
            rotation,
        });
        Ok(id)
    }

    /// Look up a bone by model name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    /// Bone data for an id.
    #[must_use]
    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    /// Current local rotation of a bone.
    #[must_use]
    pub fn rotation(&self, id: BoneId) -> Option<Vec3> {
        self.bones.get(id.0).map(|b| b.rotation)
    }

    /// Overwrite a bone's local rotation. Unknown ids are ignored.
    pub fn set_rotation(&mut self, id: BoneId, rotation: Vec3) {
        if let Some(bone) = self.bones.get_mut(id.0) {
            bone.rotation = rotation;
        }
    }

    /// Number of registered bones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether no bones are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Iterate `(id, bone)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BoneId, &Bone)> + '_ {
        self.bones.iter().enumerate().map(|(i, b)| (BoneId(i), b))
    }

    /// Snapshot every current rotation as the rest pose.
    ///
    /// Only the first capture counts; the rest pose is immutable afterwards.
    /// Returns whether this call took the snapshot.
    pub fn capture_rest_pose(&mut self) -> bool {
        if self.rest_pose.is_some() {
            log::warn!("rest pose already captured, keeping the first one");
            return false;
        }
        self.rest_pose = Some(self.bones.iter().map(|b| b.rotation).collect());
        true
    }

    /// Whether the rest pose has been captured.
    #[must_use]
    pub fn has_rest_pose(&self) -> bool {
        self.rest_pose.is_some()
    }

    /// Captured rest rotations in bone index order.
    #[must_use]
    pub fn rest_pose(&self) -> Option<&[Vec3]> {
        self.rest_pose.as_deref()
    }

    /// Captured rest rotation for a bone.
    #[must_use]
    pub fn rest_rotation(&self, id: BoneId) -> Option<Vec3> {
        self.rest_pose.as_ref()?.get(id.0).copied()
    }

    /// `(bone, rest rotation)` for every bone, empty before capture.
    #[must_use]
    pub fn rest_targets(&self) -> Vec<(BoneId, Vec3)> {
        self.rest_pose
            .as_ref()
            .map(|rest| {
                rest.iter()
                    .enumerate()
                    .map(|(i, r)| (BoneId(i), *r))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Jump straight to the rest pose without animating.
    pub fn snap_to_rest(&mut self) {
        let Some(rest) = &self.rest_pose else {
            return;
        };
        for (bone, r) in self.bones.iter_mut().zip(rest) {
            bone.rotation = *r;
        }
    }

    /// Local rotation of a bone as a quaternion.
    #[must_use]
    pub fn local_rotation(&self, id: BoneId) -> Option<Quat> {
        self.rotation(id).map(euler_to_quat)
    }

    /// Model-space rotation of every bone, parent rotations applied.
    #[must_use]
    pub fn world_rotations(&self) -> Vec<Quat> {
        let mut world: Vec<Quat> = Vec::with_capacity(self.bones.len());
        for bone in &self.bones {
            let local = euler_to_quat(bone.rotation);
            let rotation = match bone.parent {
                Some(parent) => world[parent.0] * local,
                None => local,
            };
            world.push(rotation);
        }
        world
    }
}

/// Convert XYZ Euler radians into a quaternion.
#[inline]
#[must_use]
pub fn euler_to_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

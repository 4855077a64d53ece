//! Skeleton ownership: the bone registry, the role naming adapter, and the
//! loader hand-off format.

pub mod loader;
pub mod naming;
pub mod registry;

pub use loader::{BoneDesc, SkeletonDesc};
pub use naming::{BoneRole, Finger, RigNaming};
pub use registry::{Bone, BoneId, BoneRegistry};

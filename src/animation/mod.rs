//! Bone animation: shortest-path angle interpolation and per-bone tasks
//! advanced by the renderer's frame tick.

pub mod interpolation;
pub mod task;

pub use interpolation::{interpolate_angle, interpolate_rotation};
pub use task::{AnimationTask, TaskStatus};

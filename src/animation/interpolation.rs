//! Shortest-path angle interpolation.
//!
//! Bone rotations are stored as Euler angles in radians. Interpolating the
//! raw numbers would swing a joint the long way around whenever start and
//! target sit on opposite sides of ±π, so every axis is interpolated along
//! the signed shortest arc instead.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::util::easing::EasingFunction;

/// Signed shortest-path difference `target - start`, normalized into
/// (−π, π].
#[inline]
#[must_use]
pub fn shortest_arc(start: f32, target: f32) -> f32 {
    let diff = (target - start).rem_euclid(TAU);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

/// Interpolate from `start` toward `target` by an already-eased fraction.
#[inline]
#[must_use]
pub fn lerp_angle(start: f32, target: f32, eased_t: f32) -> f32 {
    start + shortest_arc(start, target) * eased_t
}

/// Interpolate an angle at raw progress `t` through `easing`.
///
/// Returns `start` exactly at `t = 0` and `start + shortest_arc(..)` at
/// `t = 1`, which equals `target` modulo 2π.
#[must_use]
pub fn interpolate_angle(
    start: f32,
    target: f32,
    t: f32,
    easing: EasingFunction,
) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 {
        return start;
    }
    lerp_angle(start, target, easing.evaluate(t))
}

/// Interpolate each Euler axis of a rotation independently.
#[must_use]
pub fn interpolate_rotation(
    start: Vec3,
    target: Vec3,
    t: f32,
    easing: EasingFunction,
) -> Vec3 {
    Vec3::new(
        interpolate_angle(start.x, target.x, t, easing),
        interpolate_angle(start.y, target.y, t, easing),
        interpolate_angle(start.z, target.z, t, easing),
    )
}

/// Whether two angles describe the same orientation (modulo 2π).
#[must_use]
pub fn angles_equivalent(a: f32, b: f32, tolerance: f32) -> bool {
    shortest_arc(a, b).abs() <= tolerance
}

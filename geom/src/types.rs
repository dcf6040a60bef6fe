/*!
Core math aliases and query result types shared by the geometry capability.

This module intentionally contains no algorithms. It defines the data
exchanged between geometry backings (parry-based or application-defined)
and the engine bridge that consumes them.
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// One candidate contact produced by a pairwise geometry query.
///
/// All fields are expressed in the common (engine/world) frame of the query.
///
/// Conventions
/// - `point1`/`point2` are witness points on the two *effective* surfaces,
///   i.e. with any padding intrinsic to each representation already applied.
/// - `normal` points from the first geometry toward the second.
/// - `dist` is the signed separation between the effective surfaces:
///   negative means they overlap.
#[derive(Clone, Copy, Debug)]
pub struct ContactPoint {
    /// Witness point on the first geometry's effective surface.
    pub point1: Vec3,
    /// Witness point on the second geometry's effective surface.
    pub point2: Vec3,
    /// Unit normal on the first geometry, pointing toward the second.
    pub normal: Vec3,
    /// Signed separation of the effective surfaces (meters).
    pub dist: f32,
}

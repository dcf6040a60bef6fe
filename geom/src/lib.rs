/*!
Abstract collision-geometry capability.

This crate defines the geometry-facing half of the engine bridge:

- types:    shared math aliases and query result types
- geometry: the [`CollisionGeometry`] trait and its parry3d-backed impls

The bridge crate holds the per-handle bookkeeping (records, registry,
dispatch); everything that actually touches surfaces lives behind the
[`CollisionGeometry`] seam defined here.
*/

pub mod geometry;
pub mod types;

// Re-export commonly used types and functions.
pub use geometry::{CollisionGeometry, PaddedShape, PaddingError};
pub use types::{ContactPoint, Iso, Quat, Vec3};

// Re-export parry so downstream crates can name shapes and AABBs without
// depending on `parry3d` directly.
pub use parry3d;
pub use parry3d::bounding_volume::Aabb;
pub use parry3d::shape::SharedShape;

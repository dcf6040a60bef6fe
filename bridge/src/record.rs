/*!
The per-handle adapter record.

One [`CustomGeometryData`] exists per engine geometry handle. It connects the
engine's opaque handle to the real geometry and carries the two scalars the
dispatch layer threads through every query: the extra collision margin and
the local-to-body frame offset.
*/

use geom::{CollisionGeometry, Iso, Vec3};
use nalgebra::Translation3;

/// Per-handle state connecting an engine geometry handle to the real
/// geometry, its extra margin, and its frame offset.
///
/// The geometry is borrowed, never owned: the caller must keep it alive for
/// as long as the handle exists, and the borrow checker holds them to it
/// through the registry's `'g` lifetime.
#[derive(Clone, Copy)]
pub struct CustomGeometryData<'g> {
    /// The geometry this handle stands for.
    pub geometry: &'g dyn CollisionGeometry,
    /// The *extra* collision margin to be used with the geometry (meters).
    /// If the geometry already has intrinsic padding, this amount is added
    /// on top of it when detecting collisions. Always ≥ 0 and finite.
    pub outer_margin: f32,
    /// The translation from the geometry's local frame to the engine's
    /// body-centered frame, i.e. the negation of the local center-of-mass
    /// vector. Zero at creation; the caller sets it once the owning body's
    /// center of mass is known, before the handle's first simulation step.
    pub body_offset: Vec3,
}

impl<'g> CustomGeometryData<'g> {
    pub(crate) fn new(geometry: &'g dyn CollisionGeometry, outer_margin: f32) -> Self {
        Self {
            geometry,
            outer_margin,
            body_offset: Vec3::zeros(),
        }
    }

    /// Set the frame offset from the geometry's local center of mass.
    ///
    /// Stores `-com`, the translation that moves local-frame points into the
    /// body-centered frame the engine works in.
    pub fn set_center_of_mass(&mut self, com: Vec3) {
        self.body_offset = -com;
    }

    /// World pose of the geometry, given the engine's current body pose:
    /// `body_pose ∘ translation(body_offset)`. The offset applies before the
    /// rotation the engine already folded into the body pose.
    pub fn world_pose(&self, body_pose: &Iso) -> Iso {
        body_pose * Translation3::from(self.body_offset)
    }
}

impl std::fmt::Debug for CustomGeometryData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomGeometryData")
            .field("geometry", &(self.geometry as *const dyn CollisionGeometry))
            .field("outer_margin", &self.outer_margin)
            .field("body_offset", &self.body_offset)
            .finish()
    }
}

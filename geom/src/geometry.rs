/*!
The collision-geometry capability consumed by the engine bridge.

[`CollisionGeometry`] is the seam between the bridge (which only does handle,
margin, and frame bookkeeping) and whatever actually represents a shape:
a parry primitive, a mesh wrapper, an implicit surface, a compound. The
bridge never looks inside a geometry; it only asks for a local bounding box
and for candidate contacts against another geometry.

Two backings are provided here:
- any [`SharedShape`] is directly usable as a `CollisionGeometry`;
- [`PaddedShape`] wraps a `SharedShape` together with padding intrinsic to
  the representation (e.g. a point-cloud hull dilated for robustness).

Pairwise queries between parry-backed geometries delegate to
`parry3d::query::contact`. A geometry with no parry backing must override
[`CollisionGeometry::contacts`] itself; the default implementation degrades
to zero contacts against such a counterpart.
*/

use parry3d::bounding_volume::{Aabb, BoundingVolume};
use parry3d::query::{self, Unsupported};
use parry3d::shape::{Shape, SharedShape};

use crate::types::{ContactPoint, Iso};

/// Abstract collision geometry: bounding-box and nearest-feature queries.
///
/// Implementations must be bounded-time: queries run inside the physics
/// engine's stepping loop and must not block or stall it.
pub trait CollisionGeometry {
    /// Axis-aligned bounding box of the *effective* geometry (intrinsic
    /// padding included), in the geometry's local frame.
    fn local_aabb(&self) -> Aabb;

    /// Padding intrinsic to this representation (meters). Zero for exact
    /// geometry. Counterparts fold this into their separation computations.
    fn inner_margin(&self) -> f32 {
        0.0
    }

    /// The parry shape backing this geometry, if there is one.
    ///
    /// This is the double-dispatch hook: it lets one geometry run a parry
    /// pairwise query against another without knowing its concrete type.
    fn as_parry(&self) -> Option<&dyn Shape> {
        None
    }

    /// Push every candidate contact against `other` onto `out`.
    ///
    /// Both poses map local frames into a common frame; results are
    /// expressed in that common frame. Every pair of features whose
    /// effective-surface separation is at most `prediction` (inclusive)
    /// must be reported; candidates must not be dropped.
    ///
    /// The default implementation delegates to `parry3d::query::contact`
    /// when both sides expose a parry backing, and reports nothing when
    /// either side does not or when parry does not support the pair.
    fn contacts(
        &self,
        pose_self: &Iso,
        other: &dyn CollisionGeometry,
        pose_other: &Iso,
        prediction: f32,
        out: &mut Vec<ContactPoint>,
    ) {
        let (Some(g1), Some(g2)) = (self.as_parry(), other.as_parry()) else {
            log::debug!("geometry pair has no common parry backing; reporting no contacts");
            return;
        };

        let pad1 = self.inner_margin();
        let pad2 = other.inner_margin();

        // Query the raw surfaces with the prediction enlarged by both
        // intrinsic paddings, then shift the result back onto the padded
        // surfaces: dist_eff = dist_raw - pad1 - pad2.
        match query::contact(pose_self, g1, pose_other, g2, prediction + pad1 + pad2) {
            Ok(Some(c)) => {
                let normal = c.normal1.into_inner();
                out.push(ContactPoint {
                    point1: c.point1.coords + normal * pad1,
                    point2: c.point2.coords - normal * pad2,
                    normal,
                    dist: c.dist - pad1 - pad2,
                });
            }
            Ok(None) => {}
            Err(Unsupported) => {
                log::debug!("parry does not support this shape pair; reporting no contacts");
            }
        }
    }
}

impl CollisionGeometry for SharedShape {
    fn local_aabb(&self) -> Aabb {
        self.compute_local_aabb()
    }

    fn as_parry(&self) -> Option<&dyn Shape> {
        Some(&**self)
    }
}

/// Padding amount outside the range a geometry can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PaddingError {
    #[error("intrinsic padding must be non-negative")]
    Negative,
    #[error("intrinsic padding must be finite")]
    NonFinite,
}

/// A parry shape dilated by padding intrinsic to the representation.
///
/// The padding is part of the geometry itself (it enlarges the effective
/// surface), as opposed to the bridge's per-handle outer margin which is
/// added on top for contact generation.
#[derive(Clone)]
pub struct PaddedShape {
    shape: SharedShape,
    padding: f32,
}

impl PaddedShape {
    /// Wrap `shape` with the given intrinsic padding (meters, ≥ 0, finite).
    pub fn new(shape: SharedShape, padding: f32) -> Result<Self, PaddingError> {
        if !padding.is_finite() {
            return Err(PaddingError::NonFinite);
        }
        if padding < 0.0 {
            return Err(PaddingError::Negative);
        }
        Ok(Self { shape, padding })
    }

    /// The raw (un-padded) backing shape.
    pub fn shape(&self) -> &SharedShape {
        &self.shape
    }

    /// The intrinsic padding (meters).
    pub fn padding(&self) -> f32 {
        self.padding
    }
}

impl CollisionGeometry for PaddedShape {
    fn local_aabb(&self) -> Aabb {
        self.shape.compute_local_aabb().loosened(self.padding)
    }

    fn inner_margin(&self) -> f32 {
        self.padding
    }

    fn as_parry(&self) -> Option<&dyn Shape> {
        Some(&*self.shape)
    }
}

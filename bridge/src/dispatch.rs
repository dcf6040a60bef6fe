/*!
Engine-invoked collision dispatch for custom geometry.

These are the callbacks behind the class table: the engine hands over one or
two handles plus current body poses, and gets back a conservative bounding
volume or a batch of contacts in its own frame and convention. All the
coordinate and margin bookkeeping of the bridge happens here:

- each geometry's world pose is `body_pose ∘ translation(body_offset)`;
- bounding volumes are loosened by the record's `outer_margin`;
- pairwise queries run with the *combined* margin (sum of both sides'
  outer margins; intrinsic padding is folded in by the geometry itself);
- a reported depth is measured against that combined margin, so any true
  surface separation ≤ m1 + m2 yields a contact with depth ≥ 0.

Every query is stateless: nothing is cached between steps. A stale handle
(record already destroyed) degrades to "no bounding volume" / "no contacts"
instead of faulting, since the engine may still query a handle in the step
that schedules its destruction.
*/

use geom::parry3d::bounding_volume::BoundingVolume;
use geom::{Aabb, CollisionGeometry, ContactPoint, Iso, Vec3};

use crate::handle::GeomHandle;
use crate::registry::GeomRegistry;

/// One contact in the engine's convention.
#[derive(Clone, Copy, Debug)]
pub struct EngineContact {
    /// Contact position, engine (world) frame: the midpoint of the two
    /// margin-expanded surface points.
    pub pos: Vec3,
    /// Separating-axis unit normal, pointing from the first geometry toward
    /// the second.
    pub normal: Vec3,
    /// Penetration depth of the margin-expanded surfaces: ≥ 0 for every
    /// reported contact, positive when they overlap beyond the combined
    /// margin boundary.
    pub depth: f32,
}

/// Bounding-volume query for one custom geometry handle.
///
/// The result conservatively contains every point the geometry (plus its
/// outer margin) can occupy at the given body pose. Returns `None` for a
/// stale handle.
pub fn geom_aabb(
    registry: &GeomRegistry<'_>,
    handle: GeomHandle,
    body_pose: &Iso,
) -> Option<Aabb> {
    let Some(rec) = registry.get(handle) else {
        log::trace!("aabb query on stale geometry handle {handle:#x}");
        return None;
    };

    // Loosening in the local frame is pose-independent: the margin is a
    // distance, and the isometry preserves it.
    let local = rec.geometry.local_aabb().loosened(rec.outer_margin);
    Some(local.transform_by(&rec.world_pose(body_pose)))
}

/// Pairwise contact generation between two custom geometry handles.
///
/// Appends every candidate contact to `out` (none are dropped; the solver
/// decides which to keep) and returns how many were appended. Either handle
/// being stale yields zero contacts.
pub fn geom_collide(
    registry: &GeomRegistry<'_>,
    handle1: GeomHandle,
    body_pose1: &Iso,
    handle2: GeomHandle,
    body_pose2: &Iso,
    out: &mut Vec<EngineContact>,
) -> usize {
    let (Some(rec1), Some(rec2)) = (registry.get(handle1), registry.get(handle2)) else {
        log::trace!("collide query with stale geometry handle ({handle1:#x}, {handle2:#x})");
        return 0;
    };
    collide_pair(
        rec1.geometry,
        &rec1.world_pose(body_pose1),
        rec1.outer_margin,
        rec2.geometry,
        &rec2.world_pose(body_pose2),
        rec2.outer_margin,
        out,
    )
}

/// Contact generation between a custom geometry handle and a bare engine
/// primitive (no adapter record, no outer margin, pose used as-is).
pub fn geom_collide_primitive(
    registry: &GeomRegistry<'_>,
    handle: GeomHandle,
    body_pose: &Iso,
    primitive: &dyn CollisionGeometry,
    primitive_pose: &Iso,
    out: &mut Vec<EngineContact>,
) -> usize {
    let Some(rec) = registry.get(handle) else {
        log::trace!("primitive collide query on stale geometry handle {handle:#x}");
        return 0;
    };
    collide_pair(
        rec.geometry,
        &rec.world_pose(body_pose),
        rec.outer_margin,
        primitive,
        primitive_pose,
        0.0,
        out,
    )
}

fn collide_pair(
    geom1: &dyn CollisionGeometry,
    pose1: &Iso,
    margin1: f32,
    geom2: &dyn CollisionGeometry,
    pose2: &Iso,
    margin2: f32,
    out: &mut Vec<EngineContact>,
) -> usize {
    let combined = margin1 + margin2;

    let mut candidates = Vec::new();
    geom1.contacts(pose1, geom2, pose2, combined, &mut candidates);

    // The engine controls pair ordering, so a counterpart that only knows
    // how to answer with itself first (a contacts override with no parry
    // backing) must still be heard: ask it the other way around and flip
    // the result back into this pair's orientation.
    if candidates.is_empty() && geom2.as_parry().is_none() {
        let mut reversed = Vec::new();
        geom2.contacts(pose2, geom1, pose1, combined, &mut reversed);
        candidates.extend(reversed.into_iter().map(|c| ContactPoint {
            point1: c.point2,
            point2: c.point1,
            normal: -c.normal,
            dist: c.dist,
        }));
    }

    let appended = candidates.len();
    out.extend(
        candidates
            .iter()
            .map(|c| engine_contact(c, margin1, margin2, combined)),
    );
    appended
}

/// Convert one capability contact into the engine's convention.
///
/// The witness points sit on the effective (padding-included) surfaces; the
/// outer margins push them out to the margin-expanded surfaces, and the
/// contact position is their midpoint.
fn engine_contact(c: &ContactPoint, margin1: f32, margin2: f32, combined: f32) -> EngineContact {
    let expanded1 = c.point1 + c.normal * margin1;
    let expanded2 = c.point2 - c.normal * margin2;
    EngineContact {
        pos: (expanded1 + expanded2) * 0.5,
        normal: c.normal,
        depth: combined - c.dist,
    }
}

/*!
Process-wide registration of the custom geometry class.

The engine learns about custom geometry once per process: a table of plain
function pointers (bounding-volume callback, pairwise collide callback) that
it invokes for every handle of the class. Registration is explicit and
idempotent; there is no teardown — the engine owns the class table for the
lifetime of the process.
*/

use std::sync::OnceLock;

use geom::{Aabb, CollisionGeometry, Iso};

use crate::dispatch::{self, EngineContact};
use crate::handle::GeomHandle;
use crate::registry::GeomRegistry;

/// Bounding-volume callback: handle + current body pose → conservative AABB.
pub type AabbFn = fn(&GeomRegistry<'_>, GeomHandle, &Iso) -> Option<Aabb>;

/// Pairwise collide callback: two handles + body poses → contacts appended
/// to the output buffer, count returned.
pub type CollideFn =
    fn(&GeomRegistry<'_>, GeomHandle, &Iso, GeomHandle, &Iso, &mut Vec<EngineContact>) -> usize;

/// Collide callback against a bare engine primitive (no adapter record).
pub type CollidePrimitiveFn = fn(
    &GeomRegistry<'_>,
    GeomHandle,
    &Iso,
    &dyn CollisionGeometry,
    &Iso,
    &mut Vec<EngineContact>,
) -> usize;

/// The callback table registered with the engine's custom-class mechanism.
#[derive(Clone, Copy, Debug)]
pub struct GeomClassFns {
    pub aabb: AabbFn,
    pub collide: CollideFn,
    pub collide_primitive: CollidePrimitiveFn,
}

static CLASS: OnceLock<GeomClassFns> = OnceLock::new();

/// Register the custom geometry class with the engine. Idempotent: repeated
/// calls return the already-registered table and register nothing twice.
///
/// Must run before the first [`GeomRegistry::create`] call.
pub fn init_custom_geometry_class() -> &'static GeomClassFns {
    CLASS.get_or_init(|| {
        log::debug!("registering custom geometry class");
        GeomClassFns {
            aabb: dispatch::geom_aabb,
            collide: dispatch::geom_collide,
            collide_primitive: dispatch::geom_collide_primitive,
        }
    })
}

/// The registered class table, if [`init_custom_geometry_class`] has run.
pub fn custom_geometry_class() -> Option<&'static GeomClassFns> {
    CLASS.get()
}

/// Return true once the custom class has been registered.
pub fn class_registered() -> bool {
    CLASS.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        let first = init_custom_geometry_class();
        let second = init_custom_geometry_class();

        // Same table, same entries: calling twice leaves the process in the
        // same state as calling once.
        assert!(std::ptr::eq(first, second));
        assert!(class_registered());
        assert!(std::ptr::eq(
            custom_geometry_class().unwrap(),
            first
        ));
    }
}

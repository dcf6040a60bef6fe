/*!
Custom-geometry bridge into a rigid-body engine's collision pipeline.

This crate lets application-defined collision geometry (meshes, implicit
surfaces, compounds — anything behind the [`geom::CollisionGeometry`] seam)
participate in an engine's broad- and narrow-phase without the engine
knowing its concrete representation. The code is split for clarity:

- record:   per-handle adapter state (geometry ref, outer margin, frame offset)
- handle:   packed slot+generation handle identifiers
- registry: handle factory and handle → record side-table, owner of records
- class:    process-wide one-time registration of the custom class callbacks
- dispatch: the engine-invoked bounding-volume and contact callbacks

Usage order: [`init_custom_geometry_class`] once per process, then
[`GeomRegistry::create`] per geometry; set each record's frame offset (the
negated local center of mass) before the handle's first simulation step.

Threading: everything here is invoked synchronously from the engine's
stepping loop. One registry per world; within one step, create/destroy must
not race dispatch for the same handle — that is the caller's contract, and
the generation check turns violations into missed contacts rather than
faults.
*/

pub mod class;
pub mod dispatch;
pub mod handle;
pub mod record;
pub mod registry;

// Re-export commonly used types and functions.
pub use class::{GeomClassFns, class_registered, custom_geometry_class, init_custom_geometry_class};
pub use dispatch::{EngineContact, geom_aabb, geom_collide, geom_collide_primitive};
pub use handle::{GeomHandle, handle_generation, handle_slot, pack_handle, validate_handle};
pub use record::CustomGeometryData;
pub use registry::{GeomRegistry, RegistryError};

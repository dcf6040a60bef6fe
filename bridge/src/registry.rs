/*!
Registry/factory for custom geometry handles.

The registry is the sole owner of adapter-record memory. It hands out packed
slot+generation handles, resolves them back to records during dispatch, and
frees the record exactly when the engine destroys the handle. The geometry a
record points at is never owned here; it is borrowed for `'g`.
*/

use geom::CollisionGeometry;

use crate::class;
use crate::handle::{self, GeomHandle, Generation, SlotIndex};
use crate::record::CustomGeometryData;

/// Rejected inputs to [`GeomRegistry::create`]. These are construction-time
/// validation failures, not recoverable mid-simulation conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("outer margin must be non-negative")]
    NegativeMargin,
    #[error("outer margin must be finite")]
    NonFiniteMargin,
}

struct Slot<'g> {
    /// Generation of the handle currently (or next) issued for this slot.
    generation: Generation,
    record: Option<CustomGeometryData<'g>>,
}

/// Side-table mapping engine geometry handles to adapter records.
///
/// One registry per simulation world. The engine's stepping loop invokes
/// dispatch against it synchronously; create/destroy must not race dispatch
/// for the same handle within a step (caller contract, see crate docs).
#[derive(Default)]
pub struct GeomRegistry<'g> {
    slots: Vec<Slot<'g>>,
    free: Vec<SlotIndex>,
    live: usize,
}

impl<'g> GeomRegistry<'g> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Create an engine geometry handle of the custom class, with an adapter
    /// record attached.
    ///
    /// The record starts with the given geometry and margin and a zero frame
    /// offset; set the offset via [`Self::get_mut`] (or
    /// [`CustomGeometryData::set_center_of_mass`]) once the owning body's
    /// center of mass is known, before the handle's first simulation step.
    ///
    /// [`class::init_custom_geometry_class`] must have run first.
    pub fn create(
        &mut self,
        geometry: &'g dyn CollisionGeometry,
        outer_margin: f32,
    ) -> Result<GeomHandle, RegistryError> {
        if !outer_margin.is_finite() {
            return Err(RegistryError::NonFiniteMargin);
        }
        if outer_margin < 0.0 {
            return Err(RegistryError::NegativeMargin);
        }
        debug_assert!(
            class::class_registered(),
            "init_custom_geometry_class must run before create"
        );

        let record = CustomGeometryData::new(geometry, outer_margin);
        let (slot, generation) = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                entry.record = Some(record);
                (slot, entry.generation)
            }
            None => {
                let slot = self.slots.len() as SlotIndex;
                self.slots.push(Slot {
                    generation: 1,
                    record: Some(record),
                });
                (slot, 1)
            }
        };
        self.live += 1;

        let handle = handle::pack_handle(slot, generation);
        log::debug!("created custom geometry handle {handle:#x} (margin {outer_margin})");
        Ok(handle)
    }

    /// The record attached to `handle`, or `None` if the handle is stale or
    /// was never issued by this registry.
    pub fn get(&self, handle: GeomHandle) -> Option<&CustomGeometryData<'g>> {
        let slot = self.slots.get(handle::handle_slot(handle) as usize)?;
        if slot.generation != handle::handle_generation(handle) {
            return None;
        }
        slot.record.as_ref()
    }

    /// Mutable access to the record, for post-creation updates of margin and
    /// frame offset.
    pub fn get_mut(&mut self, handle: GeomHandle) -> Option<&mut CustomGeometryData<'g>> {
        let slot = self.slots.get_mut(handle::handle_slot(handle) as usize)?;
        if slot.generation != handle::handle_generation(handle) {
            return None;
        }
        slot.record.as_mut()
    }

    /// Free the record for `handle`. Returns `false` if the handle was
    /// already stale (freeing is idempotent).
    ///
    /// Call this exactly when the engine destroys the handle — no earlier
    /// (dispatch would dangle) and no later (the record would leak past the
    /// handle's lifetime).
    pub fn destroy(&mut self, handle: GeomHandle) -> bool {
        let index = handle::handle_slot(handle);
        let Some(slot) = self.slots.get_mut(index as usize) else {
            return false;
        };
        if slot.generation != handle::handle_generation(handle) || slot.record.is_none() {
            return false;
        }

        slot.record = None;
        self.live -= 1;
        // Retire the slot instead of recycling it if its generation counter
        // is exhausted; otherwise a stale handle could alias a new record.
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(index);
        }
        log::debug!("destroyed custom geometry handle {handle:#x}");
        true
    }

    /// Number of live records.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Return true if no records are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::init_custom_geometry_class;
    use geom::{SharedShape, Vec3};

    #[test]
    fn create_then_get_roundtrips_geometry_margin_and_zero_offset() {
        init_custom_geometry_class();
        let ball = SharedShape::ball(1.0);
        let mut registry = GeomRegistry::new();

        let handle = registry.create(&ball, 0.25).unwrap();
        let rec = registry.get(handle).unwrap();

        assert!(std::ptr::eq(
            rec.geometry as *const dyn CollisionGeometry as *const u8,
            &ball as *const SharedShape as *const u8,
        ));
        assert_eq!(rec.outer_margin, 0.25);
        assert_eq!(rec.body_offset, Vec3::zeros());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn margins_are_validated_at_create() {
        init_custom_geometry_class();
        let ball = SharedShape::ball(1.0);
        let mut registry = GeomRegistry::new();

        assert_eq!(
            registry.create(&ball, -0.01).err(),
            Some(RegistryError::NegativeMargin)
        );
        assert_eq!(
            registry.create(&ball, f32::NAN).err(),
            Some(RegistryError::NonFiniteMargin)
        );
        assert_eq!(
            registry.create(&ball, f32::INFINITY).err(),
            Some(RegistryError::NonFiniteMargin)
        );
        assert!(registry.is_empty());
        assert!(registry.create(&ball, 0.0).is_ok());
    }

    #[test]
    fn post_creation_mutation_is_visible_through_get() {
        init_custom_geometry_class();
        let ball = SharedShape::ball(1.0);
        let mut registry = GeomRegistry::new();
        let handle = registry.create(&ball, 0.0).unwrap();

        {
            let rec = registry.get_mut(handle).unwrap();
            rec.outer_margin = 0.1;
            rec.set_center_of_mass(Vec3::new(0.0, 2.0, 0.0));
        }

        let rec = registry.get(handle).unwrap();
        assert_eq!(rec.outer_margin, 0.1);
        assert_eq!(rec.body_offset, Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn destroyed_handles_go_stale_and_stay_stale_across_slot_reuse() {
        init_custom_geometry_class();
        let ball = SharedShape::ball(1.0);
        let cube = SharedShape::cuboid(1.0, 1.0, 1.0);
        let mut registry = GeomRegistry::new();

        let first = registry.create(&ball, 0.0).unwrap();
        assert!(registry.destroy(first));
        assert!(registry.get(first).is_none());
        assert!(!registry.destroy(first));

        // The slot is recycled, but the stale handle must not see the new record.
        let second = registry.create(&cube, 0.0).unwrap();
        assert_ne!(first, second);
        assert!(registry.get(first).is_none());
        assert!(registry.get(second).is_some());
    }

    #[test]
    fn foreign_handles_resolve_to_none() {
        init_custom_geometry_class();
        let ball = SharedShape::ball(1.0);
        let mut registry = GeomRegistry::new();
        let _ = registry.create(&ball, 0.0).unwrap();

        // Wrong slot, and wrong generation on a valid slot.
        assert!(registry.get(crate::handle::pack_handle(99, 1)).is_none());
        assert!(registry.get(crate::handle::pack_handle(0, 7)).is_none());
    }
}

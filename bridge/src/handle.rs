/// Opaque identifier the bridge hands to the engine for one custom geometry.
///
/// # Why this exists
/// The engine treats geometry handles as plain scalar identifiers; it never
/// inspects them. To let the registry detect stale handles (a handle whose
/// record was already destroyed, possibly with the slot since reused), the
/// slot index and a per-slot generation counter are packed into a single
/// `u64`.
///
/// # Bit layout
/// This `u64` is a packed value with the following layout (least-significant
/// bit = bit 0):
///
/// - bits 0..=31  : slot index (u32)
/// - bits 32..=63 : generation (u32), never zero for a handle ever issued
///
/// # Invariants
/// - Two different `(slot, generation)` pairs must never produce the same
///   handle.
/// - Generation zero is reserved: no issued handle carries it, so it can be
///   rejected at boundaries.
pub type GeomHandle = u64;

/// Index of a record slot inside a [`crate::registry::GeomRegistry`].
pub type SlotIndex = u32;

/// Per-slot reuse counter. Bumped on every destroy.
pub type Generation = u32;

/// Packs a slot index and generation into a [`GeomHandle`].
#[inline]
pub fn pack_handle(slot: SlotIndex, generation: Generation) -> GeomHandle {
    (slot as u64) | ((generation as u64) << SlotIndex::BITS)
}

/// Extracts the slot index from a [`GeomHandle`].
#[inline]
pub fn handle_slot(handle: GeomHandle) -> SlotIndex {
    const SLOT_MASK: u64 = u32::MAX as u64;
    (handle & SLOT_MASK) as SlotIndex
}

/// Extracts the generation from a [`GeomHandle`].
#[inline]
pub fn handle_generation(handle: GeomHandle) -> Generation {
    (handle >> SlotIndex::BITS) as Generation
}

/// Validates that a handle conforms to the current packing contract.
///
/// Use this at boundaries (e.g. values round-tripped through the engine's
/// user-data slots) to fail fast on corrupted or foreign identifiers. A
/// passing handle may still be stale; only the owning registry can tell.
pub fn validate_handle(handle: GeomHandle) -> Result<(), &'static str> {
    if handle_generation(handle) == 0 {
        return Err("Geometry handle has a zero generation");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpacks_slot_and_generation() {
        let slots: [SlotIndex; 5] = [0, 1, 42, 1337, u32::MAX];
        let generations: [Generation; 4] = [1, 2, 9001, u32::MAX];

        for &slot in &slots {
            for &generation in &generations {
                let handle = pack_handle(slot, generation);

                assert_eq!(handle_slot(handle), slot);
                assert_eq!(handle_generation(handle), generation);
                assert_eq!(validate_handle(handle), Ok(()));
            }
        }
    }

    #[test]
    fn pack_places_slot_in_low_32_bits_and_generation_in_high_32_bits() {
        let handle = pack_handle(0x89AB_CDEF, 0x0123_4567);
        assert_eq!(handle, 0x0123_4567_89AB_CDEF);
    }

    #[test]
    fn validate_rejects_zero_generation() {
        assert_eq!(
            validate_handle(pack_handle(7, 0)),
            Err("Geometry handle has a zero generation")
        );
    }
}

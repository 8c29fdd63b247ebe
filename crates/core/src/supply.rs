//! Supply row - the staging slots the player drags pieces from
//!
//! Slots are laid out left to right, one tile apart, in supply-local
//! coordinates. A slot's point doubles as the return origin for a piece that
//! sits in it.

use arrayvec::ArrayVec;

use crate::types::{PieceId, Point, MAX_SUPPLY_SLOTS};

#[derive(Debug, Clone, PartialEq)]
pub struct Supply {
    tile_size: f64,
    slots: ArrayVec<Option<PieceId>, MAX_SUPPLY_SLOTS>,
}

impl Supply {
    /// Create an empty row. `len` is clamped to `MAX_SUPPLY_SLOTS`; the config
    /// rejects larger values before we get here.
    pub fn new(len: usize, tile_size: f64) -> Self {
        let mut slots = ArrayVec::new();
        for _ in 0..len.min(MAX_SUPPLY_SLOTS) {
            slots.push(None);
        }
        Self { tile_size, slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<PieceId> {
        self.slots.get(slot).copied().flatten()
    }

    /// Put a piece into a slot, returning the previous occupant.
    /// Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, piece: PieceId) -> Option<PieceId> {
        self.slots.get_mut(slot).and_then(|s| s.replace(piece))
    }

    /// Supply-local point of a slot
    pub fn slot_point(&self, slot: usize) -> Point {
        Point::new(slot as f64 * self.tile_size, 0.0)
    }

    /// Slot currently holding `piece`
    pub fn slot_of(&self, piece: PieceId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(piece))
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<PieceId>> + '_ {
        self.slots.iter().copied()
    }
}

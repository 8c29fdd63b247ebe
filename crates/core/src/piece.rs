//! Pieces - live tokens and the arena that owns them

use std::collections::BTreeMap;

use crate::types::{Location, PieceId, PieceKind, Point};

/// A live piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub location: Location,
    /// Supply-local point the piece returns to after a rejected drop
    pub origin: Point,
}

/// Arena of live pieces keyed by id
///
/// Ids are handed out monotonically and never reused within a store, so a
/// stale id held by a presenter can only miss, never alias a newer piece.
#[derive(Debug, Clone, Default)]
pub struct PieceStore {
    pieces: BTreeMap<PieceId, Piece>,
    next_id: u32,
}

impl PieceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a piece and return its id
    pub fn spawn(&mut self, kind: PieceKind, location: Location, origin: Point) -> PieceId {
        self.next_id += 1;
        let id = PieceId(self.next_id);
        self.pieces.insert(
            id,
            Piece {
                id,
                kind,
                location,
                origin,
            },
        );
        id
    }

    /// Destroy a piece
    pub fn release(&mut self, id: PieceId) -> Option<Piece> {
        self.pieces.remove(&id)
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(&id)
    }

    pub fn kind(&self, id: PieceId) -> Option<PieceKind> {
        self.pieces.get(&id).map(|p| p.kind)
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.pieces.contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.pieces.len()
    }

    /// Pieces in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Drop every piece. Ids keep counting up.
    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

//! Cascade resolution: destroy, gravity, refill
//!
//! One pass per committed swap. Nothing is re-detected after the refill.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::piece::PieceStore;
use crate::rng::KindPicker;
use crate::types::{GridPos, Location, PieceId, PieceKind, Point};

/// Phase of a cascade, in the order the presenter plays them back
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CascadePhase {
    Destroy,
    Gravity,
    Refill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub piece: PieceId,
    pub kind: PieceKind,
    pub pos: GridPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub piece: PieceId,
    pub from: GridPos,
    pub to: GridPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub piece: PieceId,
    pub kind: PieceKind,
    pub pos: GridPos,
    /// Order within its column, top first; presenters delay entry by it
    pub stagger: usize,
}

/// Everything a cascade did, grouped by phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub removed: Vec<Removal>,
    pub moved: Vec<Fall>,
    pub spawned: Vec<Spawn>,
}

impl CascadeReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.moved.is_empty() && self.spawned.is_empty()
    }
}

/// Destroy `positions`, let the touched columns settle and refill them.
pub fn resolve(
    grid: &mut Grid,
    pieces: &mut PieceStore,
    picker: &mut KindPicker,
    positions: &[GridPos],
) -> CascadeReport {
    let mut report = CascadeReport::default();
    let mut columns = BTreeSet::new();

    for &pos in positions {
        let Some(piece) = grid.remove(pos) else {
            continue;
        };
        columns.insert(pos.col);
        if let Some(released) = pieces.release(piece) {
            report.removed.push(Removal {
                piece,
                kind: released.kind,
                pos,
            });
        }
    }

    for &col in &columns {
        let empty = grid.empty_rows(col);

        // Bottom-up, so every target slot is already vacated.
        for row in (0..grid.rows()).rev() {
            let Some(piece) = grid.piece_at(row, col) else {
                continue;
            };
            let fall = empty.iter().filter(|&&r| r > row).count();
            if fall == 0 {
                continue;
            }
            let from = GridPos::new(row, col);
            let to = GridPos::new(row + fall, col);
            if grid.relocate(from, to).is_err() {
                continue;
            }
            if let Some(p) = pieces.get_mut(piece) {
                p.location = Location::OnBoard(to);
            }
            report.moved.push(Fall { piece, from, to });
        }

        for row in 0..empty.len() {
            let pos = GridPos::new(row, col);
            let kind = picker.draw();
            let piece = pieces.spawn(kind, Location::OnBoard(pos), Point::default());
            if grid.place(piece, pos).is_err() {
                pieces.release(piece);
                continue;
            }
            report.spawned.push(Spawn {
                piece,
                kind,
                pos,
                stagger: row,
            });
        }
    }

    report
}

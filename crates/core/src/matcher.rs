//! Match detection
//!
//! Detection starts from a seed cell with a given kind and walks outward along
//! both axes while neighbours are in bounds, occupied and of the same kind. The
//! seed itself is never looked up, so the same routine answers "what if this
//! kind were dropped here" and "what does the board hold now".

use crate::types::{Axis, GridPos, PieceKind};

/// A contiguous same-kind run along one axis
///
/// Positions are ordered left to right (horizontal) or top to bottom
/// (vertical).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub positions: Vec<GridPos>,
    pub kind: PieceKind,
    pub axis: Axis,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Groups found from one seed plus the de-duplicated union of their cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub groups: Vec<MatchGroup>,
    /// Union of group positions, each cell once, in discovery order
    pub positions: Vec<GridPos>,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        !self.groups.is_empty()
    }
}

/// Count consecutive cells from `seed` (exclusive) stepping by `(d_row, d_col)`
fn run_from<F>(
    rows: usize,
    columns: usize,
    seed: GridPos,
    kind: PieceKind,
    (d_row, d_col): (isize, isize),
    lookup: &F,
) -> Vec<GridPos>
where
    F: Fn(GridPos) -> Option<PieceKind>,
{
    let mut run = Vec::new();
    let mut cur = seed;
    while let Some(next) = cur.offset(d_row, d_col) {
        if next.row >= rows || next.col >= columns || lookup(next) != Some(kind) {
            break;
        }
        run.push(next);
        cur = next;
    }
    run
}

/// Find horizontal and vertical groups through `seed`
///
/// `lookup` returns the kind at a cell, or None for an empty cell. It is never
/// called for `seed` or for out-of-bounds cells.
pub fn detect<F>(
    rows: usize,
    columns: usize,
    seed: GridPos,
    kind: PieceKind,
    min_match_count: usize,
    lookup: F,
) -> MatchOutcome
where
    F: Fn(GridPos) -> Option<PieceKind>,
{
    let mut outcome = MatchOutcome::default();
    if seed.row >= rows || seed.col >= columns {
        return outcome;
    }

    let axes = [
        (Axis::Horizontal, (0, -1), (0, 1)),
        (Axis::Vertical, (-1, 0), (1, 0)),
    ];

    for (axis, back, forward) in axes {
        let before = run_from(rows, columns, seed, kind, back, &lookup);
        let after = run_from(rows, columns, seed, kind, forward, &lookup);
        let len = before.len() + 1 + after.len();
        if len < min_match_count {
            continue;
        }

        let mut positions = Vec::with_capacity(len);
        positions.extend(before.into_iter().rev());
        positions.push(seed);
        positions.extend(after);

        for pos in &positions {
            if !outcome.positions.contains(pos) {
                outcome.positions.push(*pos);
            }
        }
        outcome.groups.push(MatchGroup {
            positions,
            kind,
            axis,
        });
    }

    outcome
}

//! Drop validation
//!
//! Decides what a drop would do without touching any state. The engine applies
//! the verdict.

use crate::grid::Grid;
use crate::matcher::{self, MatchOutcome};
use crate::piece::PieceStore;
use crate::types::{GridPos, PieceId, Point};

/// Outcome of dropping a supply piece at a point
#[derive(Debug, Clone, PartialEq)]
pub enum DropVerdict {
    /// The point maps outside the board
    OutOfBounds { row: i64, col: i64 },
    /// The target cell holds no piece to swap with
    EmptyCell(GridPos),
    /// A swap would not form any group
    NoMatch { pos: GridPos, target: PieceId },
    /// A swap forms at least one group
    Commit {
        pos: GridPos,
        target: PieceId,
        slot: usize,
        outcome: MatchOutcome,
    },
    /// The dragged piece is gone or not in the supply
    Inconsistent(&'static str),
}

/// Judge a drop of `piece` at `point` (board parent coordinates)
pub fn check_drop(
    grid: &Grid,
    pieces: &PieceStore,
    piece: PieceId,
    point: Point,
    min_match_count: usize,
) -> DropVerdict {
    let Some(dragged) = pieces.get(piece) else {
        return DropVerdict::Inconsistent("dragged piece is not live");
    };
    let Some(slot) = dragged.location.supply_slot() else {
        return DropVerdict::Inconsistent("dragged piece is not in the supply");
    };

    let pos = match grid.cell_at(point) {
        Ok(pos) => pos,
        Err((row, col)) => return DropVerdict::OutOfBounds { row, col },
    };
    let Some(target) = grid.get(pos) else {
        return DropVerdict::EmptyCell(pos);
    };

    let outcome = matcher::detect(
        grid.rows(),
        grid.columns(),
        pos,
        dragged.kind,
        min_match_count,
        |p| grid.get(p).and_then(|id| pieces.kind(id)),
    );

    if outcome.is_match() {
        DropVerdict::Commit {
            pos,
            target,
            slot,
            outcome,
        }
    } else {
        DropVerdict::NoMatch { pos, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::BoardTransform;
    use crate::types::{Location, PieceKind};

    /// 6x6 board of alternating green/pink with a blue pair at (0,0),(0,1)
    fn setup() -> (Grid, PieceStore, PieceId) {
        let mut grid = Grid::new(6, 6, 100.0);
        let mut pieces = PieceStore::new();
        for row in 0..6 {
            for col in 0..6 {
                let kind = match (row, col) {
                    (0, 0) | (0, 1) => PieceKind::Blue,
                    _ if (row + col) % 2 == 0 => PieceKind::Green,
                    _ => PieceKind::Pink,
                };
                let pos = GridPos::new(row, col);
                let id = pieces.spawn(kind, Location::OnBoard(pos), Point::default());
                grid.place(id, pos).unwrap();
            }
        }
        let dragged = pieces.spawn(PieceKind::Blue, Location::InSupply(1), Point::new(100.0, 0.0));
        (grid, pieces, dragged)
    }

    #[test]
    fn test_commit_when_swap_matches() {
        let (grid, pieces, dragged) = setup();
        let verdict = check_drop(&grid, &pieces, dragged, Point::new(200.0, 0.0), 3);
        match verdict {
            DropVerdict::Commit { pos, slot, outcome, target } => {
                assert_eq!(pos, GridPos::new(0, 2));
                assert_eq!(slot, 1);
                assert_eq!(Some(target), grid.get(pos));
                assert_eq!(outcome.positions.len(), 3);
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn test_no_match() {
        let (grid, pieces, dragged) = setup();
        let verdict = check_drop(&grid, &pieces, dragged, Point::new(400.0, 400.0), 3);
        assert!(matches!(verdict, DropVerdict::NoMatch { pos, .. } if pos == GridPos::new(4, 4)));
    }

    #[test]
    fn test_out_of_bounds() {
        let (grid, pieces, dragged) = setup();
        assert_eq!(
            check_drop(&grid, &pieces, dragged, Point::new(-80.0, 0.0), 3),
            DropVerdict::OutOfBounds { row: 0, col: -1 }
        );
        assert_eq!(
            check_drop(&grid, &pieces, dragged, Point::new(0.0, 560.0), 3),
            DropVerdict::OutOfBounds { row: 6, col: 0 }
        );
    }

    #[test]
    fn test_empty_cell() {
        let (mut grid, pieces, dragged) = setup();
        grid.remove(GridPos::new(3, 3));
        assert_eq!(
            check_drop(&grid, &pieces, dragged, Point::new(300.0, 300.0), 3),
            DropVerdict::EmptyCell(GridPos::new(3, 3))
        );
    }

    #[test]
    fn test_transform_applies() {
        let (mut grid, pieces, dragged) = setup();
        grid.set_transform(BoardTransform::translate(1000.0, 0.0));
        assert!(matches!(
            check_drop(&grid, &pieces, dragged, Point::new(1200.0, 0.0), 3),
            DropVerdict::Commit { .. }
        ));
        assert!(matches!(
            check_drop(&grid, &pieces, dragged, Point::new(200.0, 0.0), 3),
            DropVerdict::OutOfBounds { .. }
        ));
    }

    #[test]
    fn test_inconsistent_context() {
        let (grid, pieces, _) = setup();
        let on_board = grid.get(GridPos::new(0, 0)).unwrap();
        assert!(matches!(
            check_drop(&grid, &pieces, on_board, Point::new(200.0, 0.0), 3),
            DropVerdict::Inconsistent(_)
        ));
        assert!(matches!(
            check_drop(&grid, &pieces, PieceId(999), Point::new(200.0, 0.0), 3),
            DropVerdict::Inconsistent(_)
        ));
    }
}

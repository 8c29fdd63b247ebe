//! Grid module - board occupancy and geometry
//!
//! The board is a `rows x columns` matrix where each slot is empty or holds one
//! piece id. Storage is a flat vector in row-major order (`row * columns + col`).
//! Row 0 is the top row; gravity pulls towards higher row numbers.
//!
//! The cell size only matters for converting between presentation coordinates
//! and cells; the rules never look at it.

use crate::error::GridError;
use crate::transform::BoardTransform;
use crate::types::{GridPos, PieceId, Point};

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cell_size: f64,
    transform: BoardTransform,
    /// Flat slots, row-major order (row * columns + col)
    slots: Vec<Option<PieceId>>,
}

impl Grid {
    /// Create an empty grid. Dimensions are validated by the config.
    pub fn new(rows: usize, columns: usize, cell_size: f64) -> Self {
        Self {
            rows,
            columns,
            cell_size,
            transform: BoardTransform::IDENTITY,
            slots: vec![None; rows * columns],
        }
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        Some(row * self.columns + col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn transform(&self) -> BoardTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: BoardTransform) {
        self.transform = transform;
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Top-left corner of a cell in board-local coordinates
    pub fn cell_position(&self, row: usize, col: usize) -> Point {
        Point::new(col as f64 * self.cell_size, row as f64 * self.cell_size)
    }

    /// Board-local coordinates to (row, col), rounding to the nearest cell.
    ///
    /// Per axis: with `v = coord / cell_size`, a fractional part of at least
    /// 0.5 rounds up, anything else rounds down. The fractional part keeps the
    /// sign of `v`, so negative coordinates always round down. Non-finite input
    /// maps to `i64::MIN`, which no board contains.
    pub fn cell_from_coords(&self, x: f64, y: f64) -> (i64, i64) {
        (self.round_axis(y), self.round_axis(x))
    }

    fn round_axis(&self, coord: f64) -> i64 {
        let v = coord / self.cell_size;
        if !v.is_finite() {
            return i64::MIN;
        }
        let rounded = if v % 1.0 >= 0.5 { v.ceil() } else { v.floor() };
        rounded as i64
    }

    /// Map a parent-space point to a cell on the board.
    /// Outside the board, the error carries the signed (row, col) it hit.
    pub fn cell_at(&self, external: Point) -> Result<GridPos, (i64, i64)> {
        let local = self.transform.to_local(external);
        let (row, col) = self.cell_from_coords(local.x, local.y);
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if self.in_bounds(GridPos::new(r, c)) => Ok(GridPos::new(r, c)),
            _ => Err((row, col)),
        }
    }

    /// Piece at (row, col); None when empty or out of range
    pub fn piece_at(&self, row: usize, col: usize) -> Option<PieceId> {
        self.index(row, col).and_then(|idx| self.slots[idx])
    }

    pub fn get(&self, pos: GridPos) -> Option<PieceId> {
        self.piece_at(pos.row, pos.col)
    }

    /// Put a piece into an empty slot
    pub fn place(&mut self, piece: PieceId, pos: GridPos) -> Result<(), GridError> {
        let idx = self
            .index(pos.row, pos.col)
            .ok_or(GridError::OutOfBounds(pos))?;
        if self.slots[idx].is_some() {
            return Err(GridError::Occupied(pos));
        }
        self.slots[idx] = Some(piece);
        Ok(())
    }

    /// Swap the occupant of a slot for another piece, returning the old one
    pub fn replace(&mut self, pos: GridPos, piece: PieceId) -> Option<PieceId> {
        let idx = self.index(pos.row, pos.col)?;
        self.slots[idx].replace(piece)
    }

    /// Empty a slot, returning what was there
    pub fn remove(&mut self, pos: GridPos) -> Option<PieceId> {
        let idx = self.index(pos.row, pos.col)?;
        self.slots[idx].take()
    }

    /// Move a piece between slots; the target must be empty
    pub fn relocate(&mut self, from: GridPos, to: GridPos) -> Result<PieceId, GridError> {
        let to_idx = self.index(to.row, to.col).ok_or(GridError::OutOfBounds(to))?;
        if self.slots[to_idx].is_some() {
            return Err(GridError::Occupied(to));
        }
        let piece = self.remove(from).ok_or(GridError::OutOfBounds(from))?;
        self.slots[to_idx] = Some(piece);
        Ok(piece)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Rows of a column that are currently empty, top to bottom
    pub fn empty_rows(&self, col: usize) -> Vec<usize> {
        if col >= self.columns {
            return Vec::new();
        }
        (0..self.rows)
            .filter(|&row| self.piece_at(row, col).is_none())
            .collect()
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// All occupied slots in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (GridPos, PieceId)> + '_ {
        let columns = self.columns;
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(idx, slot)| slot.map(|id| (GridPos::new(idx / columns, idx % columns), id)))
    }

    /// Raw slots, row-major
    pub fn slots(&self) -> &[Option<PieceId>] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(6, 8, 10.0);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(0, 7), Some(7));
        assert_eq!(grid.index(1, 0), Some(8));
        assert_eq!(grid.index(5, 7), Some(47));
        assert_eq!(grid.index(6, 0), None);
        assert_eq!(grid.index(0, 8), None);
    }

    #[test]
    fn test_cell_position_is_linear() {
        let grid = Grid::new(6, 6, 128.0);
        assert_eq!(grid.cell_position(0, 0), Point::new(0.0, 0.0));
        assert_eq!(grid.cell_position(2, 3), Point::new(384.0, 256.0));
    }

    #[test]
    fn test_cell_from_coords_rounds_to_nearest() {
        let grid = Grid::new(6, 6, 100.0);
        assert_eq!(grid.cell_from_coords(0.0, 0.0), (0, 0));
        assert_eq!(grid.cell_from_coords(49.9, 49.9), (0, 0));
        assert_eq!(grid.cell_from_coords(50.0, 0.0), (0, 1));
        assert_eq!(grid.cell_from_coords(0.0, 50.0), (1, 0));
        assert_eq!(grid.cell_from_coords(249.0, 151.0), (2, 2));
    }

    #[test]
    fn test_cell_from_coords_negative_rounds_down() {
        let grid = Grid::new(6, 6, 100.0);
        assert_eq!(grid.cell_from_coords(-30.0, 0.0), (0, -1));
        assert_eq!(grid.cell_from_coords(-70.0, 0.0), (0, -1));
        assert_eq!(grid.cell_from_coords(0.0, -120.0), (-2, 0));
    }

    #[test]
    fn test_cell_from_coords_non_finite() {
        let grid = Grid::new(6, 6, 100.0);
        assert_eq!(grid.cell_from_coords(f64::NAN, 0.0), (0, i64::MIN));
        assert_eq!(grid.cell_at(Point::new(f64::INFINITY, 0.0)), Err((0, i64::MIN)));
    }

    #[test]
    fn test_cell_at_uses_transform() {
        let mut grid = Grid::new(6, 6, 100.0);
        grid.set_transform(BoardTransform::translate(1000.0, 500.0));
        assert_eq!(grid.cell_at(Point::new(1000.0, 500.0)), Ok(GridPos::new(0, 0)));
        assert_eq!(grid.cell_at(Point::new(1210.0, 790.0)), Ok(GridPos::new(3, 2)));
        assert_eq!(grid.cell_at(Point::new(0.0, 0.0)), Err((-5, -10)));
        assert_eq!(grid.cell_at(Point::new(1560.0, 500.0)), Err((0, 6)));
    }

    #[test]
    fn test_place_remove_and_bounds() {
        let mut grid = Grid::new(6, 6, 1.0);
        let pos = GridPos::new(2, 3);
        assert_eq!(grid.place(PieceId(1), pos), Ok(()));
        assert_eq!(grid.place(PieceId(2), pos), Err(GridError::Occupied(pos)));
        assert_eq!(
            grid.place(PieceId(2), GridPos::new(6, 0)),
            Err(GridError::OutOfBounds(GridPos::new(6, 0)))
        );
        assert_eq!(grid.piece_at(2, 3), Some(PieceId(1)));
        assert_eq!(grid.piece_at(9, 9), None);
        assert_eq!(grid.remove(pos), Some(PieceId(1)));
        assert_eq!(grid.remove(pos), None);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_relocate_requires_empty_target() {
        let mut grid = Grid::new(6, 6, 1.0);
        grid.place(PieceId(1), GridPos::new(0, 0)).unwrap();
        grid.place(PieceId(2), GridPos::new(1, 0)).unwrap();
        assert_eq!(
            grid.relocate(GridPos::new(0, 0), GridPos::new(1, 0)),
            Err(GridError::Occupied(GridPos::new(1, 0)))
        );
        assert_eq!(grid.relocate(GridPos::new(1, 0), GridPos::new(5, 0)), Ok(PieceId(2)));
        assert_eq!(grid.empty_rows(0), vec![1, 2, 3, 4]);
        assert!(grid.empty_rows(6).is_empty());
    }

    #[test]
    fn test_occupied_iterates_row_major() {
        let mut grid = Grid::new(6, 6, 1.0);
        grid.place(PieceId(5), GridPos::new(3, 1)).unwrap();
        grid.place(PieceId(4), GridPos::new(0, 5)).unwrap();
        let all: Vec<_> = grid.occupied().collect();
        assert_eq!(
            all,
            vec![(GridPos::new(0, 5), PieceId(4)), (GridPos::new(3, 1), PieceId(5))]
        );
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
    }
}

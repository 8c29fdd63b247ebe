//! Preset layouts
//!
//! One letter per piece (`b` blue, `g` green, `p` pink, `y` yellow), `.` for an
//! empty slot. Rows are listed top to bottom.
//!
//! ```
//! use match_drop_core::Layout;
//!
//! let layout = Layout::parse(&["bgb", "gbg"], "bb.").unwrap();
//! assert_eq!(layout.rows(), 2);
//! assert_eq!(layout.columns(), 3);
//! ```

use crate::config::GameConfig;
use crate::error::LayoutError;
use crate::types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    board: Vec<Vec<Option<PieceKind>>>,
    supply: Vec<Option<PieceKind>>,
}

fn parse_cell(c: char, at: impl FnOnce() -> String) -> Result<Option<PieceKind>, LayoutError> {
    if c == '.' {
        return Ok(None);
    }
    PieceKind::from_char(c)
        .map(Some)
        .ok_or_else(|| LayoutError::UnknownCode { code: c, at: at() })
}

impl Layout {
    pub fn parse(board: &[&str], supply: &str) -> Result<Self, LayoutError> {
        let board = board
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, c)| parse_cell(c, || format!("row {row}, column {col}")))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let supply = supply
            .chars()
            .enumerate()
            .map(|(slot, c)| parse_cell(c, || format!("supply slot {slot}")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { board, supply })
    }

    pub fn rows(&self) -> usize {
        self.board.len()
    }

    pub fn columns(&self) -> usize {
        self.board.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<PieceKind> {
        self.board.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn supply(&self) -> &[Option<PieceKind>] {
        &self.supply
    }

    /// Check dimensions and palette against a configuration
    pub fn check(&self, config: &GameConfig) -> Result<(), LayoutError> {
        if self.board.len() != config.rows {
            return Err(LayoutError::RowCount {
                got: self.board.len(),
                expected: config.rows,
            });
        }
        for (row, cells) in self.board.iter().enumerate() {
            if cells.len() != config.columns {
                return Err(LayoutError::RowWidth {
                    row,
                    got: cells.len(),
                    expected: config.columns,
                });
            }
        }
        if self.supply.len() != config.supply_slots {
            return Err(LayoutError::SupplyLen {
                got: self.supply.len(),
                expected: config.supply_slots,
            });
        }
        let palette = config.mode.palette();
        let kinds = self.board.iter().flatten().chain(self.supply.iter()).flatten();
        for kind in kinds {
            if !palette.contains(kind) {
                return Err(LayoutError::OutsidePalette { kind: *kind });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardLimits;
    use crate::types::Mode;

    fn small_config() -> GameConfig {
        GameConfig::default()
            .with_limits(BoardLimits::square(2, 12))
            .with_size(2, 3)
    }

    #[test]
    fn test_parse_letters_and_gaps() {
        let layout = Layout::parse(&["bg.", "PYb"], "g.b").unwrap();
        assert_eq!(layout.cell(0, 0), Some(PieceKind::Blue));
        assert_eq!(layout.cell(0, 2), None);
        assert_eq!(layout.cell(1, 0), Some(PieceKind::Pink));
        assert_eq!(layout.supply(), &[Some(PieceKind::Green), None, Some(PieceKind::Blue)]);
    }

    #[test]
    fn test_unknown_code() {
        let err = Layout::parse(&["bx"], "bbb").unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownCode {
                code: 'x',
                at: "row 0, column 1".to_string()
            }
        );
        assert!(matches!(
            Layout::parse(&["bb"], "b?b"),
            Err(LayoutError::UnknownCode { code: '?', .. })
        ));
    }

    #[test]
    fn test_check_dimensions() {
        let config = small_config();
        assert_eq!(Layout::parse(&["bgb", "gbg"], "bgp").unwrap().check(&config), Ok(()));
        assert_eq!(
            Layout::parse(&["bgb"], "bgp").unwrap().check(&config),
            Err(LayoutError::RowCount { got: 1, expected: 2 })
        );
        assert_eq!(
            Layout::parse(&["bgb", "gb"], "bgp").unwrap().check(&config),
            Err(LayoutError::RowWidth { row: 1, got: 2, expected: 3 })
        );
        assert_eq!(
            Layout::parse(&["bgb", "gbg"], "bg").unwrap().check(&config),
            Err(LayoutError::SupplyLen { got: 2, expected: 3 })
        );
    }

    #[test]
    fn test_check_palette() {
        let config = small_config().with_mode(Mode::Easy);
        assert_eq!(
            Layout::parse(&["bgb", "gbg"], "bgp").unwrap().check(&config),
            Err(LayoutError::OutsidePalette { kind: PieceKind::Pink })
        );
    }
}

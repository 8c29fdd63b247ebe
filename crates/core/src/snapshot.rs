use crate::machine::InteractionState;
use crate::types::{GridPos, Location, PieceId, PieceKind, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub kind: PieceKind,
    pub location: Location,
    pub origin: Point,
}

/// Read-only copy of everything a presenter or client needs
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub tile_size: f64,
    /// Row-major
    pub board: Vec<Option<PieceSnapshot>>,
    pub supply: Vec<Option<PieceSnapshot>>,
    pub state: InteractionState,
    pub score: u32,
    pub moves_remaining: u32,
    pub failed_moves: u32,
    pub failed_streak: u32,
    pub successful_moves: u32,
    pub won: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u32,
    pub hint: Option<Vec<GridPos>>,
}

impl GameSnapshot {
    pub fn cell(&self, row: usize, col: usize) -> Option<&PieceSnapshot> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.board[row * self.columns + col].as_ref()
    }

    /// Board as layout letters, one string per row
    pub fn board_letters(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|col| self.cell(row, col).map_or('.', |p| p.kind.as_char()))
                    .collect()
            })
            .collect()
    }

    pub fn supply_letters(&self) -> String {
        self.supply
            .iter()
            .map(|s| s.as_ref().map_or('.', |p| p.kind.as_char()))
            .collect()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.state != InteractionState::Matching
    }
}

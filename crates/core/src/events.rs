//! Notifications queued for the presentation layer

use crate::cascade::CascadePhase;
use crate::matcher::MatchGroup;
use crate::types::{GridPos, PieceId, PieceKind, Point};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A committed drop swapped a supply piece with a board piece
    PieceSwapped {
        placed: PieceId,
        displaced: PieceId,
        pos: GridPos,
        slot: usize,
        /// New return point of the displaced piece
        origin: Point,
    },
    /// A rejected drop; the piece goes back to its origin
    PieceReturned { piece: PieceId, origin: Point },
    MatchResolved { groups: Vec<MatchGroup> },
    PieceRemoved {
        piece: PieceId,
        kind: PieceKind,
        pos: GridPos,
    },
    PieceMoved {
        piece: PieceId,
        from: GridPos,
        to: GridPos,
    },
    PieceSpawned {
        piece: PieceId,
        kind: PieceKind,
        pos: GridPos,
        stagger: usize,
    },
    ScoreChanged { score: u32, delta: u32 },
    MovesChanged { moves_remaining: u32 },
    GameWon { score: u32 },
    GameOver { score: u32 },
    HintShown {
        positions: Vec<GridPos>,
        duration_ms: u32,
    },
    HintCleared,
    BoardReset { episode_id: u32 },
}

impl GameEvent {
    /// Cascade phase for board mutations, None otherwise
    pub fn phase(&self) -> Option<CascadePhase> {
        match self {
            GameEvent::PieceRemoved { .. } => Some(CascadePhase::Destroy),
            GameEvent::PieceMoved { .. } => Some(CascadePhase::Gravity),
            GameEvent::PieceSpawned { .. } => Some(CascadePhase::Refill),
            _ => None,
        }
    }

    /// camelCase name used in logs and on the wire
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PieceSwapped { .. } => "pieceSwapped",
            GameEvent::PieceReturned { .. } => "pieceReturned",
            GameEvent::MatchResolved { .. } => "matchResolved",
            GameEvent::PieceRemoved { .. } => "pieceRemoved",
            GameEvent::PieceMoved { .. } => "pieceMoved",
            GameEvent::PieceSpawned { .. } => "pieceSpawned",
            GameEvent::ScoreChanged { .. } => "scoreChanged",
            GameEvent::MovesChanged { .. } => "movesChanged",
            GameEvent::GameWon { .. } => "gameWon",
            GameEvent::GameOver { .. } => "gameOver",
            GameEvent::HintShown { .. } => "hintShown",
            GameEvent::HintCleared => "hintCleared",
            GameEvent::BoardReset { .. } => "boardReset",
        }
    }
}

//! Shared types - plain data used by the engine, the adapter and presenters
//!
//! Everything here is a pure data structure with no external dependencies, so
//! it can travel between the core rules, a wire protocol and a renderer.
//!
//! # Default Rules
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_MATCH_COUNT` | 3 | Shortest run that counts as a match |
//! | `POINTS_PER_PIECE` | 10 | Score per piece in a match group |
//! | `SUPPLY_SLOTS` | 3 | Pieces waiting in the supply row |
//! | `WIN_SCORE` | 500 | Score that wins the game |
//! | `DEFAULT_MAX_MOVES` | 25 | Committed swaps before game over |
//! | `HINT_EVERY_FAILURES` | 2 | Failed drops between hints |
//!
//! # Board Limits
//!
//! Rows and columns must each lie in `MIN_BOARD_SIDE..=MAX_BOARD_SIDE`
//! (6..=12) unless a configuration widens the limits.
//!
//! # Examples
//!
//! ```
//! use match_drop_types::{GridPos, Mode, PieceKind};
//!
//! let kind = PieceKind::from_str("pink").unwrap();
//! assert_eq!(kind, PieceKind::Pink);
//! assert_eq!(PieceKind::from_char('p'), Some(PieceKind::Pink));
//!
//! assert_eq!(Mode::Easy.palette(), &[PieceKind::Blue, PieceKind::Green]);
//! assert_eq!(Mode::Hard.palette().len(), 4);
//!
//! let pos = GridPos::new(2, 3);
//! assert_eq!(pos.offset(0, -1), Some(GridPos::new(2, 2)));
//! ```

/// Shortest run of identical kinds that forms a match group
pub const MIN_MATCH_COUNT: usize = 3;

/// Points awarded per piece in a match group
pub const POINTS_PER_PIECE: u32 = 10;

/// Number of slots in the supply row
pub const SUPPLY_SLOTS: usize = 3;

/// Upper bound on supply slots (supply storage is stack allocated)
pub const MAX_SUPPLY_SLOTS: usize = 8;

/// Score at which the game is won
pub const WIN_SCORE: u32 = 500;

/// Moves available at the start of a game
pub const DEFAULT_MAX_MOVES: u32 = 25;

/// A hint is offered after every N consecutive failed drops
pub const HINT_EVERY_FAILURES: u32 = 2;

/// How long a presenter keeps a hint highlighted (ms)
pub const HINT_DURATION_MS: u32 = 1200;

/// Smallest allowed board side (rows or columns)
pub const MIN_BOARD_SIDE: usize = 6;

/// Largest allowed board side (rows or columns)
pub const MAX_BOARD_SIDE: usize = 12;

/// Default board side
pub const DEFAULT_BOARD_SIDE: usize = 8;

/// Default tile size in presentation units
pub const DEFAULT_TILE_SIZE: f64 = 128.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_constants() {
        assert_eq!(MIN_MATCH_COUNT, 3);
        assert_eq!(POINTS_PER_PIECE, 10);
        assert_eq!(SUPPLY_SLOTS, 3);
        assert_eq!(WIN_SCORE, 500);
        assert_eq!(DEFAULT_MAX_MOVES, 25);
        assert_eq!(HINT_EVERY_FAILURES, 2);
        assert!(SUPPLY_SLOTS <= MAX_SUPPLY_SLOTS);
        assert!((MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&DEFAULT_BOARD_SIDE));
    }

    #[test]
    fn palettes_grow_with_difficulty() {
        assert_eq!(Mode::Easy.palette().len(), 2);
        assert_eq!(Mode::Normal.palette().len(), 3);
        assert_eq!(Mode::Hard.palette().len(), 4);
        // Each palette extends the previous one.
        assert!(Mode::Hard.palette().starts_with(Mode::Normal.palette()));
        assert!(Mode::Normal.palette().starts_with(Mode::Easy.palette()));
    }

    #[test]
    fn piece_kind_letters_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn grid_pos_offset_rejects_negative() {
        let pos = GridPos::new(0, 0);
        assert_eq!(pos.offset(-1, 0), None);
        assert_eq!(pos.offset(0, -1), None);
        assert_eq!(pos.offset(1, 1), Some(GridPos::new(1, 1)));
    }

    #[test]
    fn intent_piece_accessor() {
        let id = PieceId(7);
        assert_eq!(Intent::DragStart { piece: id }.piece(), Some(id));
        assert_eq!(
            Intent::DragEnd {
                piece: id,
                position: Point::new(1.0, 2.0)
            }
            .piece(),
            Some(id)
        );
        assert_eq!(Intent::MatchesCompleted.piece(), None);
    }
}

/// Piece kinds (gem colours)
///
/// The active palette is a prefix of [`PieceKind::ALL`] chosen by [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Blue,
    Green,
    Pink,
    Yellow,
}

impl PieceKind {
    /// Every kind, in palette order
    pub const ALL: [PieceKind; 4] = [
        PieceKind::Blue,
        PieceKind::Green,
        PieceKind::Pink,
        PieceKind::Yellow,
    ];

    /// Parse piece kind from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match_drop_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("Blue"), Some(PieceKind::Blue));
    /// assert_eq!(PieceKind::from_str("yellow"), Some(PieceKind::Yellow));
    /// assert_eq!(PieceKind::from_str("red"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(PieceKind::Blue),
            "green" => Some(PieceKind::Green),
            "pink" => Some(PieceKind::Pink),
            "yellow" => Some(PieceKind::Yellow),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Blue => "blue",
            PieceKind::Green => "green",
            PieceKind::Pink => "pink",
            PieceKind::Yellow => "yellow",
        }
    }

    /// Parse the single-letter layout code (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'b' => Some(PieceKind::Blue),
            'g' => Some(PieceKind::Green),
            'p' => Some(PieceKind::Pink),
            'y' => Some(PieceKind::Yellow),
            _ => None,
        }
    }

    /// Single-letter layout code
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::Blue => 'b',
            PieceKind::Green => 'g',
            PieceKind::Pink => 'p',
            PieceKind::Yellow => 'y',
        }
    }
}

/// Difficulty mode - controls the palette size
///
/// - **Easy**: 2 kinds
/// - **Normal**: 3 kinds
/// - **Hard**: 4 kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Mode {
    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Mode::Easy),
            "normal" => Some(Mode::Normal),
            "hard" => Some(Mode::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Normal => "normal",
            Mode::Hard => "hard",
        }
    }

    /// Kinds that can appear on the board in this mode
    pub fn palette(&self) -> &'static [PieceKind] {
        match self {
            Mode::Easy => &PieceKind::ALL[..2],
            Mode::Normal => &PieceKind::ALL[..3],
            Mode::Hard => &PieceKind::ALL[..],
        }
    }
}

/// Cell coordinates on the board. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step by a signed delta; None when either coordinate would go negative.
    /// Upper bounds are the caller's concern.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Self { row, col })
    }
}

/// A point in presentation space (board-local or external, depending on context)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Match axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

/// Stable identity of a piece for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// Where a live piece currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    OnBoard(GridPos),
    InSupply(usize),
}

impl Location {
    pub fn board_pos(&self) -> Option<GridPos> {
        match self {
            Location::OnBoard(pos) => Some(*pos),
            Location::InSupply(_) => None,
        }
    }

    pub fn supply_slot(&self) -> Option<usize> {
        match self {
            Location::InSupply(slot) => Some(*slot),
            Location::OnBoard(_) => None,
        }
    }
}

/// Typed input from the presentation layer
///
/// Pointer positions are expressed in the coordinate space of the board's
/// parent container; the engine converts them with the board transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    DragStart { piece: PieceId },
    DragEnd { piece: PieceId, position: Point },
    HoverStart { piece: PieceId },
    HoverEnd { piece: PieceId },
    /// The presenter finished animating a resolved match
    MatchesCompleted,
    /// Start a fresh episode with the same configuration
    Reset,
}

impl Intent {
    /// Piece the intent refers to, if any
    pub fn piece(&self) -> Option<PieceId> {
        match self {
            Intent::DragStart { piece }
            | Intent::DragEnd { piece, .. }
            | Intent::HoverStart { piece }
            | Intent::HoverEnd { piece } => Some(*piece),
            Intent::MatchesCompleted | Intent::Reset => None,
        }
    }

    /// camelCase name used in logs and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::DragStart { .. } => "dragStart",
            Intent::DragEnd { .. } => "dragEnd",
            Intent::HoverStart { .. } => "hoverStart",
            Intent::HoverEnd { .. } => "hoverEnd",
            Intent::MatchesCompleted => "matchesCompleted",
            Intent::Reset => "reset",
        }
    }
}

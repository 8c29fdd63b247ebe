//! Game configuration
//!
//! [`GameConfig::default`] reproduces the reference rules: an 8x8 board in
//! normal mode, three supply slots, 25 moves, matches of three scoring ten
//! points per piece and a win at 500 points. Builders chain `with_*` setters;
//! [`GameConfig::validate`] is called by the engine before anything is built.

use crate::error::ConfigError;
use crate::types::{
    Mode, DEFAULT_BOARD_SIDE, DEFAULT_MAX_MOVES, DEFAULT_TILE_SIZE, HINT_DURATION_MS,
    HINT_EVERY_FAILURES, MAX_BOARD_SIDE, MAX_SUPPLY_SLOTS, MIN_BOARD_SIDE, MIN_MATCH_COUNT,
    POINTS_PER_PIECE, SUPPLY_SLOTS, WIN_SCORE,
};

/// Allowed board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLimits {
    pub min_rows: usize,
    pub max_rows: usize,
    pub min_columns: usize,
    pub max_columns: usize,
}

impl Default for BoardLimits {
    fn default() -> Self {
        Self {
            min_rows: MIN_BOARD_SIDE,
            max_rows: MAX_BOARD_SIDE,
            min_columns: MIN_BOARD_SIDE,
            max_columns: MAX_BOARD_SIDE,
        }
    }
}

impl BoardLimits {
    /// Limits that accept any side between `min` and `max` on both axes
    pub fn square(min: usize, max: usize) -> Self {
        Self {
            min_rows: min,
            max_rows: max,
            min_columns: min,
            max_columns: max,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub tile_size: f64,
    pub max_moves: u32,
    pub mode: Mode,
    pub min_match_count: usize,
    pub points_per_piece: u32,
    pub supply_slots: usize,
    pub win_score: u32,
    /// Offer a hint after every N consecutive failed drops
    pub hint_every: u32,
    /// Shortest run the hint advisor will highlight
    pub hint_min_run: usize,
    pub hint_duration_ms: u32,
    /// Non-matching swaps also cost a move
    pub charge_failed_moves: bool,
    pub seed: u32,
    pub limits: BoardLimits,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOARD_SIDE,
            columns: DEFAULT_BOARD_SIDE,
            tile_size: DEFAULT_TILE_SIZE,
            max_moves: DEFAULT_MAX_MOVES,
            mode: Mode::Normal,
            min_match_count: MIN_MATCH_COUNT,
            points_per_piece: POINTS_PER_PIECE,
            supply_slots: SUPPLY_SLOTS,
            win_score: WIN_SCORE,
            hint_every: HINT_EVERY_FAILURES,
            hint_min_run: MIN_MATCH_COUNT - 1,
            hint_duration_ms: HINT_DURATION_MS,
            charge_failed_moves: false,
            seed: 1,
            limits: BoardLimits::default(),
        }
    }
}

impl GameConfig {
    pub fn with_size(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_tile_size(mut self, tile_size: f64) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Also moves the hint run length to one short of a match; call
    /// [`GameConfig::with_hints`] afterwards to pick another.
    pub fn with_min_match_count(mut self, min_match_count: usize) -> Self {
        self.min_match_count = min_match_count;
        self.hint_min_run = min_match_count.saturating_sub(1).max(2);
        self
    }

    pub fn with_points_per_piece(mut self, points: u32) -> Self {
        self.points_per_piece = points;
        self
    }

    pub fn with_supply_slots(mut self, slots: usize) -> Self {
        self.supply_slots = slots;
        self
    }

    pub fn with_win_score(mut self, win_score: u32) -> Self {
        self.win_score = win_score;
        self
    }

    pub fn with_hints(mut self, every: u32, min_run: usize, duration_ms: u32) -> Self {
        self.hint_every = every;
        self.hint_min_run = min_run;
        self.hint_duration_ms = duration_ms;
        self
    }

    pub fn with_charge_failed_moves(mut self, charge: bool) -> Self {
        self.charge_failed_moves = charge;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_limits(mut self, limits: BoardLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Check every field against its bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = self.limits;
        if l.min_rows == 0 || l.min_columns == 0 || l.min_rows > l.max_rows || l.min_columns > l.max_columns {
            return Err(ConfigError::Limits {
                min_rows: l.min_rows,
                max_rows: l.max_rows,
                min_columns: l.min_columns,
                max_columns: l.max_columns,
            });
        }
        if !(l.min_rows..=l.max_rows).contains(&self.rows) {
            return Err(ConfigError::Rows {
                got: self.rows,
                min: l.min_rows,
                max: l.max_rows,
            });
        }
        if !(l.min_columns..=l.max_columns).contains(&self.columns) {
            return Err(ConfigError::Columns {
                got: self.columns,
                min: l.min_columns,
                max: l.max_columns,
            });
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        if self.supply_slots == 0 || self.supply_slots > MAX_SUPPLY_SLOTS {
            return Err(ConfigError::SupplySlots {
                got: self.supply_slots,
                max: MAX_SUPPLY_SLOTS,
            });
        }
        if self.min_match_count < 2 {
            return Err(ConfigError::MinMatchCount(self.min_match_count));
        }
        if self.hint_min_run < 2 {
            return Err(ConfigError::HintMinRun(self.hint_min_run));
        }
        if self.hint_every == 0 {
            return Err(ConfigError::HintEvery);
        }
        if self.max_moves == 0 {
            return Err(ConfigError::MaxMoves);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.min_match_count, 3);
        assert_eq!(config.points_per_piece, 10);
        assert_eq!(config.supply_slots, 3);
        assert_eq!(config.max_moves, 25);
        assert!(!config.charge_failed_moves);
    }

    #[test]
    fn test_board_side_bounds() {
        assert!(GameConfig::default().with_size(6, 6).validate().is_ok());
        assert!(GameConfig::default().with_size(12, 12).validate().is_ok());
        assert_eq!(
            GameConfig::default().with_size(5, 8).validate(),
            Err(ConfigError::Rows { got: 5, min: 6, max: 12 })
        );
        assert_eq!(
            GameConfig::default().with_size(8, 13).validate(),
            Err(ConfigError::Columns { got: 13, min: 6, max: 12 })
        );
    }

    #[test]
    fn test_hint_run_follows_match_count() {
        assert_eq!(GameConfig::default().hint_min_run, 2);
        let four = GameConfig::default().with_min_match_count(4);
        assert_eq!(four.hint_min_run, 3);
        assert!(four.validate().is_ok());
        assert_eq!(GameConfig::default().with_min_match_count(2).hint_min_run, 2);

        let explicit = GameConfig::default().with_min_match_count(4).with_hints(2, 2, 500);
        assert_eq!(explicit.hint_min_run, 2);
    }

    #[test]
    fn test_widened_limits_accept_small_boards() {
        let config = GameConfig::default()
            .with_limits(BoardLimits::square(3, 12))
            .with_size(5, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_fields_rejected() {
        let base = GameConfig::default();
        assert!(matches!(
            base.clone().with_tile_size(0.0).validate(),
            Err(ConfigError::TileSize(_))
        ));
        assert!(matches!(
            base.clone().with_tile_size(f64::NAN).validate(),
            Err(ConfigError::TileSize(_))
        ));
        assert!(matches!(
            base.clone().with_supply_slots(0).validate(),
            Err(ConfigError::SupplySlots { .. })
        ));
        assert!(matches!(
            base.clone().with_supply_slots(MAX_SUPPLY_SLOTS + 1).validate(),
            Err(ConfigError::SupplySlots { .. })
        ));
        assert_eq!(
            base.clone().with_min_match_count(1).validate(),
            Err(ConfigError::MinMatchCount(1))
        );
        assert_eq!(base.clone().with_max_moves(0).validate(), Err(ConfigError::MaxMoves));
        assert_eq!(
            base.clone().with_hints(0, 2, 100).validate(),
            Err(ConfigError::HintEvery)
        );
        assert!(matches!(
            base.with_limits(BoardLimits::square(9, 7)).validate(),
            Err(ConfigError::Limits { .. })
        ));
    }
}

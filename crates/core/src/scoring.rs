//! Scoring and session counters
//!
//! A match scores `len * points_per_piece` per group. Cells shared by a
//! horizontal and a vertical group count once for each group.

use crate::matcher::MatchGroup;

/// Points for a set of resolved groups
pub fn match_score(groups: &[MatchGroup], points_per_piece: u32) -> u32 {
    groups
        .iter()
        .map(|g| (g.len() as u32).saturating_mul(points_per_piece))
        .fold(0u32, u32::saturating_add)
}

/// Result of adding points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub delta: u32,
    pub total: u32,
    /// The total crossed the win threshold with this gain
    pub won: bool,
}

/// Per-episode counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    score: u32,
    max_moves: u32,
    moves_remaining: u32,
    /// Total rejected non-matching drops this episode
    failed_moves: u32,
    /// Consecutive rejected drops since the last commit
    failed_streak: u32,
    successful_moves: u32,
    won: bool,
    game_over: bool,
    episode_id: u32,
}

impl Session {
    pub fn new(max_moves: u32) -> Self {
        Self {
            score: 0,
            max_moves,
            moves_remaining: max_moves,
            failed_moves: 0,
            failed_streak: 0,
            successful_moves: 0,
            won: false,
            game_over: false,
            episode_id: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn failed_moves(&self) -> u32 {
        self.failed_moves
    }

    pub fn failed_streak(&self) -> u32 {
        self.failed_streak
    }

    pub fn successful_moves(&self) -> u32 {
        self.successful_moves
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// A swap was committed; spends a move and breaks the failure streak
    pub fn record_commit(&mut self) {
        self.successful_moves += 1;
        self.failed_streak = 0;
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
    }

    /// A drop was rejected for not matching. Returns true if it cost a move.
    pub fn record_failure(&mut self, charge_move: bool) -> bool {
        self.failed_moves += 1;
        self.failed_streak += 1;
        if charge_move && self.moves_remaining > 0 {
            self.moves_remaining -= 1;
            return true;
        }
        false
    }

    /// Add points; `won` is set only on the gain that first reaches `win_score`
    pub fn add_score(&mut self, delta: u32, win_score: u32) -> ScoreResult {
        let before = self.score;
        self.score = self.score.saturating_add(delta);
        let won = !self.won && before < win_score && self.score >= win_score;
        if won {
            self.won = true;
        }
        ScoreResult {
            delta,
            total: self.score,
            won,
        }
    }

    /// Flag game over once moves run out. Returns true only the first time.
    pub fn check_game_over(&mut self) -> bool {
        if self.game_over || self.moves_remaining > 0 {
            return false;
        }
        self.game_over = true;
        true
    }

    /// Fresh counters for the next episode
    pub fn reset(&mut self) {
        let episode_id = self.episode_id.wrapping_add(1);
        *self = Self::new(self.max_moves);
        self.episode_id = episode_id;
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Axis, GridPos, PieceKind};

    fn group(len: usize, axis: Axis) -> MatchGroup {
        MatchGroup {
            positions: (0..len).map(|c| GridPos::new(0, c)).collect(),
            kind: PieceKind::Blue,
            axis,
        }
    }

    #[test]
    fn test_match_score() {
        assert_eq!(match_score(&[], 10), 0);
        assert_eq!(match_score(&[group(3, Axis::Horizontal)], 10), 30);
        assert_eq!(match_score(&[group(4, Axis::Vertical)], 10), 40);
        assert_eq!(
            match_score(&[group(3, Axis::Horizontal), group(3, Axis::Vertical)], 10),
            60
        );
        assert_eq!(match_score(&[group(5, Axis::Horizontal)], 7), 35);
    }

    #[test]
    fn test_commit_spends_move_and_breaks_streak() {
        let mut s = Session::new(25);
        s.record_failure(false);
        s.record_failure(false);
        assert_eq!(s.failed_streak(), 2);
        s.record_commit();
        assert_eq!(s.moves_remaining(), 24);
        assert_eq!(s.successful_moves(), 1);
        assert_eq!(s.failed_streak(), 0);
        assert_eq!(s.failed_moves(), 2);
    }

    #[test]
    fn test_failures_only_cost_moves_when_charged() {
        let mut s = Session::new(2);
        assert!(!s.record_failure(false));
        assert_eq!(s.moves_remaining(), 2);
        assert!(s.record_failure(true));
        assert!(s.record_failure(true));
        assert!(!s.record_failure(true));
        assert_eq!(s.moves_remaining(), 0);
        assert_eq!(s.failed_moves(), 4);
    }

    #[test]
    fn test_win_fires_once() {
        let mut s = Session::new(25);
        s.set_score(490);
        let r = s.add_score(10, 500);
        assert!(r.won);
        assert_eq!(r.total, 500);
        assert!(!s.add_score(30, 500).won);
        assert!(s.won());
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut s = Session::new(1);
        assert!(!s.check_game_over());
        s.record_commit();
        assert!(s.check_game_over());
        assert!(!s.check_game_over());
        assert!(s.game_over());
    }

    #[test]
    fn test_reset_bumps_episode() {
        let mut s = Session::new(5);
        s.record_commit();
        s.add_score(40, 500);
        s.reset();
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.score(), 0);
        assert_eq!(s.moves_remaining(), 5);
        assert_eq!(s.successful_moves(), 0);
    }
}

//! Hint advisor
//!
//! Highlights a near-match after the player fails repeatedly: every occupied
//! cell contributes its maximal same-kind run to the right and downwards, runs
//! of at least `min_run` qualify, and one is picked at random.

use crate::rng::SimpleRng;
use crate::types::{GridPos, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintAdvisor {
    min_run: usize,
    duration_ms: u32,
    /// Cells currently highlighted
    shown: Option<Vec<GridPos>>,
}

impl HintAdvisor {
    pub fn new(min_run: usize, duration_ms: u32) -> Self {
        Self {
            min_run,
            duration_ms,
            shown: None,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn shown(&self) -> Option<&[GridPos]> {
        self.shown.as_deref()
    }

    /// Every qualifying run on the board
    pub fn candidates<F>(&self, rows: usize, columns: usize, lookup: F) -> Vec<Vec<GridPos>>
    where
        F: Fn(GridPos) -> Option<PieceKind>,
    {
        let mut runs = Vec::new();
        for row in 0..rows {
            for col in 0..columns {
                let start = GridPos::new(row, col);
                let Some(kind) = lookup(start) else {
                    continue;
                };
                for (d_row, d_col) in [(0isize, 1isize), (1, 0)] {
                    let mut run = vec![start];
                    let mut cur = start;
                    while let Some(next) = cur.offset(d_row, d_col) {
                        if next.row >= rows || next.col >= columns || lookup(next) != Some(kind) {
                            break;
                        }
                        run.push(next);
                        cur = next;
                    }
                    if run.len() >= self.min_run {
                        runs.push(run);
                    }
                }
            }
        }
        runs
    }

    /// Pick a run and mark it shown. None when nothing qualifies, which also
    /// drops any hint still up.
    pub fn advise<F>(
        &mut self,
        rows: usize,
        columns: usize,
        lookup: F,
        rng: &mut SimpleRng,
    ) -> Option<Vec<GridPos>>
    where
        F: Fn(GridPos) -> Option<PieceKind>,
    {
        let runs = self.candidates(rows, columns, lookup);
        self.shown = rng.choose(&runs).cloned();
        self.shown.clone()
    }

    /// Forget the shown hint. Returns true if one was up.
    pub fn clear(&mut self) -> bool {
        self.shown.take().is_some()
    }
}

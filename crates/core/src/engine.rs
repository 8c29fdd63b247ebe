//! Engine module - owns the board and routes intents
//!
//! The engine ties together grid, supply, pieces, the interaction machine, the
//! session counters and the hint advisor. Presentation code feeds it typed
//! [`Intent`]s through [`Engine::dispatch`] and drains the notifications it
//! queued with [`Engine::drain_events`].
//!
//! All mutation is synchronous. After a committed swap the machine sits in
//! `matching` until the presenter reports [`Intent::MatchesCompleted`]; drag
//! starts are refused in the meantime.

use std::collections::VecDeque;

use tracing::{debug, info, instrument, warn};

use crate::cascade;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::events::GameEvent;
use crate::grid::Grid;
use crate::hint::HintAdvisor;
use crate::layout::Layout;
use crate::machine::{InteractionState, Machine, MachineInput};
use crate::matcher::{self, MatchOutcome};
use crate::piece::{Piece, PieceStore};
use crate::rng::KindPicker;
use crate::scoring::{self, Session};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::supply::Supply;
use crate::transform::BoardTransform;
use crate::types::{GridPos, Intent, Location, PieceId, PieceKind, Point};
use crate::validator::{self, DropVerdict};

#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    grid: Grid,
    supply: Supply,
    pieces: PieceStore,
    picker: KindPicker,
    machine: Machine,
    session: Session,
    hints: HintAdvisor,
    /// Preset replayed on every reset
    layout: Option<Layout>,
    outbox: VecDeque<GameEvent>,
}

impl Engine {
    /// Validate the configuration and deal a random board
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self::build(config, None);
        engine.deal();
        Ok(engine)
    }

    /// Validate the configuration and start from a preset layout
    pub fn with_layout(config: GameConfig, layout: Layout) -> Result<Self, ConfigError> {
        config.validate()?;
        layout.check(&config)?;
        let mut engine = Self::build(config, Some(layout));
        engine.deal();
        Ok(engine)
    }

    fn build(config: GameConfig, layout: Option<Layout>) -> Self {
        Self {
            grid: Grid::new(config.rows, config.columns, config.tile_size),
            supply: Supply::new(config.supply_slots, config.tile_size),
            pieces: PieceStore::new(),
            picker: KindPicker::new(config.mode, config.seed),
            machine: Machine::new(),
            session: Session::new(config.max_moves),
            hints: HintAdvisor::new(config.hint_min_run, config.hint_duration_ms),
            layout,
            outbox: VecDeque::new(),
            config,
        }
    }

    /// Fill board and supply, from the layout if there is one
    fn deal(&mut self) {
        let layout = self.layout.take();
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.columns() {
                let kind = match &layout {
                    Some(layout) => layout.cell(row, col),
                    None => Some(self.picker.draw()),
                };
                if let Some(kind) = kind {
                    self.place_on_board(kind, GridPos::new(row, col));
                }
            }
        }
        for slot in 0..self.supply.len() {
            let kind = match &layout {
                Some(layout) => layout.supply().get(slot).copied().flatten(),
                None => Some(self.picker.draw()),
            };
            if let Some(kind) = kind {
                self.place_in_supply(kind, slot);
            }
        }
        self.layout = layout;
    }

    fn place_on_board(&mut self, kind: PieceKind, pos: GridPos) {
        let id = self.pieces.spawn(kind, Location::OnBoard(pos), Point::default());
        if let Err(err) = self.grid.place(id, pos) {
            warn!(%err, "deal could not place piece");
            self.pieces.release(id);
        }
    }

    fn place_in_supply(&mut self, kind: PieceKind, slot: usize) {
        let origin = self.supply.slot_point(slot);
        let id = self.pieces.spawn(kind, Location::InSupply(slot), origin);
        self.supply.set(slot, id);
    }

    /// Route one intent. Returns true if the engine acted on it.
    #[instrument(level = "debug", skip(self), fields(episode = self.session.episode_id()))]
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::DragStart { piece } => self.drag_start(piece),
            Intent::DragEnd { piece, position } => self.drag_end(piece, position),
            Intent::HoverStart { piece } => {
                if !self.in_supply(piece) {
                    debug!(piece = piece.0, "hover on a piece that is not in the supply");
                    return false;
                }
                self.machine.send(MachineInput::HoverStart(piece)).is_some()
            }
            Intent::HoverEnd { piece } => {
                if let Some(hovered) = self.machine.hovered() {
                    if hovered != piece {
                        debug!(hovered = hovered.0, piece = piece.0, "hover-end for another piece");
                    }
                }
                self.machine.send(MachineInput::HoverEnd).is_some()
            }
            Intent::MatchesCompleted => self.machine.send(MachineInput::MatchesCompleted).is_some(),
            Intent::Reset => {
                self.reset();
                true
            }
        }
    }

    fn drag_start(&mut self, piece: PieceId) -> bool {
        if self.session.game_over() {
            debug!(piece = piece.0, "drag refused after game over");
            return false;
        }
        if !self.in_supply(piece) {
            warn!(piece = piece.0, "drag-start for a piece that is not in the supply");
            return false;
        }
        if self.machine.send(MachineInput::DragStart(piece)).is_none() {
            return false;
        }
        if self.hints.clear() {
            self.outbox.push_back(GameEvent::HintCleared);
        }
        true
    }

    /// Only supply pieces are interactive
    fn in_supply(&self, piece: PieceId) -> bool {
        self.pieces.contains(piece) && self.supply.slot_of(piece).is_some()
    }

    fn drag_end(&mut self, piece: PieceId, position: Point) -> bool {
        let dragged = self.machine.dragged();
        let Some(transition) = self.machine.send(MachineInput::DragEnd) else {
            return false;
        };
        if !transition.is(InteractionState::Dragging, InteractionState::Idle) {
            return false;
        }
        let Some(dragged) = dragged else {
            warn!("drag ended with no dragged piece recorded");
            return false;
        };
        if dragged != piece {
            warn!(dragged = dragged.0, piece = piece.0, "drag-end names another piece");
        }
        self.resolve_drop(dragged, position);
        true
    }

    #[instrument(level = "debug", skip(self))]
    fn resolve_drop(&mut self, piece: PieceId, position: Point) {
        let verdict = validator::check_drop(
            &self.grid,
            &self.pieces,
            piece,
            position,
            self.config.min_match_count,
        );

        match verdict {
            DropVerdict::Commit {
                pos,
                target,
                slot,
                outcome,
            } => self.commit(piece, target, pos, slot, outcome),
            DropVerdict::NoMatch { pos, .. } => {
                debug!(row = pos.row, col = pos.col, "swap would not match");
                self.return_piece(piece);
                if self.session.record_failure(self.config.charge_failed_moves) {
                    self.outbox.push_back(GameEvent::MovesChanged {
                        moves_remaining: self.session.moves_remaining(),
                    });
                    self.check_game_over();
                }
                if self.session.failed_streak() % self.config.hint_every == 0 {
                    self.offer_hint();
                }
            }
            DropVerdict::OutOfBounds { row, col } => {
                debug!(row, col, "drop outside the board");
                self.return_piece(piece);
            }
            DropVerdict::EmptyCell(pos) => {
                debug!(row = pos.row, col = pos.col, "drop on an empty cell");
                self.return_piece(piece);
            }
            DropVerdict::Inconsistent(reason) => {
                warn!(piece = piece.0, reason, "inconsistent drop ignored");
                self.return_piece(piece);
            }
        }
    }

    fn return_piece(&mut self, piece: PieceId) {
        if let Some(p) = self.pieces.get(piece) {
            self.outbox.push_back(GameEvent::PieceReturned {
                piece,
                origin: p.origin,
            });
        }
    }

    fn commit(&mut self, piece: PieceId, target: PieceId, pos: GridPos, slot: usize, outcome: MatchOutcome) {
        self.grid.replace(pos, piece);
        self.supply.set(slot, target);
        let origin = self.supply.slot_point(slot);
        if let Some(p) = self.pieces.get_mut(piece) {
            p.location = Location::OnBoard(pos);
        }
        if let Some(t) = self.pieces.get_mut(target) {
            t.location = Location::InSupply(slot);
            t.origin = origin;
        }
        self.outbox.push_back(GameEvent::PieceSwapped {
            placed: piece,
            displaced: target,
            pos,
            slot,
            origin,
        });

        self.session.record_commit();
        self.outbox.push_back(GameEvent::MovesChanged {
            moves_remaining: self.session.moves_remaining(),
        });

        // Detect again on the real board; it agrees with the hypothetical run.
        let real = match self.pieces.kind(piece) {
            Some(kind) => {
                let grid = &self.grid;
                let pieces = &self.pieces;
                matcher::detect(
                    grid.rows(),
                    grid.columns(),
                    pos,
                    kind,
                    self.config.min_match_count,
                    |p| grid.get(p).and_then(|id| pieces.kind(id)),
                )
            }
            None => outcome,
        };
        info!(
            row = pos.row,
            col = pos.col,
            groups = real.groups.len(),
            cells = real.positions.len(),
            "swap committed"
        );

        self.machine.send(MachineInput::ProcessMatches(real.groups.clone()));
        self.outbox.push_back(GameEvent::MatchResolved {
            groups: real.groups.clone(),
        });

        let report = cascade::resolve(&mut self.grid, &mut self.pieces, &mut self.picker, &real.positions);
        for r in report.removed {
            self.outbox.push_back(GameEvent::PieceRemoved {
                piece: r.piece,
                kind: r.kind,
                pos: r.pos,
            });
        }
        for f in report.moved {
            self.outbox.push_back(GameEvent::PieceMoved {
                piece: f.piece,
                from: f.from,
                to: f.to,
            });
        }
        for s in report.spawned {
            self.outbox.push_back(GameEvent::PieceSpawned {
                piece: s.piece,
                kind: s.kind,
                pos: s.pos,
                stagger: s.stagger,
            });
        }

        let delta = scoring::match_score(&real.groups, self.config.points_per_piece);
        let result = self.session.add_score(delta, self.config.win_score);
        self.outbox.push_back(GameEvent::ScoreChanged {
            score: result.total,
            delta,
        });
        if result.won {
            info!(score = result.total, "game won");
            self.outbox.push_back(GameEvent::GameWon { score: result.total });
        }
        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        if self.session.check_game_over() {
            info!(score = self.session.score(), "game over");
            self.outbox.push_back(GameEvent::GameOver {
                score: self.session.score(),
            });
        }
    }

    fn offer_hint(&mut self) {
        let grid = &self.grid;
        let pieces = &self.pieces;
        let hint = self.hints.advise(
            grid.rows(),
            grid.columns(),
            |p| grid.get(p).and_then(|id| pieces.kind(id)),
            self.picker.rng_mut(),
        );
        match hint {
            Some(positions) => {
                debug!(cells = positions.len(), "hint shown");
                self.outbox.push_back(GameEvent::HintShown {
                    positions,
                    duration_ms: self.hints.duration_ms(),
                });
            }
            None => debug!("no hint available"),
        }
    }

    /// Start a new episode with the same configuration
    pub fn reset(&mut self) {
        self.grid.clear();
        self.supply.clear();
        self.pieces.clear();
        self.machine.reset();
        self.hints.clear();
        self.session.reset();
        self.outbox.clear();
        self.deal();
        info!(episode = self.session.episode_id(), "board reset");
        self.outbox.push_back(GameEvent::BoardReset {
            episode_id: self.session.episode_id(),
        });
    }

    /// Take every queued notification in emission order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.outbox.drain(..).collect()
    }

    /// False while a resolved match awaits `MatchesCompleted`
    pub fn is_ready(&self) -> bool {
        self.machine.state() != InteractionState::Matching
    }

    pub fn set_board_transform(&mut self, transform: BoardTransform) {
        self.grid.set_transform(transform);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    pub fn pieces(&self) -> &PieceStore {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub fn kind_at(&self, pos: GridPos) -> Option<PieceKind> {
        self.grid.get(pos).and_then(|id| self.pieces.kind(id))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> InteractionState {
        self.machine.state()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn moves_remaining(&self) -> u32 {
        self.session.moves_remaining()
    }

    pub fn failed_moves(&self) -> u32 {
        self.session.failed_moves()
    }

    pub fn game_over(&self) -> bool {
        self.session.game_over()
    }

    pub fn won(&self) -> bool {
        self.session.won()
    }

    pub fn episode_id(&self) -> u32 {
        self.session.episode_id()
    }

    pub fn hint(&self) -> Option<&[GridPos]> {
        self.hints.shown()
    }

    /// Point inside a cell, in the board's parent space
    pub fn cell_center(&self, pos: GridPos) -> Point {
        let corner = self.grid.cell_position(pos.row, pos.col);
        let inset = self.grid.cell_size() * 0.25;
        self.grid
            .transform()
            .to_external(Point::new(corner.x + inset, corner.y + inset))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let snap = |id: PieceId| {
            self.pieces.get(id).map(|p| PieceSnapshot {
                id: p.id,
                kind: p.kind,
                location: p.location,
                origin: p.origin,
            })
        };
        GameSnapshot {
            rows: self.grid.rows(),
            columns: self.grid.columns(),
            tile_size: self.grid.cell_size(),
            board: self.grid.slots().iter().map(|s| s.and_then(snap)).collect(),
            supply: self.supply.iter().map(|s| s.and_then(snap)).collect(),
            state: self.machine.state(),
            score: self.session.score(),
            moves_remaining: self.session.moves_remaining(),
            failed_moves: self.session.failed_moves(),
            failed_streak: self.session.failed_streak(),
            successful_moves: self.session.successful_moves(),
            won: self.session.won(),
            game_over: self.session.game_over(),
            episode_id: self.session.episode_id(),
            seed: self.config.seed,
            hint: self.hints.shown().map(<[GridPos]>::to_vec),
        }
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::CascadePhase;

    /// Checkerboard of green/pink with a blue pair at (3,0),(3,1).
    /// Supply holds blue, green, pink.
    const BOARD: [&str; 6] = ["gpgpgp", "pgpgpg", "gpgpgp", "bbpgpg", "gpgpgp", "pgpgpg"];

    fn engine_with(config: GameConfig) -> Engine {
        let layout = Layout::parse(&BOARD, "bgp").unwrap();
        Engine::with_layout(config.with_size(6, 6), layout).unwrap()
    }

    fn engine() -> Engine {
        engine_with(GameConfig::default())
    }

    fn drop_at(engine: &mut Engine, slot: usize, pos: GridPos) -> bool {
        let piece = engine.supply().get(slot).unwrap();
        let point = engine.cell_center(pos);
        assert!(engine.dispatch(Intent::DragStart { piece }));
        engine.dispatch(Intent::DragEnd {
            piece,
            position: point,
        })
    }

    fn count(events: &[GameEvent], name: &str) -> usize {
        events.iter().filter(|e| e.name() == name).count()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = Engine::new(GameConfig::default().with_size(4, 8)).unwrap_err();
        assert!(matches!(err, ConfigError::Rows { got: 4, .. }));
    }

    #[test]
    fn test_random_deal_fills_board_and_supply() {
        let engine = Engine::new(GameConfig::default()).unwrap();
        assert_eq!(engine.grid().occupied_count(), 64);
        assert!(engine.supply().iter().all(|s| s.is_some()));
        assert_eq!(engine.pieces().live_count(), 67);
        assert_eq!(engine.state(), InteractionState::Idle);
        assert!(engine.is_ready());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = Engine::new(GameConfig::default().with_seed(42)).unwrap();
        let b = Engine::new(GameConfig::default().with_seed(42)).unwrap();
        assert_eq!(a.snapshot().board_letters(), b.snapshot().board_letters());
        assert_eq!(a.snapshot().supply_letters(), b.snapshot().supply_letters());
    }

    #[test]
    fn test_committed_swap() {
        let mut engine = engine();
        let dragged = engine.supply().get(0).unwrap();
        let displaced = engine.grid().get(GridPos::new(3, 2)).unwrap();

        assert!(drop_at(&mut engine, 0, GridPos::new(3, 2)));
        let events = engine.drain_events();

        assert_eq!(
            events[0],
            GameEvent::PieceSwapped {
                placed: dragged,
                displaced,
                pos: GridPos::new(3, 2),
                slot: 0,
                origin: Point::new(0.0, 0.0),
            }
        );
        assert_eq!(events[1], GameEvent::MovesChanged { moves_remaining: 24 });
        assert_eq!(count(&events, "pieceRemoved"), 3);
        assert_eq!(count(&events, "pieceMoved"), 9);
        assert_eq!(count(&events, "pieceSpawned"), 3);
        assert!(events.contains(&GameEvent::ScoreChanged { score: 30, delta: 30 }));

        assert_eq!(engine.score(), 30);
        assert_eq!(engine.moves_remaining(), 24);
        assert_eq!(engine.failed_moves(), 0);
        assert_eq!(engine.state(), InteractionState::Matching);
        assert!(!engine.is_ready());

        // Displaced pink now waits in slot 0; the board stays full.
        assert_eq!(engine.supply().get(0), Some(displaced));
        assert_eq!(
            engine.piece(displaced).map(|p| p.location),
            Some(Location::InSupply(0))
        );
        assert!(!engine.pieces().contains(dragged));
        assert_eq!(engine.grid().occupied_count(), 36);
        assert_eq!(engine.pieces().live_count(), 39);
    }

    #[test]
    fn test_cascade_events_are_phase_ordered() {
        let mut engine = engine();
        drop_at(&mut engine, 0, GridPos::new(3, 2));
        let phases: Vec<CascadePhase> = engine.drain_events().iter().filter_map(GameEvent::phase).collect();
        assert!(!phases.is_empty());
        assert!(phases.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_matching_blocks_drag_until_completed() {
        let mut engine = engine();
        drop_at(&mut engine, 0, GridPos::new(3, 2));
        let piece = engine.supply().get(1).unwrap();
        assert!(!engine.dispatch(Intent::DragStart { piece }));
        assert!(engine.dispatch(Intent::MatchesCompleted));
        assert!(engine.is_ready());
        assert!(engine.dispatch(Intent::DragStart { piece }));
    }

    #[test]
    fn test_failed_drop_returns_piece() {
        let mut engine = engine();
        let piece = engine.supply().get(0).unwrap();
        assert!(drop_at(&mut engine, 0, GridPos::new(0, 0)));
        let events = engine.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::PieceReturned {
                piece,
                origin: Point::new(0.0, 0.0)
            }]
        );
        assert_eq!(engine.failed_moves(), 1);
        assert_eq!(engine.moves_remaining(), 25);
        assert_eq!(engine.state(), InteractionState::Idle);
        assert_eq!(engine.snapshot().board_letters()[0], "gpgpgp");
    }

    #[test]
    fn test_out_of_bounds_and_empty_cell_cost_nothing() {
        let mut engine = engine();
        let piece = engine.supply().get(2).unwrap();
        engine.dispatch(Intent::DragStart { piece });
        engine.dispatch(Intent::DragEnd {
            piece,
            position: Point::new(-500.0, 0.0),
        });
        assert_eq!(engine.failed_moves(), 0);
        assert_eq!(engine.moves_remaining(), 25);
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::PieceReturned {
                piece,
                origin: Point::new(256.0, 0.0)
            }]
        );
    }

    #[test]
    fn test_empty_cell_drop_is_rejected() {
        let mut board = BOARD;
        board[0] = "gpg.gp";
        let layout = Layout::parse(&board, "bgp").unwrap();
        let mut engine = Engine::with_layout(GameConfig::default().with_size(6, 6), layout).unwrap();
        drop_at(&mut engine, 0, GridPos::new(0, 3));
        assert_eq!(engine.failed_moves(), 0);
        assert_eq!(engine.kind_at(GridPos::new(0, 3)), None);
        assert!(matches!(
            engine.drain_events().as_slice(),
            [GameEvent::PieceReturned { .. }]
        ));
    }

    #[test]
    fn test_hint_after_second_failure_and_cleared_on_drag() {
        let mut engine = engine();
        drop_at(&mut engine, 0, GridPos::new(0, 0));
        assert_eq!(engine.hint(), None);
        drop_at(&mut engine, 0, GridPos::new(0, 0));
        let events = engine.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::HintShown {
                positions: vec![GridPos::new(3, 0), GridPos::new(3, 1)],
                duration_ms: 1200,
            })
        );
        assert!(engine.hint().is_some());

        let piece = engine.supply().get(1).unwrap();
        engine.dispatch(Intent::DragStart { piece });
        assert_eq!(engine.drain_events(), vec![GameEvent::HintCleared]);
        assert_eq!(engine.hint(), None);
    }

    #[test]
    fn test_charged_failures_can_end_the_game() {
        let mut engine = engine_with(GameConfig::default().with_charge_failed_moves(true).with_max_moves(1));
        drop_at(&mut engine, 0, GridPos::new(0, 0));
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::MovesChanged { moves_remaining: 0 }));
        assert_eq!(count(&events, "gameOver"), 1);
        assert!(engine.game_over());
    }

    #[test]
    fn test_game_over_refuses_drags_until_reset() {
        let mut engine = engine_with(GameConfig::default().with_max_moves(1));
        drop_at(&mut engine, 0, GridPos::new(3, 2));
        let events = engine.drain_events();
        assert_eq!(count(&events, "gameOver"), 1);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { score: 30 })));

        engine.dispatch(Intent::MatchesCompleted);
        let piece = engine.supply().get(1).unwrap();
        assert!(!engine.dispatch(Intent::DragStart { piece }));

        assert!(engine.dispatch(Intent::Reset));
        assert_eq!(engine.drain_events(), vec![GameEvent::BoardReset { episode_id: 1 }]);
        assert!(!engine.game_over());
        assert_eq!(engine.moves_remaining(), 1);
        assert_eq!(engine.snapshot().board_letters(), BOARD.to_vec());
        let piece = engine.supply().get(1).unwrap();
        assert!(engine.dispatch(Intent::DragStart { piece }));
    }

    #[test]
    fn test_win_crossing_emits_once() {
        let mut engine = engine();
        engine.session_mut().set_score(490);
        drop_at(&mut engine, 0, GridPos::new(3, 2));
        let events = engine.drain_events();
        assert_eq!(count(&events, "gameWon"), 1);
        assert!(events.contains(&GameEvent::GameWon { score: 520 }));
        assert!(engine.won());
    }

    #[test]
    fn test_drag_start_on_board_piece_is_refused() {
        let mut engine = engine();
        let on_board = engine.grid().get(GridPos::new(0, 0)).unwrap();
        assert!(!engine.dispatch(Intent::DragStart { piece: on_board }));
        assert_eq!(engine.state(), InteractionState::Idle);
    }

    #[test]
    fn test_hover_cycle() {
        let mut engine = engine();
        let piece = engine.supply().get(0).unwrap();
        assert!(engine.dispatch(Intent::HoverStart { piece }));
        assert_eq!(engine.state(), InteractionState::Hovering);
        assert!(engine.dispatch(Intent::HoverEnd { piece }));
        assert_eq!(engine.state(), InteractionState::Idle);
        assert!(!engine.dispatch(Intent::HoverStart { piece: PieceId(9999) }));
    }

    #[test]
    fn test_hover_on_board_piece_is_refused() {
        let mut engine = engine();
        let on_board = engine.grid().get(GridPos::new(2, 2)).unwrap();
        assert!(!engine.dispatch(Intent::HoverStart { piece: on_board }));
        assert_eq!(engine.state(), InteractionState::Idle);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_drag_end_without_drag_is_a_no_op() {
        let mut engine = engine();
        let before = engine.snapshot();
        let piece = engine.supply().get(0).unwrap();
        let position = engine.cell_center(GridPos::new(3, 2));

        assert!(!engine.dispatch(Intent::DragEnd { piece, position }));

        assert!(engine.drain_events().is_empty());
        assert_eq!(engine.state(), InteractionState::Idle);
        let after = engine.snapshot();
        assert_eq!(after.board_letters(), before.board_letters());
        assert_eq!(after.supply_letters(), before.supply_letters());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.moves_remaining(), 25);
        assert_eq!(engine.failed_moves(), 0);
    }

    #[test]
    fn test_drag_end_naming_another_piece_resolves_dragged() {
        let mut engine = engine();
        let dragged = engine.supply().get(0).unwrap();
        let other = engine.supply().get(1).unwrap();
        let position = engine.cell_center(GridPos::new(3, 2));

        assert!(engine.dispatch(Intent::DragStart { piece: dragged }));
        assert!(engine.dispatch(Intent::DragEnd {
            piece: other,
            position,
        }));

        // The blue piece being dragged made the match; green stays in slot 1.
        assert_eq!(engine.score(), 30);
        assert!(!engine.pieces().contains(dragged));
        assert_eq!(engine.supply().get(1), Some(other));
        assert_eq!(
            engine.piece(other).map(|p| p.location),
            Some(Location::InSupply(1))
        );
    }

    #[test]
    fn test_board_transform_is_honoured() {
        let mut engine = engine();
        engine.set_board_transform(BoardTransform::translate(300.0, 200.0));
        let piece = engine.supply().get(0).unwrap();
        engine.dispatch(Intent::DragStart { piece });
        engine.dispatch(Intent::DragEnd {
            piece,
            position: Point::new(300.0 + 256.0, 200.0 + 384.0),
        });
        assert_eq!(engine.score(), 30);
    }
}

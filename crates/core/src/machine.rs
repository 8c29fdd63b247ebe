//! Interaction state machine
//!
//! Tracks what the pointer is doing to the supply pieces:
//!
//! ```text
//!            hover-start             drag-start
//!   idle ───────────────▶ hovering ─────────────▶ dragging
//!    ▲ ◀─────────────────    │                       │
//!    │       hover-end       └───────────────────────┤
//!    │                                               │ drag-end
//!    │◀──────────────────────────────────────────────┘
//!    │  drag-start (from idle) ──▶ dragging
//!    │
//!    │ process-matches            matches-completed
//!    └───────────────▶ matching ─────────────────────▶ idle
//! ```
//!
//! Any other (state, input) pair is ignored and leaves the context untouched.

use tracing::debug;

use crate::matcher::MatchGroup;
use crate::types::PieceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
    Hovering,
    Matching,
}

impl InteractionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Dragging => "dragging",
            InteractionState::Hovering => "hovering",
            InteractionState::Matching => "matching",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MachineInput {
    DragStart(PieceId),
    DragEnd,
    HoverStart(PieceId),
    HoverEnd,
    ProcessMatches(Vec<MatchGroup>),
    MatchesCompleted,
}

impl MachineInput {
    fn name(&self) -> &'static str {
        match self {
            MachineInput::DragStart(_) => "drag-start",
            MachineInput::DragEnd => "drag-end",
            MachineInput::HoverStart(_) => "hover-start",
            MachineInput::HoverEnd => "hover-end",
            MachineInput::ProcessMatches(_) => "process-matches",
            MachineInput::MatchesCompleted => "matches-completed",
        }
    }
}

/// An edge taken by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: InteractionState,
    pub to: InteractionState,
}

impl Transition {
    pub fn is(&self, from: InteractionState, to: InteractionState) -> bool {
        self.from == from && self.to == to
    }
}

#[derive(Debug, Clone, Default)]
pub struct Machine {
    state: InteractionState,
    dragged: Option<PieceId>,
    hovered: Option<PieceId>,
    pending: Vec<MatchGroup>,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn dragged(&self) -> Option<PieceId> {
        self.dragged
    }

    pub fn hovered(&self) -> Option<PieceId> {
        self.hovered
    }

    pub fn pending(&self) -> &[MatchGroup] {
        &self.pending
    }

    /// Feed one input. Returns the edge taken, or None if the input was ignored.
    pub fn send(&mut self, input: MachineInput) -> Option<Transition> {
        use InteractionState::*;

        let from = self.state;
        let to = match (from, input) {
            (Idle, MachineInput::DragStart(piece)) => {
                self.dragged = Some(piece);
                Dragging
            }
            (Hovering, MachineInput::DragStart(piece)) => {
                self.hovered = None;
                self.dragged = Some(piece);
                Dragging
            }
            (Dragging, MachineInput::DragEnd) => {
                self.dragged = None;
                Idle
            }
            (Idle, MachineInput::HoverStart(piece)) => {
                self.hovered = Some(piece);
                Hovering
            }
            (Hovering, MachineInput::HoverEnd) => {
                self.hovered = None;
                Idle
            }
            (Idle, MachineInput::ProcessMatches(groups)) => {
                self.pending = groups;
                Matching
            }
            (Matching, MachineInput::MatchesCompleted) => {
                self.pending.clear();
                Idle
            }
            (state, input) => {
                debug!(state = state.as_str(), input = input.name(), "ignored machine input");
                return None;
            }
        };

        self.state = to;
        Some(Transition { from, to })
    }

    /// Back to idle with an empty context
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the drop-to-match puzzle. It has no UI,
//! networking or I/O, so the same engine runs behind a TCP adapter, inside a
//! renderer or headless in tests.
//!
//! - **Deterministic**: the same seed deals the same board and refills
//! - **Synchronous**: one intent in, a batch of ordered notifications out
//!
//! # Module Structure
//!
//! - [`grid`]: rows x columns board with coordinate conversion
//! - [`supply`]: the staging row pieces are dragged from
//! - [`piece`]: live pieces and the arena that owns them
//! - [`machine`]: idle / hovering / dragging / matching state machine
//! - [`validator`]: judges a drop before anything changes
//! - [`matcher`]: horizontal and vertical run detection from a seed cell
//! - [`cascade`]: destroy, gravity, refill
//! - [`scoring`]: points and session counters
//! - [`hint`]: near-match hints after repeated failures
//! - [`engine`]: the dispatcher that owns all of the above
//!
//! # Game Rules
//!
//! - Dropping a supply piece onto an occupied cell swaps the two pieces, but
//!   only if the dropped kind completes a run of at least three at that cell
//! - Matched pieces are removed, pieces above fall, and the gaps at the top
//!   are refilled from the mode's palette
//! - Each group scores its length times ten; a commit costs one move
//! - 500 points wins, running out of moves ends the game
//!
//! # Example
//!
//! ```
//! use match_drop_core::{Engine, GameConfig, GameEvent, Layout};
//! use match_drop_core::types::{GridPos, Intent};
//!
//! let layout = Layout::parse(
//!     &["gpgpgp", "pgpgpg", "gpgpgp", "bbpgpg", "gpgpgp", "pgpgpg"],
//!     "bgp",
//! )
//! .unwrap();
//! let config = GameConfig::default().with_size(6, 6);
//! let mut engine = Engine::with_layout(config, layout).unwrap();
//!
//! let piece = engine.supply().get(0).unwrap();
//! let position = engine.cell_center(GridPos::new(3, 2));
//! engine.dispatch(Intent::DragStart { piece });
//! engine.dispatch(Intent::DragEnd { piece, position });
//!
//! assert_eq!(engine.score(), 30);
//! assert!(engine
//!     .drain_events()
//!     .iter()
//!     .any(|e| matches!(e, GameEvent::MatchResolved { .. })));
//!
//! engine.dispatch(Intent::MatchesCompleted);
//! assert!(engine.is_ready());
//! ```

pub mod cascade;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod hint;
pub mod layout;
pub mod machine;
pub mod matcher;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod supply;
pub mod transform;
pub mod validator;

pub use match_drop_types as types;

// Re-export commonly used types for convenience
pub use cascade::{CascadePhase, CascadeReport};
pub use config::{BoardLimits, GameConfig};
pub use engine::Engine;
pub use error::{ConfigError, GridError, LayoutError};
pub use events::GameEvent;
pub use grid::Grid;
pub use hint::HintAdvisor;
pub use layout::Layout;
pub use machine::{InteractionState, Machine, MachineInput, Transition};
pub use matcher::{detect, MatchGroup, MatchOutcome};
pub use piece::{Piece, PieceStore};
pub use rng::{KindPicker, SimpleRng};
pub use scoring::{match_score, ScoreResult, Session};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use supply::Supply;
pub use transform::BoardTransform;
pub use validator::{check_drop, DropVerdict};

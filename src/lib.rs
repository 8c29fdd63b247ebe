//! Match Drop (workspace facade crate).
//!
//! Re-exports `match_drop::{adapter,core,types}` so binaries, integration tests
//! and benches depend on one package while the implementation lives in
//! dedicated crates under `crates/`.

pub use match_drop_adapter as adapter;
pub use match_drop_core as core;
pub use match_drop_types as types;

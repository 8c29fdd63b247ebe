//! Adapter - drive the engine over a TCP socket with a JSON protocol
//!
//! A presentation layer (or a test harness, or a bot) connects over TCP,
//! submits intents and receives the engine's notifications as they happen.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Controller Assignment**: First client to hello becomes the controller
//! 4. **Intents**: The controller sends `intent` messages; each is acked
//! 5. **Streaming**: Clients that asked for `stream_events` receive one
//!    `event` per notification followed by an `observation`
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **hello**: handshake with client info and protocol version (major `1`)
//! - **intent**: `dragStart`, `dragEnd`, `hoverStart`, `hoverEnd`,
//!   `matchesCompleted` or `reset`, tagged by `kind`
//! - **snapshot**: request a full observation
//!
//! ## Server → Client
//!
//! - **welcome**: role assignment and supported intents
//! - **ack**: intent applied; `accepted` says whether the engine acted on it
//! - **error**: `handshake_required`, `protocol_mismatch`, `not_controller`,
//!   `invalid_command` or `backpressure`
//! - **event**: one engine notification
//! - **observation**: full game state
//!
//! # Environment Variables
//!
//! - `MATCH_DROP_HOST`: Bind address (default: "127.0.0.1")
//! - `MATCH_DROP_PORT`: Port number (default: 7878)
//! - `MATCH_DROP_MAX_PENDING`: Intent queue depth before `backpressure` (default: 16)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"client":{"name":"ui","version":"0.1.0"},"protocol_version":"1.0.0","stream_events":true}
//! Server -> Client: {"type":"welcome","seq":1,"ts":1700000000000,"protocol_version":"1.0.0","client_id":1,"role":"controller",...}
//! Server -> Client: {"type":"observation","seq":1,...}
//! Client -> Server: {"type":"intent","seq":2,"intent":{"kind":"dragStart","piece":65}}
//! Server -> Client: {"type":"ack","seq":2,"ts":1700000000001,"status":"ok","accepted":true}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"hello","seq":1,"client":{"name":"nc","version":"1"},"protocol_version":"1.0.0","stream_events":true}
//! ```

pub mod bridge;
pub mod protocol;
pub mod runtime;
pub mod server;

pub use match_drop_core as core;
pub use match_drop_types as types;

// Re-export protocol types for convenience
pub use bridge::EngineBridge;
pub use protocol::*;
pub use runtime::{Adapter, InboundCommand, InboundPayload, OutboundMessage};
pub use server::*;

//! Protocol module - JSON message types for the adapter
//!
//! Line-delimited JSON. Every message carries `type`, `seq` and `ts`
//! (milliseconds since the Unix epoch). Intents and events are tagged by `kind`
//! and use camelCase names.

use serde::{Deserialize, Serialize};

use crate::core::{GameEvent, GameSnapshot, MatchGroup};
use crate::types::{Axis, GridPos, Intent, PieceId, PieceKind, Point};

/// Major protocol version accepted from clients
pub const PROTOCOL_MAJOR: &str = "1";

/// Protocol version announced in `welcome`
pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// Client hello message (first message to establish connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    /// Receive `event` and `observation` broadcasts
    #[serde(default)]
    pub stream_events: bool,
}

/// An intent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WireIntent {
    DragStart { piece: u32 },
    DragEnd { piece: u32, x: f64, y: f64 },
    HoverStart { piece: u32 },
    HoverEnd { piece: u32 },
    MatchesCompleted,
    Reset,
}

impl From<WireIntent> for Intent {
    fn from(value: WireIntent) -> Self {
        match value {
            WireIntent::DragStart { piece } => Intent::DragStart { piece: PieceId(piece) },
            WireIntent::DragEnd { piece, x, y } => Intent::DragEnd {
                piece: PieceId(piece),
                position: Point::new(x, y),
            },
            WireIntent::HoverStart { piece } => Intent::HoverStart { piece: PieceId(piece) },
            WireIntent::HoverEnd { piece } => Intent::HoverEnd { piece: PieceId(piece) },
            WireIntent::MatchesCompleted => Intent::MatchesCompleted,
            WireIntent::Reset => Intent::Reset,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub intent: WireIntent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRequest {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "event")]
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HandshakeRequired,
    ProtocolMismatch,
    NotController,
    InvalidCommand,
    Backpressure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignedRole {
    Controller,
    Observer,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub role: AssignedRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<u64>,
    pub game_id: String,
    /// Intent kinds the server understands
    pub intents: Vec<String>,
}

/// Acknowledgment; `accepted` is false when the engine ignored the intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
    pub accepted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WirePos {
    pub row: usize,
    pub col: usize,
}

impl From<GridPos> for WirePos {
    fn from(value: GridPos) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for WirePoint {
    fn from(value: Point) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKindLower {
    Blue,
    Green,
    Pink,
    Yellow,
}

impl From<PieceKind> for PieceKindLower {
    fn from(value: PieceKind) -> Self {
        match value {
            PieceKind::Blue => Self::Blue,
            PieceKind::Green => Self::Green,
            PieceKind::Pink => Self::Pink,
            PieceKind::Yellow => Self::Yellow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireGroup {
    pub kind: PieceKindLower,
    /// "horizontal" or "vertical"
    pub axis: String,
    pub positions: Vec<WirePos>,
}

impl From<&MatchGroup> for WireGroup {
    fn from(value: &MatchGroup) -> Self {
        Self {
            kind: value.kind.into(),
            axis: match value.axis {
                Axis::Horizontal => "horizontal".to_string(),
                Axis::Vertical => "vertical".to_string(),
            },
            positions: value.positions.iter().copied().map(WirePos::from).collect(),
        }
    }
}

/// A notification on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WireEvent {
    #[serde(rename_all = "camelCase")]
    PieceSwapped {
        placed: u32,
        displaced: u32,
        pos: WirePos,
        slot: usize,
        origin: WirePoint,
    },
    PieceReturned { piece: u32, origin: WirePoint },
    MatchResolved { groups: Vec<WireGroup> },
    PieceRemoved {
        piece: u32,
        #[serde(rename = "pieceKind")]
        kind: PieceKindLower,
        pos: WirePos,
    },
    PieceMoved { piece: u32, from: WirePos, to: WirePos },
    PieceSpawned {
        piece: u32,
        #[serde(rename = "pieceKind")]
        kind: PieceKindLower,
        pos: WirePos,
        stagger: usize,
    },
    ScoreChanged { score: u32, delta: u32 },
    #[serde(rename_all = "camelCase")]
    MovesChanged { moves_remaining: u32 },
    GameWon { score: u32 },
    GameOver { score: u32 },
    #[serde(rename_all = "camelCase")]
    HintShown { positions: Vec<WirePos>, duration_ms: u32 },
    HintCleared,
    #[serde(rename_all = "camelCase")]
    BoardReset { episode_id: u32 },
}

impl From<&GameEvent> for WireEvent {
    fn from(value: &GameEvent) -> Self {
        match value {
            GameEvent::PieceSwapped {
                placed,
                displaced,
                pos,
                slot,
                origin,
            } => WireEvent::PieceSwapped {
                placed: placed.0,
                displaced: displaced.0,
                pos: (*pos).into(),
                slot: *slot,
                origin: (*origin).into(),
            },
            GameEvent::PieceReturned { piece, origin } => WireEvent::PieceReturned {
                piece: piece.0,
                origin: (*origin).into(),
            },
            GameEvent::MatchResolved { groups } => WireEvent::MatchResolved {
                groups: groups.iter().map(WireGroup::from).collect(),
            },
            GameEvent::PieceRemoved { piece, kind, pos } => WireEvent::PieceRemoved {
                piece: piece.0,
                kind: (*kind).into(),
                pos: (*pos).into(),
            },
            GameEvent::PieceMoved { piece, from, to } => WireEvent::PieceMoved {
                piece: piece.0,
                from: (*from).into(),
                to: (*to).into(),
            },
            GameEvent::PieceSpawned {
                piece,
                kind,
                pos,
                stagger,
            } => WireEvent::PieceSpawned {
                piece: piece.0,
                kind: (*kind).into(),
                pos: (*pos).into(),
                stagger: *stagger,
            },
            GameEvent::ScoreChanged { score, delta } => WireEvent::ScoreChanged {
                score: *score,
                delta: *delta,
            },
            GameEvent::MovesChanged { moves_remaining } => WireEvent::MovesChanged {
                moves_remaining: *moves_remaining,
            },
            GameEvent::GameWon { score } => WireEvent::GameWon { score: *score },
            GameEvent::GameOver { score } => WireEvent::GameOver { score: *score },
            GameEvent::HintShown {
                positions,
                duration_ms,
            } => WireEvent::HintShown {
                positions: positions.iter().copied().map(WirePos::from).collect(),
                duration_ms: *duration_ms,
            },
            GameEvent::HintCleared => WireEvent::HintCleared,
            GameEvent::BoardReset { episode_id } => WireEvent::BoardReset {
                episode_id: *episode_id,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub msg_type: EventType,
    pub seq: u64,
    pub ts: u64,
    pub event: WireEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePiece {
    pub id: u32,
    pub kind: PieceKindLower,
}

/// Full game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub episode_id: u32,
    pub seed: u32,
    pub rows: usize,
    pub columns: usize,
    pub tile_size: f64,
    /// idle | hovering | dragging | matching
    pub state: String,
    pub playable: bool,
    pub board: Vec<Vec<Option<WirePiece>>>,
    pub supply: Vec<Option<WirePiece>>,
    pub score: u32,
    pub moves_remaining: u32,
    pub failed_moves: u32,
    pub successful_moves: u32,
    pub won: bool,
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<Vec<WirePos>>,
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Intent(IntentMessage),
    Snapshot(SnapshotRequest),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "intent")]
        Intent(IntentMessage),
        #[serde(rename = "snapshot")]
        Snapshot(SnapshotRequest),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Intent(m)) => Ok(ParsedMessage::Intent(m)),
        Ok(InboundMessage::Snapshot(m)) => Ok(ParsedMessage::Snapshot(m)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct Header<'a> {
                #[serde(rename = "type")]
                msg_type: Option<&'a str>,
                seq: Option<u64>,
            }
            let header = serde_json::from_str::<Header>(json)?;
            let known = matches!(header.msg_type, Some("hello" | "intent" | "snapshot"));
            if !known {
                return Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: header.seq.unwrap_or(0),
                }));
            }
            Err(e)
        }
    }
}

/// Best-effort `seq` of a line that failed to parse
pub fn extract_seq(json: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()?
        .get("seq")?
        .as_u64()
}

/// True when `version` has the supported major component
pub fn is_supported_version(version: &str) -> bool {
    version.split('.').next() == Some(PROTOCOL_MAJOR)
}

// ============== Utility Functions ==============

pub fn create_welcome(
    seq: u64,
    client_id: u64,
    role: AssignedRole,
    controller_id: Option<u64>,
) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        client_id,
        role,
        controller_id,
        game_id: "match-drop".to_string(),
        intents: ["dragStart", "dragEnd", "hoverStart", "hoverEnd", "matchesCompleted", "reset"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

pub fn create_ack(seq: u64, accepted: bool) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
        accepted,
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

pub fn create_event(seq: u64, event: &GameEvent) -> EventMessage {
    EventMessage {
        msg_type: EventType::Event,
        seq,
        ts: current_timestamp_ms(),
        event: event.into(),
    }
}

/// Build an observation from an engine snapshot
pub fn build_observation(snapshot: &GameSnapshot, seq: u64) -> ObservationMessage {
    let piece = |p: &Option<crate::core::PieceSnapshot>| {
        p.as_ref().map(|p| WirePiece {
            id: p.id.0,
            kind: p.kind.into(),
        })
    };
    let board = (0..snapshot.rows)
        .map(|row| {
            let start = row * snapshot.columns;
            snapshot.board[start..start + snapshot.columns]
                .iter()
                .map(piece)
                .collect()
        })
        .collect();

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        episode_id: snapshot.episode_id,
        seed: snapshot.seed,
        rows: snapshot.rows,
        columns: snapshot.columns,
        tile_size: snapshot.tile_size,
        state: snapshot.state.as_str().to_string(),
        playable: snapshot.playable(),
        board,
        supply: snapshot.supply.iter().map(piece).collect(),
        score: snapshot.score,
        moves_remaining: snapshot.moves_remaining,
        failed_moves: snapshot.failed_moves,
        successful_moves: snapshot.successful_moves,
        won: snapshot.won,
        game_over: snapshot.game_over,
        hint: snapshot
            .hint
            .as_ref()
            .map(|h| h.iter().copied().map(WirePos::from).collect()),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

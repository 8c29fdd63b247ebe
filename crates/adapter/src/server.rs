//! TCP server for the adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::protocol::*;
use crate::runtime::{InboundCommand, InboundPayload, OutboundMessage};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_pending_commands: 16,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("MATCH_DROP_HOST").unwrap_or(defaults.host);
        let port = env::var("MATCH_DROP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let max_pending_commands = env::var("MATCH_DROP_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            host,
            port,
            max_pending_commands,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid socket address {}:{}", self.host, self.port))
    }
}

/// Handle to a connected client
pub struct ClientHandle {
    pub id: u64,
    pub addr: SocketAddr,
    pub is_controller: bool,
    pub stream_events: bool,
    pub handshaken: bool,
    pub last_seq: Option<u64>,
    pub tx: mpsc::UnboundedSender<ClientOutbound>,
}

#[derive(Debug, Clone)]
pub enum ClientOutbound {
    Welcome(WelcomeMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
    Event(EventMessage),
    Observation(ObservationMessage),
}

/// Shared server state
pub struct ServerState {
    clients: RwLock<Vec<ClientHandle>>,
    controller: RwLock<Option<u64>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(Vec::new()),
            controller: RwLock::new(None),
        }
    }

    async fn is_handshaken(&self, client_id: u64) -> bool {
        let clients = self.clients.read().await;
        clients
            .iter()
            .find(|c| c.id == client_id)
            .map(|c| c.handshaken)
            .unwrap_or(false)
    }

    async fn is_controller(&self, client_id: u64) -> bool {
        *self.controller.read().await == Some(client_id)
    }

    /// Record `seq`; false when it does not strictly increase
    async fn check_and_update_seq(&self, client_id: u64, seq: u64) -> bool {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
            return true;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    async fn send_to(&self, client_id: u64, msg: ClientOutbound) {
        let clients = self.clients.read().await;
        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
            let _ = c.tx.send(msg);
        }
    }

    async fn broadcast(&self, msg: ClientOutbound) {
        let clients = self.clients.read().await;
        for c in clients.iter().filter(|c| c.stream_events && c.handshaken) {
            let _ = c.tx.send(msg.clone());
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the TCP server
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let bound = listener.local_addr()?;
    info!(%bound, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::new());
    let mut client_id_counter = 0u64;

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                match msg {
                    OutboundMessage::ToClientAck { client_id, ack } => {
                        state.send_to(client_id, ClientOutbound::Ack(ack)).await;
                    }
                    OutboundMessage::ToClientObservation { client_id, obs } => {
                        state.send_to(client_id, ClientOutbound::Observation(obs)).await;
                    }
                    OutboundMessage::BroadcastEvent { event } => {
                        state.broadcast(ClientOutbound::Event(event)).await;
                    }
                    OutboundMessage::BroadcastObservation { obs } => {
                        state.broadcast(ClientOutbound::Observation(obs)).await;
                    }
                }
            }
        });
    }

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_client(socket, addr, client_id, state, command_tx).await {
                warn!(client_id, %err, "client error");
            }
            info!(client_id, "client disconnected");
        });
    }
}

fn encode<T: Serialize>(buf: &mut Vec<u8>, msg: &T) -> bool {
    buf.clear();
    if serde_json::to_writer(&mut *buf, msg).is_err() {
        return false;
    }
    buf.push(b'\n');
    true
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    addr: SocketAddr,
    client_id: u64,
    state: Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    state.clients.write().await.push(ClientHandle {
        id: client_id,
        addr,
        is_controller: false,
        stream_events: false,
        handshaken: false,
        last_seq: None,
        tx: tx.clone(),
    });

    // Spawn task to write messages to client
    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            let ok = match &msg {
                ClientOutbound::Welcome(m) => encode(&mut buf, m),
                ClientOutbound::Ack(m) => encode(&mut buf, m),
                ClientOutbound::Error(m) => encode(&mut buf, m),
                ClientOutbound::Event(m) => encode(&mut buf, m),
                ClientOutbound::Observation(m) => encode(&mut buf, m),
            };
            if !ok {
                continue;
            }
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let reply_error = |seq: u64, code: ErrorCode, message: &str| {
        let _ = tx.send(ClientOutbound::Error(create_error(seq, code, message)));
    };

    // Handle incoming messages
    let mut line = String::new();
    loop {
        line.clear();
        // A read error ends the session like EOF so cleanup still runs.
        match reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                debug!(client_id, %err, "read failed");
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, hello.seq).await
                {
                    reply_error(hello.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }

                if !is_supported_version(&hello.protocol_version) {
                    reply_error(
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("Protocol version {} not supported", hello.protocol_version),
                    );
                    break;
                }

                // First client to hello becomes controller
                let role = {
                    let mut controller = state.controller.write().await;
                    let mut clients = state.clients.write().await;
                    let is_controller = match *controller {
                        None => {
                            *controller = Some(client_id);
                            true
                        }
                        Some(id) => id == client_id,
                    };
                    if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                        client.handshaken = true;
                        client.last_seq = Some(hello.seq);
                        client.stream_events = hello.stream_events;
                        client.is_controller = is_controller;
                    }
                    if is_controller {
                        AssignedRole::Controller
                    } else {
                        AssignedRole::Observer
                    }
                };
                let controller_id = *state.controller.read().await;
                info!(client_id, name = %hello.client.name, ?role, "client handshaken");

                let welcome = create_welcome(hello.seq, client_id, role, controller_id);
                let _ = tx.send(ClientOutbound::Welcome(welcome));

                if hello.stream_events {
                    // Initial observation; a full queue just means the client waits for the next one.
                    let _ = command_tx.try_send(InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    });
                }
            }

            Ok(ParsedMessage::Intent(msg)) => {
                if !state.is_handshaken(client_id).await {
                    reply_error(msg.seq, ErrorCode::HandshakeRequired, "Send hello before intent");
                    continue;
                }
                if !state.check_and_update_seq(client_id, msg.seq).await {
                    reply_error(msg.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                if !state.is_controller(client_id).await {
                    reply_error(msg.seq, ErrorCode::NotController, "Only controller may send intents");
                    continue;
                }

                debug!(client_id, seq = msg.seq, intent = ?msg.intent, "intent received");
                // Backpressure: bounded queue. The engine loop sends the ack.
                if command_tx
                    .try_send(InboundCommand {
                        client_id,
                        seq: msg.seq,
                        payload: InboundPayload::Intent(msg.intent.into()),
                    })
                    .is_err()
                {
                    reply_error(msg.seq, ErrorCode::Backpressure, "Command queue is full");
                }
            }

            Ok(ParsedMessage::Snapshot(req)) => {
                if !state.is_handshaken(client_id).await {
                    reply_error(req.seq, ErrorCode::HandshakeRequired, "Send hello before snapshot");
                    continue;
                }
                if !state.check_and_update_seq(client_id, req.seq).await {
                    reply_error(req.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                if command_tx
                    .try_send(InboundCommand {
                        client_id,
                        seq: req.seq,
                        payload: InboundPayload::SnapshotRequest,
                    })
                    .is_err()
                {
                    reply_error(req.seq, ErrorCode::Backpressure, "Command queue is full");
                }
            }

            Ok(ParsedMessage::Unknown(unknown)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, unknown.seq).await
                {
                    reply_error(unknown.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                reply_error(unknown.seq, ErrorCode::InvalidCommand, "Unknown message type");
            }

            Err(e) => {
                let seq = extract_seq(trimmed).unwrap_or(0);
                reply_error(seq, ErrorCode::InvalidCommand, &format!("JSON parse error: {e}"));
            }
        }
    }

    // Clean up: remove client and promote the next controller if needed.
    {
        let mut controller = state.controller.write().await;
        let mut clients = state.clients.write().await;

        let was_controller = *controller == Some(client_id);
        clients.retain(|c| c.id != client_id);

        if was_controller {
            // Promote the handshaken client with the lowest id.
            let next_id = clients.iter().filter(|c| c.handshaken).map(|c| c.id).min();
            *controller = next_id;
            match next_id {
                Some(new_id) => {
                    if let Some(c) = clients.iter_mut().find(|c| c.id == new_id) {
                        c.is_controller = true;
                    }
                    info!(client_id = new_id, "controller promoted");
                }
                None => info!(client_id, "controller released"),
            }
        }
    }

    drop(reply_error);
    drop(tx);
    let _ = write_task.await;

    Ok(())
}

//! Adapter runtime integration.
//!
//! Bridges the synchronous engine loop with the async TCP server.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tracing::error;

use crate::protocol::{AckMessage, EventMessage, ObservationMessage};
use crate::server::{run_server, ServerConfig};
use crate::types::Intent;

/// Command delivered to the engine loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: u64,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone)]
pub enum InboundPayload {
    Intent(Intent),
    SnapshotRequest,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClientAck { client_id: u64, ack: AckMessage },
    ToClientObservation { client_id: u64, obs: ObservationMessage },
    BroadcastEvent { event: EventMessage },
    BroadcastObservation { obs: ObservationMessage },
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    addr: SocketAddr,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl Adapter {
    /// Start the server on its own runtime and wait until it is listening.
    pub fn start(config: ServerConfig) -> anyhow::Result<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let (ready_tx, ready_rx) = oneshot::channel();

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        rt.spawn(async move {
            if let Err(err) = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await {
                error!(%err, "adapter server stopped");
            }
        });
        let addr = rt
            .block_on(ready_rx)
            .context("adapter server failed before listening")?;

        Ok(Self {
            _rt: rt,
            addr,
            cmd_rx,
            out_tx,
        })
    }

    /// Start from `MATCH_DROP_*` environment variables.
    pub fn start_from_env() -> anyhow::Result<Self> {
        Self::start(ServerConfig::from_env())
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block the calling thread until a command arrives.
    /// None once the server has shut down.
    pub fn recv_blocking(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.blocking_recv()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }
}

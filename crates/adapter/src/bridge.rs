//! Engine side of the adapter: turns inbound commands into engine calls and
//! engine notifications into outbound messages.

use tracing::debug;

use crate::core::Engine;
use crate::protocol::{build_observation, create_ack, create_event};
use crate::runtime::{InboundCommand, InboundPayload, OutboundMessage};

pub struct EngineBridge {
    engine: Engine,
    /// Sequence for server-originated messages (events, broadcasts)
    seq: u64,
}

impl EngineBridge {
    pub fn new(engine: Engine) -> Self {
        Self { engine, seq: 0 }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Apply one command and return what should go out, in order.
    ///
    /// An intent yields its ack, then one event per notification, then a
    /// broadcast observation when anything changed.
    pub fn handle(&mut self, cmd: InboundCommand) -> Vec<OutboundMessage> {
        match cmd.payload {
            InboundPayload::SnapshotRequest => {
                let obs = build_observation(&self.engine.snapshot(), cmd.seq);
                vec![OutboundMessage::ToClientObservation {
                    client_id: cmd.client_id,
                    obs,
                }]
            }
            InboundPayload::Intent(intent) => {
                let accepted = self.engine.dispatch(intent);
                debug!(client_id = cmd.client_id, seq = cmd.seq, accepted, "intent applied");

                let mut out = vec![OutboundMessage::ToClientAck {
                    client_id: cmd.client_id,
                    ack: create_ack(cmd.seq, accepted),
                }];
                let events = self.engine.drain_events();
                for event in &events {
                    let seq = self.next_seq();
                    out.push(OutboundMessage::BroadcastEvent {
                        event: create_event(seq, event),
                    });
                }
                if !events.is_empty() {
                    let seq = self.next_seq();
                    out.push(OutboundMessage::BroadcastObservation {
                        obs: build_observation(&self.engine.snapshot(), seq),
                    });
                }
                out
            }
        }
    }
}

//! Per-connection change feed loop.
//!
//! Pings every 5s and drops clients that stay silent for 10s. Tests shorten
//! both intervals.

use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time;
use tracing::{debug, warn};

use crate::domain::ChangeEvent;
use crate::inbound::ws::messages::FeedFrame;

#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(150);

enum Shutdown {
    ClientClosed(Option<CloseReason>),
    StreamEnded,
    FeedClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    Network(Closed),
}

impl Shutdown {
    fn close_reason(self) -> Option<Option<CloseReason>> {
        match self {
            Self::ClientClosed(reason) => Some(reason),
            Self::HeartbeatTimeout => Some(Some(CloseReason {
                code: CloseCode::Normal,
                description: Some("heartbeat timeout".to_owned()),
            })),
            Self::Protocol(_) => Some(Some(CloseReason {
                code: CloseCode::Protocol,
                description: Some("protocol error".to_owned()),
            })),
            Self::FeedClosed => Some(Some(CloseReason {
                code: CloseCode::Restart,
                description: Some("server shutting down".to_owned()),
            })),
            Self::StreamEnded | Self::Network(_) => None,
        }
    }
}

/// Forward change events to `session` until either side goes away.
pub(super) async fn run(
    mut session: Session,
    mut stream: MessageStream,
    mut events: broadcast::Receiver<ChangeEvent>,
) {
    let mut last_seen = Instant::now();
    let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

    let shutdown = loop {
        let step = tokio::select! {
            _ = heartbeat.tick() => beat(&mut session, last_seen).await,
            message = stream.recv() => receive(&mut session, &mut last_seen, message).await,
            event = events.recv() => forward(&mut session, event).await,
        };
        if let Err(shutdown) = step {
            break shutdown;
        }
    };

    match &shutdown {
        Shutdown::HeartbeatTimeout => debug!("change feed client timed out"),
        Shutdown::Protocol(error) => warn!(error = %error, "change feed protocol error"),
        Shutdown::Network(error) => debug!(error = %error, "change feed client gone"),
        Shutdown::ClientClosed(_) | Shutdown::StreamEnded | Shutdown::FeedClosed => {}
    }
    if let Some(reason) = shutdown.close_reason() {
        if let Err(error) = session.close(reason).await {
            debug!(error = %error, "change feed close failed");
        }
    }
}

async fn beat(session: &mut Session, last_seen: Instant) -> Result<(), Shutdown> {
    if last_seen.elapsed() > CLIENT_TIMEOUT {
        return Err(Shutdown::HeartbeatTimeout);
    }
    session.ping(b"").await.map_err(Shutdown::Network)
}

async fn receive(
    session: &mut Session,
    last_seen: &mut Instant,
    message: Option<Result<Message, ProtocolError>>,
) -> Result<(), Shutdown> {
    let message = match message {
        Some(Ok(message)) => message,
        Some(Err(error)) => return Err(Shutdown::Protocol(error)),
        None => return Err(Shutdown::StreamEnded),
    };
    *last_seen = Instant::now();
    match message {
        Message::Ping(payload) => session.pong(&payload).await.map_err(Shutdown::Network),
        Message::Close(reason) => Err(Shutdown::ClientClosed(reason)),
        // The feed is one-way; client frames only count as liveness.
        Message::Text(_)
        | Message::Binary(_)
        | Message::Pong(_)
        | Message::Continuation(_)
        | Message::Nop => Ok(()),
    }
}

async fn forward(
    session: &mut Session,
    event: Result<ChangeEvent, RecvError>,
) -> Result<(), Shutdown> {
    match event {
        Ok(event) => send(session, &FeedFrame::Change(&event)).await,
        Err(RecvError::Lagged(missed)) => {
            warn!(missed, "change feed client lagging; requesting resync");
            send(session, &FeedFrame::Resync { missed }).await
        }
        Err(RecvError::Closed) => Err(Shutdown::FeedClosed),
    }
}

async fn send(session: &mut Session, frame: &FeedFrame<'_>) -> Result<(), Shutdown> {
    match serde_json::to_string(frame) {
        Ok(body) => session.text(body).await.map_err(Shutdown::Network),
        Err(error) => {
            warn!(error = %error, "change frame failed to serialise");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

/**
 * Client Transport Channel
 *
 * Persistent WebSocket connection to the sync server. A background
 * driver task owns the connection, reconnects with exponential backoff
 * when it drops, and re-joins the current board after every reconnect
 * so the server re-adds this connection to the room.
 *
 * Incoming events are fanned out to per-kind subscriptions created with
 * [`BoardSocket::on`]. Dropping a [`Subscription`] deregisters it.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::ClientError;
use crate::shared::{BoardEvent, ClientFrame, EventKind, SharedError};

const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

type HandlerMap = HashMap<EventKind, Vec<(u64, UnboundedSender<BoardEvent>)>>;

struct SocketShared {
    handlers: Mutex<HandlerMap>,
    current_board: Mutex<Option<Uuid>>,
    next_handler_id: AtomicU64,
}

/// Handle to the live event stream of the sync server
///
/// Cloning is cheap; all clones share one underlying connection. The
/// driver task shuts down once every handle has been dropped.
#[derive(Clone)]
pub struct BoardSocket {
    shared: Arc<SocketShared>,
    commands: UnboundedSender<ClientFrame>,
    connection_id: Uuid,
}

impl BoardSocket {
    /// Connect to `ws_url` (e.g. `ws://127.0.0.1:3000/ws`) with a bearer
    /// token, spawning the driver task
    ///
    /// The connection id is generated here and must be echoed in the
    /// `X-Connection-Id` header of REST mutations so the server skips
    /// this connection when broadcasting the resulting event.
    pub fn connect(ws_url: impl Into<String>, token: impl Into<String>) -> Self {
        let connection_id = Uuid::new_v4();
        let shared = Arc::new(SocketShared {
            handlers: Mutex::new(HashMap::new()),
            current_board: Mutex::new(None),
            next_handler_id: AtomicU64::new(0),
        });

        let (commands, command_rx) = mpsc::unbounded_channel();
        tokio::spawn(drive(
            ws_url.into(),
            token.into(),
            connection_id,
            Arc::clone(&shared),
            command_rx,
        ));

        Self {
            shared,
            commands,
            connection_id,
        }
    }

    /// The id the server knows this connection by
    pub fn connection_id(&self) -> Uuid {
        self.connection_id
    }

    /// Enter a board room; subsequent events for that board will arrive
    /// on matching subscriptions
    ///
    /// Only one board room is tracked for automatic re-join after a
    /// reconnect; joining a second board replaces the first.
    pub fn join_board(&self, board_id: Uuid) -> Result<(), ClientError> {
        *self
            .shared
            .current_board
            .lock()
            .expect("socket lock poisoned") = Some(board_id);
        self.send(ClientFrame::JoinBoard(board_id))
    }

    /// Leave a board room; the server stops delivering its events here
    pub fn leave_board(&self, board_id: Uuid) -> Result<(), ClientError> {
        let mut current = self
            .shared
            .current_board
            .lock()
            .expect("socket lock poisoned");
        if *current == Some(board_id) {
            *current = None;
        }
        drop(current);
        self.send(ClientFrame::LeaveBoard(board_id))
    }

    /// Subscribe to one event kind
    ///
    /// Events of that kind received after this call are delivered to the
    /// returned handle. Dropping the handle deregisters it.
    pub fn on(&self, kind: EventKind) -> Subscription {
        let id = self.shared.next_handler_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.shared
            .handlers
            .lock()
            .expect("socket lock poisoned")
            .entry(kind)
            .or_default()
            .push((id, tx));

        Subscription {
            id,
            kind,
            rx,
            shared: Arc::clone(&self.shared),
        }
    }

    fn send(&self, frame: ClientFrame) -> Result<(), ClientError> {
        self.commands
            .send(frame)
            .map_err(|_| ClientError::Disconnected)
    }
}

/// Registered interest in one event kind
///
/// Receive with [`Subscription::recv`]; drop to deregister.
pub struct Subscription {
    id: u64,
    kind: EventKind,
    rx: UnboundedReceiver<BoardEvent>,
    shared: Arc<SocketShared>,
}

impl Subscription {
    /// Next event of this kind, or `None` once the socket is gone
    pub async fn recv(&mut self) -> Option<BoardEvent> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut handlers) = self.shared.handlers.lock() {
            if let Some(entries) = handlers.get_mut(&self.kind) {
                entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// Connection driver: connect, pump frames, reconnect with backoff
async fn drive(
    ws_url: String,
    token: String,
    connection_id: Uuid,
    shared: Arc<SocketShared>,
    mut commands: UnboundedReceiver<ClientFrame>,
) {
    let url = format!("{}?token={}&connection={}", ws_url, token, connection_id);
    let mut backoff = INITIAL_BACKOFF;

    loop {
        match connect_async(&url).await {
            Ok((stream, _)) => {
                info!("[Socket] Connected to {}", ws_url);
                backoff = INITIAL_BACKOFF;

                let (mut sink, mut source) = stream.split();

                // Re-enter the room we were in before the drop
                let rejoin = *shared.current_board.lock().expect("socket lock poisoned");
                let rejoined = match rejoin {
                    Some(board_id) => {
                        let sent = send_frame(&mut sink, &ClientFrame::JoinBoard(board_id)).await;
                        if sent.is_err() {
                            warn!("[Socket] Re-join failed for board {}", board_id);
                        }
                        sent.is_ok()
                    }
                    None => true,
                };

                // Pump frames until the connection drops, then fall
                // through to the backoff sleep
                while rejoined {
                    tokio::select! {
                        frame = commands.recv() => match frame {
                            Some(frame) => {
                                if send_frame(&mut sink, &frame).await.is_err() {
                                    warn!("[Socket] Send failed, reconnecting");
                                    break;
                                }
                            }
                            // Every handle dropped: shut down for good
                            None => {
                                let _ = sink.close().await;
                                return;
                            }
                        },
                        message = source.next() => match message {
                            Some(Ok(Message::Text(text))) => dispatch(&shared, &text),
                            Some(Ok(Message::Close(_))) | None => {
                                warn!("[Socket] Server closed connection");
                                break;
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                warn!("[Socket] Read error: {}", e);
                                break;
                            }
                        },
                    }
                }
            }
            Err(e) => {
                warn!("[Socket] Connect failed: {}", e);
            }
        }

        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}

async fn send_frame<S>(sink: &mut S, frame: &ClientFrame) -> Result<(), ()>
where
    S: SinkExt<Message> + Unpin,
{
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            warn!("[Socket] Failed to serialize frame: {}", e);
            return Err(());
        }
    };
    sink.send(Message::Text(json)).await.map_err(|_| ())
}

/// Fan one incoming event out to every subscription of its kind
fn dispatch(shared: &SocketShared, text: &str) {
    let event: BoardEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            warn!("[Socket] Dropping malformed event: {}", SharedError::from(e));
            return;
        }
    };

    let mut handlers = shared.handlers.lock().expect("socket lock poisoned");
    if let Some(entries) = handlers.get_mut(&event.kind()) {
        // Prune subscriptions whose receiver is gone
        entries.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        debug!("[Socket] Dispatched {} to {} handlers", event.name(), entries.len());
    }
}

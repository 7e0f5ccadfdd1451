//! Change-event hub: the pub/sub channel between tasks and clients.
//!
//! Tasks publish `ChangeEvent { category }` after writing output; the hub
//! thread subscribes and decides reload granularity: css → in-place
//! stylesheet swap, everything else → full reload.

use std::net::TcpStream;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::Receiver;
use parking_lot::Mutex;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::message::ReloadMessage;
use crate::core::AssetCategory;

/// Output-changed event, tagged by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub category: AssetCategory,
}

/// Shared registry of connected WebSocket clients.
#[derive(Clone, Default)]
pub struct Clients {
    inner: Arc<Mutex<Vec<WebSocket<TcpStream>>>>,
}

impl Clients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly accepted client.
    pub fn add(&self, ws: WebSocket<TcpStream>) {
        self.inner.lock().push(ws);
    }

    pub fn count(&self) -> usize {
        self.inner.lock().len()
    }

    /// Send a message to every client, dropping the ones that went away.
    pub fn broadcast(&self, message: &ReloadMessage) {
        let text = message.to_json();
        let mut clients = self.inner.lock();
        clients.retain_mut(|ws| ws.send(Message::Text(text.clone().into())).is_ok());
    }
}

/// Map one change event to its client message.
fn granularity(event: ChangeEvent) -> ReloadMessage {
    if event.category.reloads_styles_only() {
        ReloadMessage::Css
    } else {
        ReloadMessage::reload(event.category.label())
    }
}

/// Spawn the hub thread: consume change events until every sender is
/// dropped, broadcasting the mapped message for each.
pub fn spawn_hub(events: Receiver<ChangeEvent>, clients: Clients) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while let Ok(event) = events.recv() {
            let message = granularity(event);
            crate::debug!("reload"; "{} -> {}", event.category, message.to_json());
            clients.broadcast(&message);
        }
    })
}

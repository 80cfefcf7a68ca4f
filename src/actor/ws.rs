//! WebSocket Actor - Preview Page Notifications
//!
//! This actor is responsible for:
//! - Managing WebSocket client connections (preview pages)
//! - Broadcasting change notifications so pages refetch their preview
//!
//! Clients never send anything meaningful; each reload message names the
//! document it applies to and the page filters client-side.

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::WsMsg;
use crate::preview::message::PreviewMessage;

/// WebSocket Actor - manages client connections and broadcasts
pub struct WsActor {
    /// Channel to receive messages
    rx: mpsc::Receiver<WsMsg>,
    /// Connected preview pages
    clients: Arc<Mutex<Vec<WebSocket<TcpStream>>>>,
}

impl WsActor {
    /// Create a new WsActor
    pub fn new(rx: mpsc::Receiver<WsMsg>) -> Self {
        Self {
            rx,
            clients: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Changed { doc, reason } => {
                    crate::debug!("ws"; "broadcast reload: {} ({})", doc, reason);
                    let msg = PreviewMessage::reload(doc.as_str(), reason);
                    self.broadcast(Message::Text(msg.to_json().into()));
                }

                WsMsg::AddClient(stream) => {
                    self.add_client(stream);
                }

                WsMsg::Shutdown => {
                    crate::debug!("ws"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut client in clients.drain(..) {
                        let _ = client.close(None);
                    }
                    break;
                }
            }
        }
    }

    /// Perform the WebSocket handshake and register the client.
    fn add_client(&self, stream: TcpStream) {
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                let _ = ws.send(Message::Text(PreviewMessage::connected().to_json().into()));
                self.clients.lock().push(ws);
            }
            Err(e) => {
                crate::debug!("ws"; "handshake failed: {}", e);
            }
        }
    }

    /// Send a message to every client, dropping the ones that went away.
    fn broadcast(&self, message: Message) {
        let mut clients = self.clients.lock();
        clients.retain_mut(|ws| ws.send(message.clone()).is_ok());
    }
}

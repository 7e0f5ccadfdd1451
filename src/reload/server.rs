//! WebSocket server for live reload.
//!
//! Accepts browser connections on a dedicated port and registers them with
//! the shared client list. Delivery happens in the hub.

use std::net::TcpListener;

use anyhow::Result;

use super::hub::Clients;
use super::message::ReloadMessage;

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Start the WebSocket accept loop.
///
/// Returns the actual bound port (the preferred one may be taken) and the
/// shared client registry.
pub fn start_ws_server(base_port: u16) -> Result<(u16, Clients)> {
    let (listener, actual_port) = try_bind_port(base_port, MAX_PORT_RETRIES)?;
    listener.set_nonblocking(true)?;

    let clients = Clients::new();
    let acceptor_clients = clients.clone();

    std::thread::spawn(move || {
        loop {
            if crate::core::is_shutdown() {
                break;
            }

            match listener.accept() {
                Ok((stream, addr)) => {
                    crate::debug!("reload"; "client connected: {}", addr);

                    // Handshake wants a blocking stream
                    let _ = stream.set_nonblocking(false);

                    match tungstenite::accept(stream) {
                        Ok(mut ws) => {
                            let greeting = ReloadMessage::connected().to_json();
                            let _ = ws.send(tungstenite::protocol::Message::Text(greeting.into()));
                            acceptor_clients.add(ws);
                            crate::debug!("reload"; "{} client(s)", acceptor_clients.count());
                        }
                        Err(e) => {
                            crate::debug!("reload"; "handshake failed: {}", e);
                        }
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
                Err(e) => {
                    crate::log!("reload"; "accept error: {}", e);
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }
    });

    Ok((actual_port, clients))
}

/// Try binding to port, retry with incremented port if in use
fn try_bind_port(base_port: u16, max_retries: u16) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind(format!("127.0.0.1:{}", port)) {
            Ok(listener) => {
                let actual_port = listener.local_addr()?.port();
                return Ok((listener, actual_port));
            }
            Err(e) => {
                last_error = Some(e);
                continue;
            }
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind WebSocket server after {} attempts: {}",
        max_retries,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

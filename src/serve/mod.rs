//! Development HTTP server over the output directory.

mod inject;
mod path;
mod response;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tiny_http::{Request, Server};

use crate::config::PipelineConfig;
use crate::core::register_server;
use crate::log;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
}

/// Bind the HTTP server without starting the request loop.
pub fn bind_server(config: &PipelineConfig) -> Result<BoundServer> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    register_server(Arc::clone(&server));
    log!("serve"; "http://{}", addr);

    Ok(BoundServer { server })
}

impl BoundServer {
    /// Run the request loop (blocking until Ctrl+C unblocks the server).
    pub fn run(self, serve_root: PathBuf, ws_port: Option<u16>) -> Result<()> {
        // Thread pool so a slow media transfer doesn't block other requests
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to create thread pool: {e}"))?;

        let serve_root = Arc::new(serve_root);
        for request in self.server.incoming_requests() {
            let serve_root = Arc::clone(&serve_root);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &serve_root, ws_port) {
                    log!("serve"; "request error: {e}");
                }
            });
        }

        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, serve_root: &std::path::Path, ws_port: Option<u16>) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if let Some(path) = path::resolve_path(request.url(), serve_root) {
        return response::respond_file(request, &path, ws_port);
    }

    response::respond_not_found(request, serve_root, ws_port)
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

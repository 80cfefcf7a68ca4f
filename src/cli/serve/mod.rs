//! Development server with live preview support.

mod response;

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::Result;
use crossbeam::channel::{self, Receiver};
use percent_encoding::percent_decode_str;
use tiny_http::{Request, Server};

use crate::actor::Coordinator;
use crate::config::StudioConfig;
use crate::core::{DocId, is_serving, is_shutdown, register_server, set_serving};
use crate::document::DocumentStore;
use crate::preview::cache;
use crate::{debug, log};

/// Default WebSocket port for live reload
pub const DEFAULT_WS_PORT: u16 = 35729;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Run the preview server until Ctrl+C.
pub fn serve(config: &Arc<StudioConfig>) -> Result<()> {
    let story_dir = config.story_dir();
    if !story_dir.is_dir() {
        anyhow::bail!(
            "story directory `{}` does not exist - set `[story] dir` in inkpot.toml or pass --story",
            story_dir.display()
        );
    }
    let store = Arc::new(DocumentStore::new(story_dir));

    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);
    if config.serve.watch {
        debug!("ws"; "ws://localhost:{}", DEFAULT_WS_PORT);
    }

    let actor_handle = spawn_actors(Arc::clone(config), Arc::clone(&store), shutdown_rx);

    // Document scan is cheap; previews warm up in the background
    set_serving();

    run_request_loop(&server, store);
    wait_for_shutdown(actor_handle);
    Ok(())
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: std::net::IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
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

/// Spawn the actor system on its own runtime thread.
fn spawn_actors(
    config: Arc<StudioConfig>,
    store: Arc<DocumentStore>,
    shutdown_rx: Receiver<()>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime");

        rt.block_on(async {
            let coordinator = Coordinator::new(config, store)
                .with_ws_port(DEFAULT_WS_PORT)
                .with_shutdown_signal(shutdown_rx);
            if let Err(e) = coordinator.run().await {
                log!("actor"; "error: {}", e);
            }
        });
    })
}

/// Wait for actor system to shutdown gracefully (max 2 seconds).
fn wait_for_shutdown(handle: JoinHandle<()>) {
    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(std::time::Duration::from_millis(50));
    }
}

fn run_request_loop(server: &Server, store: Arc<DocumentStore>) {
    for request in server.incoming_requests() {
        // Requests are served off the accept thread so one stalled client
        // cannot block the preview page of another document
        let store = Arc::clone(&store);
        thread::spawn(move || {
            if let Err(e) = handle_request(request, &store) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, store: &DocumentStore) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !is_serving() {
        return response::respond_starting(request);
    }

    let raw_url = request.url().to_string();
    let path = raw_url.split('?').next().unwrap_or(&raw_url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());

    if decoded == "/" {
        return response::respond_index(request, store);
    }

    if let Some(route) = decoded.strip_prefix("/preview/") {
        return match DocId::from_route(route) {
            Some(doc) => {
                if let Some(artifact) = cache::get(&doc) {
                    response::respond_html(request, &artifact.html, 200)
                } else if store.exists(&doc) {
                    // Seed compile has not landed yet; page polls until then
                    response::respond_compiling(request, &doc)
                } else {
                    response::respond_not_found(request)
                }
            }
            None => response::respond_not_found(request),
        };
    }

    response::respond_not_found(request)
}

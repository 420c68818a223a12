//! Accept loop and request dispatch.
//!
//! # Responsibilities
//! - Run the accept loop: one pending accept, re-armed forever
//! - Spawn one task per connection; that task owns connection, request,
//!   and response until the socket closes
//! - Route each parsed request (first match wins) and invoke its handler
//! - Pre-populate mandatory response headers
//! - Assemble the wire response and issue one vectored write
//!
//! # Design Decisions
//! - An unmatched path produces a well-formed 404 instead of dropping the
//!   connection silently
//! - A short or failed response write is a logged per-connection error,
//!   never a server-wide failure
//! - Handlers run synchronously on the event loop; a blocking handler
//!   stalls every other connection

use std::io::IoSlice;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::net::connection::Connection;
use crate::net::listener::Listener;
use crate::routing::router::{RouteError, Router};

/// Error type for per-connection response delivery.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Transport-level write failure.
    #[error("response write failed: {0}")]
    Write(#[from] std::io::Error),
    /// Fewer bytes reached the socket than the assembled response holds.
    #[error("short response write: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

/// The dispatcher: owns the route table and drives every connection from
/// accept through response write.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            router: Router::new(),
            config,
        }
    }

    /// Register a route. Registration happens before [`run`](Self::run);
    /// the table is frozen once serving starts.
    pub fn add_route<H>(&mut self, pattern: &str, handler: H) -> Result<(), RouteError>
    where
        H: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        self.router.add_route(pattern, handler)
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Accept connections forever. Each accept spawns a task that serves
    /// exactly one request and then closes the socket. Accept failures are
    /// logged and the loop re-arms; this function only returns if the
    /// listener itself is unable to report a local address.
    pub async fn run(self, listener: Listener) -> Result<(), std::io::Error> {
        let router = Arc::new(self.router);
        let server_token: Arc<str> = Arc::from(self.config.server_token.as_str());

        tracing::info!(
            address = %listener.local_addr()?,
            routes = router.len(),
            "HTTP server starting"
        );

        loop {
            let (stream, peer_addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!(error = %e, "Accept failed");
                    continue;
                }
            };

            let router = Arc::clone(&router);
            let server_token = Arc::clone(&server_token);
            tokio::spawn(async move {
                let conn = Connection::new(stream, peer_addr);
                handle_connection(conn, router, server_token).await;
            });
        }
    }
}

/// Serve one connection end to end. The connection, the parsed request, and
/// the response all live inside this task and are dropped together when it
/// returns, whichever exit path is taken.
async fn handle_connection(mut conn: Connection, router: Arc<Router>, server_token: Arc<str>) {
    let request = match conn.read_request().await {
        Ok(request) => request,
        Err(e) => {
            // Terminal for this connection; nothing has been written and
            // nothing will be.
            tracing::debug!(
                peer_addr = %conn.peer_addr(),
                error = %e,
                "Dropping connection without a response"
            );
            return;
        }
    };

    tracing::debug!(
        peer_addr = %conn.peer_addr(),
        method = request.method(),
        path = request.path(),
        "Request received"
    );

    let mut response = Response::new();
    response.add_header("Server", server_token.as_ref());
    response.add_header("Connection", "close");
    response.add_header("Content-Type", "text/html");

    match router.route(request.path()) {
        Some(handler) => handler(&request, &mut response),
        None => {
            tracing::debug!(path = request.path(), "No route matched");
            not_found(&mut response);
        }
    }

    if let Err(e) = write_response(&mut conn, &mut response).await {
        tracing::warn!(
            peer_addr = %conn.peer_addr(),
            status = response.status(),
            error = %e,
            "Response write failed"
        );
    }
}

/// Default response for an unmatched path.
fn not_found(response: &mut Response) {
    response.set_status(404);
    response.append_chunk("<h1>404 Not Found</h1>\n");
}

/// Finalize the response for the wire: compute `Content-Length` from the
/// chunk byte sum (overwriting whatever the handler set), and render the
/// status line and header block. Returns the expected write size alongside.
fn finalize(response: &mut Response) -> (String, String, usize) {
    let body_len = response.body_len();
    response.set_header("Content-Length", body_len.to_string());

    let status_line = response.status_line();
    let header_block = format!("{}\r\n", response.headers().to_wire());
    let expected = status_line.len() + header_block.len() + body_len;
    (status_line, header_block, expected)
}

/// Serialize and write the response as a single vectored write: status
/// line, header block, then every body chunk in append order as separate
/// segments. The transferred byte count must equal the assembled size.
async fn write_response(
    conn: &mut Connection,
    response: &mut Response,
) -> Result<(), DispatchError> {
    let (status_line, header_block, expected) = finalize(response);

    let mut segments: Vec<IoSlice<'_>> = Vec::with_capacity(2 + response.chunks().len());
    segments.push(IoSlice::new(status_line.as_bytes()));
    segments.push(IoSlice::new(header_block.as_bytes()));
    for chunk in response.chunks() {
        segments.push(IoSlice::new(chunk));
    }

    let written = conn.write_vectored_all(&mut segments).await?;
    // write_vectored_all only returns Ok once every segment has drained, so
    // this cross-check of the completion contract cannot fire unless that
    // invariant breaks.
    if written != expected {
        return Err(DispatchError::ShortWrite { written, expected });
    }
    Ok(())
}

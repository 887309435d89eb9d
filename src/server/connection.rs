// Connection handling module
// Accepts a TCP connection and serves HTTP/1.1 over it in a spawned task

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;

use crate::config::Config;
use crate::logger;

/// Request handler signature shared by both servers
pub trait Handler<Fut>:
    Fn(Request<Incoming>, SocketAddr, Arc<Config>) -> Fut + Clone + Send + Sync + 'static
{
}

impl<T, Fut> Handler<Fut> for T where
    T: Fn(Request<Incoming>, SocketAddr, Arc<Config>) -> Fut + Clone + Send + Sync + 'static
{
}

/// Accept a connection, enforcing the connection limit before serving it
pub fn accept_connection<H, Fut>(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    config: &Arc<Config>,
    conn_counter: &Arc<AtomicUsize>,
    handler: H,
) where
    H: Handler<Fut>,
    Fut: Future<Output = Result<Response<Full<Bytes>>, std::convert::Infallible>> + Send + 'static,
{
    // Increment first, then check, so concurrent accepts cannot slip past the cap
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);
    if let Some(max_conn) = config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    if config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(config),
        Arc::clone(conn_counter),
        handler,
    );
}

/// Serve one connection in a spawned task: wrap the stream in `TokioIo`,
/// run hyper's HTTP/1.1 state machine with keep-alive, bound the whole
/// exchange by the configured read/write timeout, and decrement the
/// connection counter when done.
fn handle_connection<H, Fut>(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    config: Arc<Config>,
    conn_counter: Arc<AtomicUsize>,
    handler: H,
) where
    H: Handler<Fut>,
    Fut: Future<Output = Result<Response<Full<Bytes>>, std::convert::Infallible>> + Send + 'static,
{
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            config.performance.read_timeout,
            config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        if config.performance.keep_alive_timeout > 0 {
            builder.keep_alive(true);
        }

        let service_config = Arc::clone(&config);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let handler = handler.clone();
                let config = Arc::clone(&service_config);
                async move { handler(req, peer_addr, config).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

// Server module entry point
// Accept loop and per-connection serving shared by both binaries

mod connection;
mod listener;

pub use connection::Handler;
pub use listener::create_listener;

use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;

/// Run the accept loop until Ctrl-C.
///
/// Each accepted connection is handed to `handler` through the connection
/// module; in-flight connections finish naturally after shutdown since they
/// run in their own tasks.
pub async fn run<H, Fut>(
    name: &str,
    listener: TcpListener,
    config: Arc<Config>,
    handler: H,
) -> Result<(), Box<dyn std::error::Error>>
where
    H: Handler<Fut>,
    Fut: Future<Output = Result<Response<Full<Bytes>>, std::convert::Infallible>> + Send + 'static,
{
    let active_connections = Arc::new(AtomicUsize::new(0));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &config,
                            &active_connections,
                            handler.clone(),
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = &mut shutdown => {
                println!("\n[{name}] Ctrl+C received, shutting down");
                break;
            }
        }
    }

    Ok(())
}

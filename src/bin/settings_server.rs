//! Settings page server
//!
//! Serves the configured settings template at `/` and `/settings.html`,
//! with permissive CORS, on 0.0.0.0:5000 by default.

use std::sync::Arc;

use twinserve::config::Config;
use twinserve::handler::settings;
use twinserve::logger;
use twinserve::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start("settings-server", &addr, &cfg);
    println!("Routes:");
    println!("  GET /               -> {}", cfg.settings.template);
    println!("  GET /settings.html  -> {}\n", cfg.settings.template);

    server::run("settings-server", listener, Arc::new(cfg), settings::handle_request).await
}

//! Static file server
//!
//! Serves the site root on 0.0.0.0:5000 by default: `/` is the index file,
//! `/attached_assets/*` serves the assets directory (404 on miss), and every
//! other path serves the same-named file or redirects to `/`.

use std::sync::Arc;

use twinserve::config::Config;
use twinserve::handler::site;
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

    logger::log_server_start("file-server", &addr, &cfg);
    println!("Routes:");
    println!("  GET /           -> {}/{}", cfg.site.root, cfg.site.index);
    println!("  GET {}/* -> {}/ (404 on miss)", cfg.site.assets_route, cfg.site.assets_dir);
    println!("  GET /<path>     -> {}/<path> (302 to / on miss)\n", cfg.site.root);

    server::run("file-server", listener, Arc::new(cfg), site::handle_request).await
}

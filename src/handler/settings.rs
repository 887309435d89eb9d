//! Settings page server routing
//!
//! `GET /` and `GET /settings.html` both return the configured template file
//! verbatim; everything else is a 404. CORS is on by default so the page can
//! be embedded from other origins.

use super::static_files;
use crate::config::Config;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for the settings server
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();

    let response = respond(&parts, &config).await;

    if config.logging.access_log {
        let entry = super::access_entry(&parts, peer_addr, &response, started);
        logger::log_access(&entry, &config.logging.access_log_format);
    }
    Ok(response)
}

async fn respond(parts: &Parts, config: &Config) -> Response<Full<Bytes>> {
    if let Some(resp) = super::check_http_method(&parts.method, config.settings.enable_cors) {
        return resp;
    }
    if let Some(resp) = super::check_body_size(&parts.headers, config.http.max_body_size) {
        return resp;
    }
    logger::log_headers_count(parts.headers.len(), config.logging.show_headers);

    let is_head = parts.method == Method::HEAD;
    route_request(parts.uri.path(), is_head, config).await
}

/// Route a settings server request by path
pub(crate) async fn route_request(path: &str, is_head: bool, config: &Config) -> Response<Full<Bytes>> {
    match path {
        "/" | "/settings.html" => serve_template(is_head, config).await,
        _ => http::build_404_response(),
    }
}

/// Serve the settings template. The template has no variables, so rendering
/// is a plain file read; a missing template is a server-side error.
async fn serve_template(is_head: bool, config: &Config) -> Response<Full<Bytes>> {
    match static_files::load_single_file(&config.settings.template).await {
        Some((content, content_type)) => http::build_file_response(
            content,
            content_type,
            &config.http.server_name,
            config.settings.enable_cors,
            is_head,
        ),
        None => {
            logger::log_error(&format!(
                "Settings template '{}' missing or unreadable",
                config.settings.template
            ));
            http::build_500_response()
        }
    }
}

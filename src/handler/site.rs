//! Static site server routing
//!
//! `/` serves the index file, the assets route serves its directory with a
//! plain 404 on miss, and the catch-all serves the site root but turns every
//! failure into a redirect home. The catch-all's swallow-everything fallback
//! is deliberately confined to that one route.

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

/// Main entry point for the file server
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
    if let Some(resp) = super::check_http_method(&parts.method, false) {
        return resp;
    }
    if let Some(resp) = super::check_body_size(&parts.headers, config.http.max_body_size) {
        return resp;
    }
    logger::log_headers_count(parts.headers.len(), config.logging.show_headers);

    let is_head = parts.method == Method::HEAD;
    route_request(parts.uri.path(), is_head, config).await
}

/// Route a file server request by path
pub(crate) async fn route_request(path: &str, is_head: bool, config: &Config) -> Response<Full<Bytes>> {
    let site = &config.site;

    // Assets route wins over the catch-all; a miss here is a plain 404.
    let assets_prefix = format!("{}/", site.assets_route.trim_end_matches('/'));
    if let Some(asset_path) = path.strip_prefix(assets_prefix.as_str()) {
        return match static_files::load_from_directory(&site.assets_dir, asset_path).await {
            Some((content, content_type)) => {
                serve_bytes(content, content_type, is_head, config)
            }
            None => http::build_404_response(),
        };
    }

    if path == "/" {
        return match static_files::load_from_directory(&site.root, &site.index).await {
            Some((content, content_type)) => {
                serve_bytes(content, content_type, is_head, config)
            }
            None => http::build_404_response(),
        };
    }

    // Catch-all: any failure becomes a redirect home rather than a 404.
    match static_files::load_from_directory(&site.root, path).await {
        Some((content, content_type)) => serve_bytes(content, content_type, is_head, config),
        None => http::build_redirect_response("/"),
    }
}

fn serve_bytes(
    content: Vec<u8>,
    content_type: &str,
    is_head: bool,
    config: &Config,
) -> Response<Full<Bytes>> {
    http::build_file_response(content, content_type, &config.http.server_name, false, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testutil::{config_for, scratch_dir};
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.expect("body").to_bytes()
    }

    fn site_fixture(name: &str) -> (std::path::PathBuf, Config) {
        let root = scratch_dir(name);
        std::fs::write(root.join("index.html"), b"<html>index</html>").expect("fixture");
        std::fs::create_dir_all(root.join("attached_assets")).expect("mkdir");
        let config = config_for(&root);
        (root, config)
    }

    #[tokio::test]
    async fn root_serves_index_bytes() {
        let (_root, config) = site_fixture("site-index");
        let resp = route_request("/", false, &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(body_bytes(resp).await.as_ref(), b"<html>index</html>");
    }

    #[tokio::test]
    async fn root_alias_matches_direct_index_request() {
        let (_root, config) = site_fixture("site-alias");
        let via_root = body_bytes(route_request("/", false, &config).await).await;
        let via_name = body_bytes(route_request("/index.html", false, &config).await).await;
        assert_eq!(via_root, via_name);
    }

    #[tokio::test]
    async fn existing_file_is_served_verbatim() {
        let (root, config) = site_fixture("site-file");
        std::fs::write(root.join("notes.txt"), b"plain notes").expect("fixture");
        let resp = route_request("/notes.txt", false, &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/plain; charset=utf-8");
        assert_eq!(body_bytes(resp).await.as_ref(), b"plain notes");
    }

    #[tokio::test]
    async fn percent_encoded_path_serves_existing_file() {
        let (root, config) = site_fixture("site-encoded");
        std::fs::write(root.join("hello world.txt"), b"spaced out").expect("fixture");
        let resp = route_request("/hello%20world.txt", false, &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_bytes(resp).await.as_ref(), b"spaced out");
    }

    #[tokio::test]
    async fn percent_encoded_asset_name_is_served() {
        let (root, config) = site_fixture("site-encoded-asset");
        std::fs::write(
            root.join("attached_assets").join("brand logo.png"),
            b"\x89PNGdata",
        )
        .expect("fixture");
        let resp = route_request("/attached_assets/brand%20logo.png", false, &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(body_bytes(resp).await.as_ref(), b"\x89PNGdata");
    }

    #[tokio::test]
    async fn encoded_traversal_still_redirects_home() {
        let (root, config) = site_fixture("site-enc-traversal");
        std::fs::write(
            root.parent().expect("parent").join("secret.txt"),
            b"secret",
        )
        .expect("fixture");
        let resp = route_request("/%2e%2e/secret.txt", false, &config).await;
        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers()["Location"], "/");
    }

    #[tokio::test]
    async fn file_with_consecutive_dots_is_served() {
        let (root, config) = site_fixture("site-dots");
        std::fs::write(root.join("a..b.txt"), b"dotted").expect("fixture");
        let resp = route_request("/a..b.txt", false, &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_bytes(resp).await.as_ref(), b"dotted");
    }

    #[tokio::test]
    async fn missing_file_redirects_home_not_404() {
        let (_root, config) = site_fixture("site-redirect");
        let resp = route_request("/does-not-exist.txt", false, &config).await;
        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers()["Location"], "/");
    }

    #[tokio::test]
    async fn traversal_attempt_also_redirects_home() {
        let (root, config) = site_fixture("site-traversal");
        std::fs::write(
            root.parent().expect("parent").join("secret.txt"),
            b"secret",
        )
        .expect("fixture");
        let resp = route_request("/../secret.txt", false, &config).await;
        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers()["Location"], "/");
    }

    #[tokio::test]
    async fn asset_is_served_with_exact_bytes_and_type() {
        let (root, config) = site_fixture("site-asset");
        // 10 bytes starting with the PNG signature
        let logo: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x01";
        assert_eq!(logo.len(), 10);
        std::fs::write(root.join("attached_assets").join("logo.png"), logo).expect("fixture");

        let resp = route_request("/attached_assets/logo.png", false, &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(resp.headers()["Content-Length"], "10");
        assert_eq!(body_bytes(resp).await.as_ref(), logo);
    }

    #[tokio::test]
    async fn missing_asset_is_404_not_redirect() {
        let (_root, config) = site_fixture("site-asset-miss");
        let resp = route_request("/attached_assets/nope.png", false, &config).await;
        assert_eq!(resp.status(), 404);
        assert!(resp.headers().get("Location").is_none());
    }

    #[tokio::test]
    async fn missing_index_is_404() {
        let root = scratch_dir("site-no-index");
        std::fs::create_dir_all(root.join("attached_assets")).expect("mkdir");
        let config = config_for(&root);
        let resp = route_request("/", false, &config).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn head_on_existing_file_has_empty_body() {
        let (_root, config) = site_fixture("site-head");
        let resp = route_request("/", true, &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "18");
        assert!(body_bytes(resp).await.is_empty());
    }
}

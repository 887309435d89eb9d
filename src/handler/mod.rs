//! Request handling shared by both servers
//!
//! Method and body-size checks plus access-log plumbing live here; each
//! server's routing lives in its own submodule.

pub mod settings;
pub mod site;
pub mod static_files;

use crate::http;
use crate::logger::{self, AccessLogEntry};
use chrono::Local;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Response, Version};
use std::net::SocketAddr;
use std::time::Instant;

/// Check HTTP method and return an early response for non-GET/HEAD methods.
/// Returns None when the request should continue to routing.
pub(crate) fn check_http_method(
    method: &Method,
    enable_cors: bool,
) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate a declared Content-Length against the configured cap.
/// Returns a 413 response when the declaration exceeds it.
pub(crate) fn check_body_size(
    headers: &HeaderMap,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Build the access log entry for a finished request
pub(crate) fn access_entry(
    parts: &Parts,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let body_bytes = response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    AccessLogEntry {
        remote_addr: peer_addr.ip().to_string(),
        time: Local::now(),
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(ToString::to_string),
        http_version: version_label(parts.version).to_string(),
        status: response.status().as_u16(),
        body_bytes,
        request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
    }
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::config::{
        Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SettingsConfig,
        SiteConfig,
    };
    use std::path::{Path, PathBuf};

    /// Fresh per-test scratch directory under the system temp dir
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("twinserve-test-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    /// Config pointing both servers at the given scratch root
    pub fn config_for(root: &Path) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                access_log: false,
                show_headers: false,
                access_log_format: "common".to_string(),
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                server_name: "Twinserve/test".to_string(),
                max_body_size: 1024,
            },
            settings: SettingsConfig {
                template: root.join("settings.html").to_string_lossy().into_owned(),
                enable_cors: true,
            },
            site: SiteConfig {
                root: root.to_string_lossy().into_owned(),
                index: "index.html".to_string(),
                assets_dir: root.join("attached_assets").to_string_lossy().into_owned(),
                assets_route: "/attached_assets".to_string(),
            },
        }
    }
}

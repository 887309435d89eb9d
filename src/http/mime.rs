//! MIME type inference
//!
//! Maps a file's extension to the Content-Type sent with it.

use std::path::Path;

/// Infer the MIME Content-Type from a file path's extension.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use twinserve::http::mime::from_path;
/// assert_eq!(from_path(Path::new("index.html")), "text/html; charset=utf-8");
/// assert_eq!(from_path(Path::new("logo.png")), "image/png");
/// assert_eq!(from_path(Path::new("blob")), "application/octet-stream");
/// ```
pub fn from_path(path: &Path) -> &'static str {
    // Extensions are matched case-insensitively, so LOGO.PNG is still a PNG
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        Some("wasm") => "application/wasm",

        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        Some("mp3") => "audio/mpeg",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",

        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",

        _ => "application/octet-stream",
    }
}

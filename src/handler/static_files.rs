//! Filesystem loading for the static routes
//!
//! Reads files for the route dispatchers and infers their MIME type. Callers
//! decide what a miss means (404 or redirect), so loaders only return Option.

use crate::http::mime;
use crate::logger;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Load a file at `path` relative to `dir`, refusing paths that escape it.
///
/// The request path is percent-decoded segment by segment before joining, so
/// `/hello%20world.txt` reaches `hello world.txt` on disk. Misses are routine
/// (they become 404s or redirects upstream) and are not logged; rejected
/// paths and read failures are.
pub async fn load_from_directory(dir: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    let Some(relative) = sanitize_path(path) else {
        logger::log_warning(&format!("Rejected request path: {path}"));
        return None;
    };
    let file_path = Path::new(dir).join(relative);

    let dir_canonical = match Path::new(dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Serve directory not found or inaccessible '{dir}': {e}"
            ));
            return None;
        }
    };

    let Ok(file_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_canonical.starts_with(&dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {path} -> {}",
            file_canonical.display()
        ));
        return None;
    }
    if file_canonical.is_dir() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::from_path(&file_canonical);
    Some((content, content_type))
}

/// Load a single file by its configured path
pub async fn load_single_file(file_path: &str) -> Option<(Vec<u8>, &'static str)> {
    let path = Path::new(file_path);
    let content = fs::read(path).await.ok()?;
    Some((content, mime::from_path(path)))
}

/// Turn a request path into a safe relative path.
///
/// Each segment is percent-decoded on its own; a segment that decodes to
/// `..`, contains a separator, or carries a malformed escape rejects the
/// whole path. Literal dots inside names (`a..b.txt`) pass through.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        let decoded = percent_decode(segment)?;
        if decoded == ".." || decoded.contains('/') || decoded.contains('\0') {
            return None;
        }
        relative.push(decoded);
    }
    Some(relative)
}

/// Decode percent escapes in one path segment
fn percent_decode(segment: &str) -> Option<String> {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = std::str::from_utf8(bytes.get(i + 1..i + 3)?).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

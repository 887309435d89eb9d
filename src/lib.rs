//! Shared library for the two twinserve binaries.
//!
//! - `settings_server` serves one fixed settings page at `/` and `/settings.html`.
//! - `file_server` serves files from a site root, with a dedicated assets route
//!   and a redirect-to-`/` fallback on the catch-all route.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

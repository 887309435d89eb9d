// Configuration types module
// Defines the configuration structures shared by both binaries

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub settings: SettingsConfig,
    pub site: SiteConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format: `common` (CLF) or `json`
    pub access_log_format: String,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Settings page server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    /// Path of the settings page template file
    pub template: String,
    /// Send CORS headers and answer preflight requests
    pub enable_cors: bool,
}

/// Static site server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Directory the catch-all route serves from
    pub root: String,
    /// File served for `/`, relative to `root`
    pub index: String,
    /// Directory backing the assets route
    pub assets_dir: String,
    /// URL prefix of the assets route
    pub assets_route: String,
}

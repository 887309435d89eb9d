// Configuration module entry point
// Layered load: optional config file, environment variables, code defaults

mod types;

use std::net::SocketAddr;

pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SettingsConfig, SiteConfig,
};

impl Config {
    /// Load configuration from the default `config.toml` (if present),
    /// `TWINSERVE_`-prefixed environment variables, and built-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("TWINSERVE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Twinserve/0.1")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("settings.template", "settings.html")?
            .set_default("settings.enable_cors", true)?
            .set_default("site.root", ".")?
            .set_default("site.index", "index.html")?
            .set_default("site.assets_dir", "attached_assets")?
            .set_default("site.assets_route", "/attached_assets")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn defaults_cover_both_servers() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.settings.template, "settings.html");
        assert!(cfg.settings.enable_cors);
        assert_eq!(cfg.site.root, ".");
        assert_eq!(cfg.site.index, "index.html");
        assert_eq!(cfg.site.assets_dir, "attached_assets");
        assert_eq!(cfg.site.assets_route, "/attached_assets");
        assert_eq!(cfg.logging.access_log_format, "common");
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn socket_addr_parses_defaults() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        let addr = cfg.socket_addr().expect("default address should parse");
        assert_eq!(addr.port(), 5000);
        assert!(addr.ip().is_unspecified());
    }
}

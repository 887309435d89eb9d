//! Access log formats
//!
//! One line per finished request, either `common` (Common Log Format) or
//! `json` structured output.

use chrono::Local;

/// Everything recorded about one request/response pair
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method
    pub method: String,
    /// Request path (without query string)
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Format the entry according to the configured format name.
    /// Unknown names fall back to the common format.
    pub fn format(&self, format: &str) -> String {
        match format {
            "json" => self.format_json(),
            _ => self.format_common(),
        }
    }

    /// Common Log Format (CLF):
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        let request_uri = match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        };
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            request_uri,
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }

    /// JSON structured log line, built by hand to keep the logger
    /// independent of serialization machinery
    fn format_json(&self) -> String {
        let query = self
            .query
            .as_ref()
            .map_or_else(|| "null".to_string(), |q| format!("\"{}\"", escape_json(q)));
        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","path":"{}","query":{},"http_version":"{}","status":{},"body_bytes":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.path),
            query,
            escape_json(&self.http_version),
            self.status,
            self.body_bytes,
            self.request_time_us,
        )
    }
}

/// Escape special characters for JSON string values
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        AccessLogEntry {
            remote_addr: "10.0.0.7".to_string(),
            time: Local::now(),
            method: "GET".to_string(),
            path: "/attached_assets/logo.png".to_string(),
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 10,
            request_time_us: 250,
        }
    }

    #[test]
    fn common_format_is_one_clf_line() {
        let line = sample_entry().format("common");
        assert!(line.starts_with("10.0.0.7 - - ["));
        assert!(line.contains("\"GET /attached_assets/logo.png HTTP/1.1\""));
        assert!(line.ends_with("200 10"));
    }

    #[test]
    fn common_format_appends_query() {
        let mut entry = sample_entry();
        entry.query = Some("v=2".to_string());
        let line = entry.format("common");
        assert!(line.contains("/attached_assets/logo.png?v=2"));
    }

    #[test]
    fn json_format_has_expected_fields() {
        let line = sample_entry().format("json");
        assert!(line.contains(r#""remote_addr":"10.0.0.7""#));
        assert!(line.contains(r#""status":200"#));
        assert!(line.contains(r#""query":null"#));
        assert!(line.contains(r#""body_bytes":10"#));
    }

    #[test]
    fn unknown_format_falls_back_to_common() {
        let line = sample_entry().format("combined");
        assert!(line.contains("\"GET /attached_assets/logo.png HTTP/1.1\""));
    }

    #[test]
    fn json_escapes_quotes_in_path() {
        let mut entry = sample_entry();
        entry.path = "/a\"b".to_string();
        let line = entry.format("json");
        assert!(line.contains(r#""path":"/a\"b""#));
    }
}

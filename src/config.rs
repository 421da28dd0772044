use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for fetching post pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Request timeout in seconds, covering connect and body read
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Maximum number of redirects to follow
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Additional headers, applied after the defaults
    #[serde(default)]
    pub extra_headers: HashMap<String, String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            max_redirects: default_max_redirects(),
            extra_headers: HashMap::new(),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Browser-like request headers, in the order they are sent
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("User-Agent".to_string(), self.user_agent.clone()),
            (
                "Accept".to_string(),
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                    .to_string(),
            ),
            ("Accept-Language".to_string(), self.accept_language.clone()),
            ("Accept-Encoding".to_string(), "gzip, deflate, br".to_string()),
            ("Connection".to_string(), "keep-alive".to_string()),
            ("Upgrade-Insecure-Requests".to_string(), "1".to_string()),
        ];

        for (name, value) in &self.extra_headers {
            match headers
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(header) => header.1 = value.clone(),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        headers
    }
}

/// Default request timeout
fn default_timeout_secs() -> u64 {
    30
}

/// Default user agent (desktop Chrome)
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_max_redirects() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ExtractorConfig::from_json(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, default_user_agent());
        assert_eq!(config.max_redirects, 10);
        assert!(config.extra_headers.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ExtractorConfig::from_json("{timeout_secs:").is_err());
    }

    #[test]
    fn test_default_headers() {
        let headers = ExtractorConfig::default().headers();
        let names: Vec<&str> = headers.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "User-Agent",
                "Accept",
                "Accept-Language",
                "Accept-Encoding",
                "Connection",
                "Upgrade-Insecure-Requests"
            ]
        );
    }

    #[test]
    fn test_extra_headers_override_defaults() {
        let mut config = ExtractorConfig::default();
        config
            .extra_headers
            .insert("accept-language".to_string(), "de-DE".to_string());
        config
            .extra_headers
            .insert("Referer".to_string(), "https://www.instagram.com/".to_string());

        let headers = config.headers();
        assert!(headers.contains(&("Accept-Language".to_string(), "de-DE".to_string())));
        assert!(headers.contains(&(
            "Referer".to_string(),
            "https://www.instagram.com/".to_string()
        )));
        assert_eq!(headers.len(), 7);
    }
}

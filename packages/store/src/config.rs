//! # Site configuration — `munchkin.toml`
//!
//! Where the backend lives and how much of each collection the list views ask for.
//! The web binary embeds the file from the workspace root at build time.
//!
//! ```toml
//! [backend]
//! url = "http://127.0.0.1:8090"
//! health_timeout_ms = 3000
//!
//! [lists]
//! page_size = 50
//! category_scan_limit = 500
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`SiteConfig`] | Top-level config with builder helpers and TOML (de)serialisation. |
//! | [`BackendConfig`] | Backend base URL and the connectivity probe timeout. |
//! | [`ListConfig`] | Page size for paged lists and the number of reviews scanned for categories. |
//!
//! A missing or empty file is equivalent to the defaults shown above.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub lists: ListConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_url")]
    pub url: String,
    /// How long the connectivity probe waits before reporting the server unreachable.
    #[serde(default = "default_health_timeout")]
    pub health_timeout_ms: u64,
}

fn default_url() -> String {
    "http://127.0.0.1:8090".to_string()
}

fn default_health_timeout() -> u64 {
    3000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            health_timeout_ms: default_health_timeout(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Records per page for letters and per-category reviews.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Reviews fetched to derive the category overview.
    #[serde(default = "default_scan_limit")]
    pub category_scan_limit: u32,
}

fn default_page_size() -> u32 {
    50
}

fn default_scan_limit() -> u32 {
    500
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            category_scan_limit: default_scan_limit(),
        }
    }
}

impl SiteConfig {
    /// Default config pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::default().with_backend_url(url)
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend.url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_health_timeout_ms(mut self, ms: u64) -> Self {
        self.backend.health_timeout_ms = ms;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.lists.page_size = page_size.max(1);
        self
    }

    pub fn filename() -> &'static str {
        "munchkin.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.backend.url = config.backend.url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = SiteConfig::from_toml("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.backend.url, "http://127.0.0.1:8090");
        assert_eq!(config.backend.health_timeout_ms, 3000);
        assert_eq!(config.lists.page_size, 50);
        assert_eq!(config.lists.category_scan_limit, 500);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SiteConfig::from_toml(
            r#"
            [backend]
            url = "https://pb.example.com/"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.url, "https://pb.example.com");
        assert_eq!(config.backend.health_timeout_ms, 3000);
        assert_eq!(config.lists, ListConfig::default());
    }

    #[test]
    fn builders_round_trip_through_toml() {
        let config = SiteConfig::new("http://localhost:9000")
            .with_health_timeout_ms(500)
            .with_page_size(20);
        let parsed = SiteConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}

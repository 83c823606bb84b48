//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Where the blog API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub timeouts: Timeouts,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeouts: Timeouts::default(),
        }
    }

    /// Build config from environment variables, all optional:
    ///
    /// - `BLOG_API_URL`: default `http://localhost:3000`
    /// - `BLOG_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BLOG_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("BLOG_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeouts: Timeouts {
                request_secs: env_parse_u64("BLOG_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("BLOG_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        }
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

//! Console configuration.
//!
//! Defaults match the hosted back office. `from_env` overrides them from:
//!
//! - `ADMIN_API_URL`: base URL of the remote API.
//! - `ADMIN_NOTICE_TTL_MS`: how long a notice stays visible, in milliseconds.
//!
//! Log filtering is separate and uses `RUST_LOG`.

use crate::error::ConsoleError;
use resource_sync::notifier::DEFAULT_TTL;
use resource_sync::Mount;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://furbackadmin.onrender.com";
pub const DEFAULT_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub notice_ttl: Duration,
    /// Request channel capacity of each list controller.
    pub buffer_size: usize,
    /// Whether list controllers fetch as soon as they start, or on login.
    pub mount: Mount,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            notice_ttl: DEFAULT_TTL,
            buffer_size: DEFAULT_BUFFER_SIZE,
            mount: Mount::Idle,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConsoleError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConsoleError> {
        let mut config = Self::default();
        if let Some(url) = lookup("ADMIN_API_URL").filter(|url| !url.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(ttl) = lookup("ADMIN_NOTICE_TTL_MS") {
            let millis: u64 = ttl.trim().parse().map_err(|_| {
                ConsoleError::Config(format!("ADMIN_NOTICE_TTL_MS is not a number: {:?}", ttl))
            })?;
            config.notice_ttl = Duration::from_millis(millis);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn with_mount(mut self, mount: Mount) -> Self {
        self.mount = mount;
        self
    }
}

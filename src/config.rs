//! Client configuration
//!
//! The client only needs to know where the inference server lives and which
//! camera to open; everything else (model choice, TTS voice, languages) is
//! the server's business.

use crate::{GlimpseError, Result};

/// Default inference server, matching the backend's development bind address
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Configuration for the capture-and-ask client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the inference server (scheme + host + port, no trailing slash)
    pub server_url: String,

    /// Index of the camera device to open
    pub camera_index: u32,

    /// Buffer size for the command/event channels between UI and orchestrator
    pub channel_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            camera_index: 0,
            channel_buffer_size: 16,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given server URL, normalizing a trailing slash
    pub fn new(server_url: impl Into<String>) -> Result<Self> {
        let mut url = server_url.into();
        while url.ends_with('/') {
            url.pop();
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(GlimpseError::ConfigError(format!(
                "server URL must start with http:// or https://: {}",
                url
            )));
        }
        Ok(Self {
            server_url: url,
            ..Self::default()
        })
    }

    /// Set the camera device index
    pub fn with_camera_index(mut self, index: u32) -> Self {
        self.camera_index = index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.camera_index, 0);
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let config = ClientConfig::new("http://10.0.0.5:5000/").unwrap();
        assert_eq!(config.server_url, "http://10.0.0.5:5000");
    }

    #[test]
    fn test_rejects_bare_host() {
        assert!(ClientConfig::new("10.0.0.5:5000").is_err());
    }
}

//! Configuration schema for PriceCraft.

use serde::{Deserialize, Serialize};

/// Maximum attachment size admitted into a draft, in bytes (10 MiB).
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;
/// Maximum number of attachments in a pending draft.
pub const DEFAULT_MAX_FILES: usize = 5;

/// Root config for the PriceCraft backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PricecraftConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub attachments: AttachmentConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl PricecraftConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> PricecraftConfigBuilder {
        PricecraftConfigBuilder::new()
    }
}

/// Builder for assembling a `PricecraftConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct PricecraftConfigBuilder {
    config: PricecraftConfig,
}

impl PricecraftConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: PricecraftConfig::default(),
        }
    }

    /// Replace the attachment limits.
    pub fn attachments(mut self, attachments: AttachmentConfig) -> Self {
        self.config.attachments = attachments;
        self
    }

    /// Replace the gateway latency settings.
    pub fn gateway(mut self, gateway: GatewayConfig) -> Self {
        self.config.gateway = gateway;
        self
    }

    /// Replace the server bind settings.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Finalize and return the built `PricecraftConfig`.
    pub fn build(self) -> PricecraftConfig {
        self.config
    }
}

/// Limits applied when a file is admitted into a pending draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentConfig {
    /// Maximum size of a single attachment in bytes.
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
    /// MIME types accepted into a draft.
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
    /// Maximum number of attachments in a pending draft.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size_bytes(),
            allowed_types: default_allowed_types(),
            max_files: default_max_files(),
        }
    }
}

/// Simulated latency for the stub analysis backend, in milliseconds.
///
/// A real backend ignores these; the stub sleeps for the configured time
/// before replying so front-ends can exercise their busy state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Delay before a chat reply.
    #[serde(default = "default_chat_delay_ms")]
    pub chat_delay_ms: u64,
    /// Delay before a parse result.
    #[serde(default = "default_parse_delay_ms")]
    pub parse_delay_ms: u64,
    /// Delay before an upload acknowledgement.
    #[serde(default = "default_upload_delay_ms")]
    pub upload_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            chat_delay_ms: default_chat_delay_ms(),
            parse_delay_ms: default_parse_delay_ms(),
            upload_delay_ms: default_upload_delay_ms(),
        }
    }
}

impl GatewayConfig {
    /// Gateway config with all simulated latency disabled.
    pub fn instant() -> Self {
        Self {
            chat_delay_ms: 0,
            parse_delay_ms: 0,
            upload_delay_ms: 0,
        }
    }
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_max_size_bytes() -> u64 {
    DEFAULT_MAX_SIZE_BYTES
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

fn default_allowed_types() -> Vec<String> {
    [
        "application/pdf",
        "application/vnd.ms-excel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "text/csv",
        "image/png",
        "image/jpeg",
        "image/jpg",
    ]
    .iter()
    .map(|kind| kind.to_string())
    .collect()
}

fn default_chat_delay_ms() -> u64 {
    1000
}

fn default_parse_delay_ms() -> u64 {
    1500
}

fn default_upload_delay_ms() -> u64 {
    500
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

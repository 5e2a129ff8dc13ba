// Environment-backed configuration
//
// Secrets come from environment variables (loaded from .env when present)
// and are read once at startup. The server has no config files of its own:
// the MCP host that spawns it passes everything through the environment.

use crate::error::{DevRevMcpError, Result};

/// Default DevRev API host. `DEVREV_API_BASE` overrides it, mainly so tests
/// and staging environments can point the client elsewhere.
pub const DEFAULT_API_BASE: &str = "https://api.devrev.ai";

/// Runtime configuration for the DevRev API client
///
/// Immutable after loading, safe to share.
///
/// Environment Variables:
/// - DEVREV_API_KEY (required): personal access token, sent verbatim in the
///   Authorization header
/// - DEVREV_API_BASE (optional): API host override, defaults to
///   https://api.devrev.ai
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// DevRev personal access token
    pub api_key: String,

    /// Base URL without a trailing slash
    pub base_url: String,
}

impl ApiConfig {
    /// Load configuration from the environment
    ///
    /// Loads .env first (ignored if not found). An empty DEVREV_API_KEY is
    /// treated the same as an unset one.
    ///
    /// # Errors
    /// - DEVREV_API_KEY not set or empty
    pub fn from_env() -> Result<Self> {
        // Load .env file (ignore if not found)
        dotenvy::dotenv().ok();

        let api_key = std::env::var("DEVREV_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DevRevMcpError::Config(
                    "DEVREV_API_KEY environment variable is not set".to_string(),
                )
            })?;

        let base_url = std::env::var("DEVREV_API_BASE")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

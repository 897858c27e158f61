//! Generation backend configuration.

use std::time::Duration;

use songvid_models::ModelKind;

/// Configuration for the generation client.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Full URL of the generation endpoint
    pub endpoint: String,
    /// Model identifier recorded with every clip
    pub model: String,
    /// Optional bearer token for hosted inference
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/generate/ltx".to_string(),
            model: "Lightricks/LTX-Video".to_string(),
            token: None,
            timeout: Duration::from_secs(600),
        }
    }
}

impl GenConfig {
    /// Create config from environment variables, targeting the LTX model.
    pub fn from_env() -> Self {
        Self::from_env_for(ModelKind::Ltx)
    }

    /// Create config from environment variables for a specific model.
    ///
    /// A per-model endpoint variable (`LTX_SERVER`, `MOCHI_SERVER`,
    /// `COG_SERVER`) wins; otherwise the endpoint is derived from
    /// `GPU_SERVER` (or `GPU_BASE`) plus the model's path segment.
    pub fn from_env_for(kind: ModelKind) -> Self {
        let defaults = Self::default();

        let endpoint = endpoint_from_env(kind).unwrap_or(defaults.endpoint);

        Self {
            endpoint,
            model: std::env::var("HF_LTX_MODEL").unwrap_or(defaults.model),
            token: std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout: Duration::from_secs(
                std::env::var("GEN_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
        }
    }
}

/// Resolve the endpoint URL for a model from the environment.
pub fn endpoint_from_env(kind: ModelKind) -> Option<String> {
    let dedicated = match kind {
        ModelKind::Ltx => std::env::var("LTX_SERVER").ok(),
        ModelKind::Mochi => std::env::var("MOCHI_SERVER").ok(),
        ModelKind::Cog => std::env::var("COG_SERVER").ok(),
    };

    dedicated.or_else(|| {
        let base = std::env::var("GPU_SERVER")
            .or_else(|_| std::env::var("GPU_BASE"))
            .ok()?;
        Some(format!("{}{}", base.trim_end_matches('/'), kind.endpoint_path()))
    })
}

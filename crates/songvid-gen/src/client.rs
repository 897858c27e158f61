//! Generation backend HTTP client.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::engine::Engine;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};

use songvid_models::GenerationParams;

use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use crate::types::{BackendRequest, BackendVideoResponse};

/// A clip persisted to disk after a successful backend call.
#[derive(Debug, Clone)]
pub struct GeneratedClip {
    /// Absolute path of the written file
    pub file_path: PathBuf,
    /// File name within the output directory
    pub filename: String,
    /// Size in bytes
    pub bytes: u64,
    /// Parameters actually sent to the backend
    pub params: GenerationParams,
    /// Backend model identifier
    pub model: String,
}

/// Client for the generation backend.
///
/// Performs exactly one request per clip; any non-2xx response or
/// transport failure is surfaced unchanged to the caller.
pub struct GenClient {
    http: Client,
    config: GenConfig,
    last_stamp: AtomicI64,
}

impl GenClient {
    /// Create a new generation client.
    pub fn new(config: GenConfig) -> GenResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenError::Network)?;

        Ok(Self {
            http,
            config,
            last_stamp: AtomicI64::new(0),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> GenResult<Self> {
        Self::new(GenConfig::from_env())
    }

    /// Backend model identifier this client records with clips.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Generate one clip and persist it under `output_dir`.
    ///
    /// The file is named `<prefix>_<millis>.mp4` with a monotonically
    /// increasing timestamp, so clips within a job never collide. On
    /// failure nothing is written.
    pub async fn generate_clip(
        &self,
        prompt: &str,
        params: &GenerationParams,
        output_dir: &Path,
        filename_prefix: &str,
    ) -> GenResult<GeneratedClip> {
        let request = BackendRequest::new(prompt, params);

        debug!(endpoint = %self.config.endpoint, num_frames = params.num_frames, "Requesting clip from backend");

        let mut builder = self.http.post(&self.config.endpoint).json(&request);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(GenError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        let media = if is_json {
            let body: BackendVideoResponse = response.json().await?;
            if !body.success {
                return Err(GenError::MalformedBody(
                    "backend reported success=false".to_string(),
                ));
            }
            let payload = body.video_base64().ok_or_else(|| {
                GenError::MalformedBody("backend response missing video payload".to_string())
            })?;
            BASE64.decode(payload)?
        } else {
            response.bytes().await.map_err(GenError::Network)?.to_vec()
        };

        tokio::fs::create_dir_all(output_dir).await?;

        let filename = format!("{}_{}.mp4", filename_prefix, self.next_stamp());
        let file_path = output_dir.join(&filename);
        tokio::fs::write(&file_path, &media).await?;

        info!(path = %file_path.display(), bytes = media.len(), "Wrote generated clip");

        Ok(GeneratedClip {
            file_path,
            filename,
            bytes: media.len() as u64,
            params: params.clone(),
            model: self.config.model.clone(),
        })
    }

    /// Millisecond timestamp, bumped past the previous one if two calls
    /// land in the same millisecond.
    fn next_stamp(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let mut last = self.last_stamp.load(Ordering::Relaxed);
        loop {
            let stamp = now.max(last + 1);
            match self.last_stamp.compare_exchange(
                last,
                stamp,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return stamp,
                Err(actual) => last = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamps_are_strictly_increasing() {
        let client = GenClient::new(GenConfig::default()).unwrap();
        let a = client.next_stamp();
        let b = client.next_stamp();
        let c = client.next_stamp();
        assert!(a < b && b < c);
    }
}

//! Worker binary: run one song-to-video job described by a JSON file.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use songvid_gen::GenClient;
use songvid_media::FfmpegRunner;
use songvid_pipeline::{run_song_job, JobRequest, PipelineConfig, PipelineContext};
use songvid_queue::AdmissionQueue;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let request_path = std::env::args()
        .nth(1)
        .context("usage: songvid-worker <job-request.json>")?;

    let raw = tokio::fs::read_to_string(&request_path)
        .await
        .with_context(|| format!("reading job request {request_path}"))?;
    let request: JobRequest =
        serde_json::from_str(&raw).with_context(|| format!("parsing job request {request_path}"))?;

    let ctx = PipelineContext {
        config: PipelineConfig::from_env(),
        gen: Arc::new(GenClient::from_env()?),
        queue: AdmissionQueue::new(),
        runner: FfmpegRunner::new()?,
    };

    let manifest = run_song_job(&ctx, request).await?;

    info!(
        job_id = %manifest.job_id,
        job_dir = %manifest.outputs.job_dir.display(),
        "Manifest written"
    );

    Ok(())
}

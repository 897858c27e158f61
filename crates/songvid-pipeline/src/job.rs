//! Job orchestration.
//!
//! One job = plan once, generate one clip per shot (each call passing
//! through the admission queue), run the transform stages in fixed
//! conditional order, write the manifest. The job directory is owned
//! exclusively by its job and is never cleaned up, so partial results
//! stay inspectable after a failure.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use songvid_gen::GenClient;
use songvid_media::{
    attach_audio, burn_subtitles, concat_clips, make_vertical, overlay_logo, LogoPosition,
    TransformRunner, VerticalResolution,
};
use songvid_models::{
    ClipRecord, GenerationParams, JobId, JobManifest, JobOutputs, SongSpec,
};
use songvid_queue::AdmissionQueue;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::planner::plan_shots;

/// Everything a caller can ask of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// The song to render
    pub song: SongSpec,

    /// Audio track to mux under the stitched video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song_file_path: Option<PathBuf>,

    /// Static logo image to composite onto every frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,

    #[serde(default)]
    pub logo_position: LogoPosition,

    /// Subtitle file to hard-burn into the final video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitles_path: Option<PathBuf>,

    /// Also produce a vertically reformatted version
    #[serde(default)]
    pub make_vertical: bool,

    #[serde(default)]
    pub vertical_resolution: VerticalResolution,

    /// Generation parameter overrides for every shot
    #[serde(default)]
    pub generation: GenerationParams,
}

impl JobRequest {
    /// A request with no optional inputs.
    pub fn new(song: SongSpec) -> Self {
        Self {
            song,
            song_file_path: None,
            logo_path: None,
            logo_position: LogoPosition::default(),
            subtitles_path: None,
            make_vertical: false,
            vertical_resolution: VerticalResolution::default(),
            generation: GenerationParams::default(),
        }
    }
}

/// Shared collaborators for job runs.
pub struct PipelineContext<R: TransformRunner> {
    pub config: PipelineConfig,
    pub gen: Arc<GenClient>,
    pub queue: AdmissionQueue,
    pub runner: R,
}

/// Run one job end to end and return its manifest.
///
/// The first failing shot or stage aborts the job; clips and
/// prior-stage outputs already on disk are retained, and no manifest
/// is written on a partial run.
pub async fn run_song_job<R: TransformRunner>(
    ctx: &PipelineContext<R>,
    request: JobRequest,
) -> PipelineResult<JobManifest> {
    request.song.validate()?;

    let job_id = JobId::new();
    let job_dir = ctx.config.jobs_root.join(job_id.as_str());
    let clips_dir = job_dir.join("clips");
    tokio::fs::create_dir_all(&clips_dir).await?;

    let plan = plan_shots(&request.song);
    info!(
        job_id = %job_id,
        shots = plan.len(),
        planned_duration_sec = plan.planned_duration_sec,
        "Planned song"
    );

    let mut outputs = JobOutputs::new(
        job_dir.clone(),
        clips_dir.clone(),
        job_dir.join("concat.txt"),
    );

    // Strictly sequential: the backend is serialized by the queue
    // regardless, and shot order must match plan order.
    for shot in &plan.shots {
        let gen = Arc::clone(&ctx.gen);
        let prompt = shot.prompt.clone();
        let params = request.generation.clone();
        let dir = clips_dir.clone();
        let prefix = format!("shot_{:02}", shot.id);

        let generated = ctx
            .queue
            .submit(async move { gen.generate_clip(&prompt, &params, &dir, &prefix).await })
            .await?
            .map_err(|source| {
                warn!(job_id = %job_id, shot = shot.id, "Clip generation failed");
                PipelineError::ShotFailed {
                    shot: shot.id,
                    source,
                }
            })?;

        outputs.clips.push(ClipRecord {
            shot: shot.clone(),
            file_path: generated.file_path,
            bytes: generated.bytes,
            params: generated.params,
            model: generated.model,
        });
    }

    let clip_paths: Vec<PathBuf> = outputs
        .clips
        .iter()
        .map(|clip| clip.file_path.clone())
        .collect();

    let stitched = job_dir.join("ltx_master.mp4");
    concat_clips(
        &ctx.runner,
        &clip_paths,
        &outputs.concat_file_path,
        &stitched,
    )
    .await?;
    outputs.stitched_video_path = Some(stitched.clone());

    // Each stage consumes the most recent output produced so far.
    let mut current = stitched;

    if let Some(audio) = &request.song_file_path {
        let out = job_dir.join("ltx_with_audio.mp4");
        attach_audio(&ctx.runner, &current, audio, &out).await?;
        outputs.with_audio_path = Some(out.clone());
        current = out;
    }

    if let Some(logo) = &request.logo_path {
        let out = job_dir.join("ltx_with_logo.mp4");
        overlay_logo(&ctx.runner, &current, logo, &out, request.logo_position).await?;
        outputs.with_logo_path = Some(out.clone());
        current = out;
    }

    if request.make_vertical {
        let out = job_dir.join("ltx_vertical.mp4");
        make_vertical(&ctx.runner, &current, &out, request.vertical_resolution).await?;
        outputs.vertical_path = Some(out.clone());
        current = out;
    }

    if let Some(subtitles) = &request.subtitles_path {
        let out = job_dir.join("ltx_with_subs.mp4");
        burn_subtitles(&ctx.runner, &current, subtitles, &out).await?;
        outputs.subtitles_path = Some(out);
    }

    let manifest = JobManifest {
        job_id: job_id.clone(),
        created_at: chrono::Utc::now(),
        lyrics_provided: request.song.lyrics.is_some(),
        song_duration_sec: request.song.song_duration_sec,
        clip_duration_sec: request.song.clip_duration_sec,
        base_style: request.song.base_style.clone(),
        extra_style: request.song.extra_style.clone(),
        generation: request.generation.clone(),
        outputs,
    };

    write_manifest(&job_dir, &manifest).await?;

    info!(job_id = %job_id, "Job complete");
    Ok(manifest)
}

/// Write the manifest atomically: full temp-file write, then rename.
async fn write_manifest(job_dir: &std::path::Path, manifest: &JobManifest) -> PipelineResult<()> {
    let body = serde_json::to_vec_pretty(manifest)?;
    let tmp = job_dir.join("metadata.json.tmp");
    let path = job_dir.join("metadata.json");
    tokio::fs::write(&tmp, &body).await?;
    tokio::fs::rename(&tmp, &path).await?;
    Ok(())
}

//! `generate_video`: render a script into a video asset.

use chrono::Utc;
use serde_json::{Map, Value};

use super::{upstream, SkillName};
use crate::error::{SkillError, UpstreamError};
use crate::providers::VideoGenerator;
use crate::types::{VideoRequest, VideoResult};
use crate::validation::{args_object, validate, FieldKind, FieldSpec};

pub const SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("script_text", FieldKind::Text),
    FieldSpec::required("persona_id", FieldKind::Text),
    FieldSpec::required("video_style", FieldKind::Text),
    FieldSpec::required("aspect_ratio", FieldKind::Text),
    FieldSpec::required("language", FieldKind::Text),
];

impl VideoRequest {
    /// # Errors
    ///
    /// `MissingParameter` / `InvalidParameterType` per [`SCHEMA`].
    pub fn from_args(args: &Map<String, Value>) -> Result<Self, SkillError> {
        let mut args = validate(args, SCHEMA)?;
        Ok(Self {
            script_text: args.take_text("script_text")?,
            persona_id: args.take_text("persona_id")?,
            video_style: args.take_text("video_style")?,
            aspect_ratio: args.take_text("aspect_ratio")?,
            language: args.take_text("language")?,
        })
    }
}

/// Validates `args` and renders a video.
///
/// # Errors
///
/// Validation errors before the generator is called; `UpstreamFailure` if the
/// generator fails or returns no asset id.
pub async fn skill_generate_video<G: VideoGenerator>(
    generator: &G,
    args: &Value,
) -> Result<VideoResult, SkillError> {
    let request = VideoRequest::from_args(args_object(args)?)?;
    generate_video(generator, &request).await
}

/// Renders a video for an already-typed request.
///
/// # Errors
///
/// `UpstreamFailure` if the generator fails or returns an empty asset id.
pub async fn generate_video<G: VideoGenerator>(
    generator: &G,
    request: &VideoRequest,
) -> Result<VideoResult, SkillError> {
    tracing::debug!(
        skill = %SkillName::GenerateVideo,
        persona_id = %request.persona_id,
        video_style = %request.video_style,
        aspect_ratio = %request.aspect_ratio,
        language = %request.language,
        "delegating to video generator"
    );

    let video = generator
        .generate_video(request)
        .await
        .map_err(|e| upstream(SkillName::GenerateVideo, e))?;

    let video_asset_id = video.video_asset_id.trim().to_owned();
    if video_asset_id.is_empty() {
        return Err(upstream(
            SkillName::GenerateVideo,
            UpstreamError::EmptyResult("video generator returned no asset id".to_string()),
        ));
    }

    tracing::info!(
        skill = %SkillName::GenerateVideo,
        video_asset_id = %video_asset_id,
        "generated video"
    );

    Ok(VideoResult {
        video_asset_id,
        persona_id: request.persona_id.clone(),
        video_style: request.video_style.clone(),
        aspect_ratio: request.aspect_ratio.clone(),
        language: request.language.clone(),
        duration_seconds: video.duration_seconds,
        preview_url: video.preview_url,
        created_at: Utc::now(),
    })
}

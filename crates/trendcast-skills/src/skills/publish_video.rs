//! `publish_video`: post (or schedule) a rendered video on a social platform.

use chrono::Utc;
use serde_json::{Map, Value};

use super::{upstream, SkillName};
use crate::error::{SkillError, UpstreamError};
use crate::providers::Publisher;
use crate::types::{PublishRequest, PublishResult, PublishStatus};
use crate::validation::{args_object, validate, FieldKind, FieldSpec};

/// `schedule_time` may be omitted or `null`; both mean "publish now".
pub const SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("platform", FieldKind::Text),
    FieldSpec::required("video_asset_id", FieldKind::Text),
    FieldSpec::required("caption", FieldKind::Text),
    FieldSpec::required("hashtags", FieldKind::TextList),
    FieldSpec::required("schedule_time", FieldKind::Timestamp)
        .nullable()
        .optional(),
];

impl PublishRequest {
    /// Hashtags are normalized on the way in, see [`normalize_hashtags`].
    ///
    /// # Errors
    ///
    /// `MissingParameter` / `InvalidParameterType` per [`SCHEMA`].
    pub fn from_args(args: &Map<String, Value>) -> Result<Self, SkillError> {
        let mut args = validate(args, SCHEMA)?;
        Ok(Self {
            platform: args.take_text("platform")?,
            video_asset_id: args.take_text("video_asset_id")?,
            caption: args.take_text("caption")?,
            hashtags: normalize_hashtags(args.take_text_list("hashtags")?),
            schedule_time: args.take_optional_timestamp("schedule_time")?,
        })
    }
}

/// Validates `args` and publishes the video.
///
/// # Errors
///
/// Validation errors before the publisher is called; `UpstreamFailure` if the
/// publisher fails or returns no post id.
pub async fn skill_publish_video<P: Publisher>(
    publisher: &P,
    args: &Value,
) -> Result<PublishResult, SkillError> {
    let request = PublishRequest::from_args(args_object(args)?)?;
    publish_video(publisher, &request).await
}

/// Publishes an already-typed request.
///
/// Hashtags are normalized before they are sent, whichever entry point built
/// the request. The status is `scheduled` when `schedule_time` is set and
/// `published` otherwise, unless the publisher reports one explicitly.
///
/// # Errors
///
/// `UpstreamFailure` if the publisher fails or returns an empty post id.
pub async fn publish_video<P: Publisher>(
    publisher: &P,
    request: &PublishRequest,
) -> Result<PublishResult, SkillError> {
    let request = &PublishRequest {
        hashtags: normalize_hashtags(request.hashtags.clone()),
        ..request.clone()
    };

    tracing::debug!(
        skill = %SkillName::PublishVideo,
        platform = %request.platform,
        video_asset_id = %request.video_asset_id,
        hashtags = request.hashtags.len(),
        scheduled = request.schedule_time.is_some(),
        "delegating to publisher"
    );

    let receipt = publisher
        .publish(request)
        .await
        .map_err(|e| upstream(SkillName::PublishVideo, e))?;

    let post_id = receipt.post_id.trim().to_owned();
    if post_id.is_empty() {
        return Err(upstream(
            SkillName::PublishVideo,
            UpstreamError::EmptyResult("publisher returned no post id".to_string()),
        ));
    }

    let status = receipt.status.unwrap_or(if request.schedule_time.is_some() {
        PublishStatus::Scheduled
    } else {
        PublishStatus::Published
    });

    tracing::info!(
        skill = %SkillName::PublishVideo,
        platform = %request.platform,
        post_id = %post_id,
        status = ?status,
        "published video"
    );

    Ok(PublishResult {
        platform: request.platform.clone(),
        video_asset_id: request.video_asset_id.clone(),
        post_id,
        post_url: receipt.post_url,
        status,
        scheduled_for: request.schedule_time,
        hashtags: request.hashtags.clone(),
        submitted_at: Utc::now(),
    })
}

/// Trims each tag, strips leading `#`s and drops empty tags. Order is kept.
#[must_use]
pub fn normalize_hashtags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().trim_start_matches('#').trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}

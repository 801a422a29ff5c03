//! Request and response records for the four skills.
//!
//! All timestamps are `DateTime<Utc>` and serialize as RFC 3339 strings.
//! The `*Candidate` / `Generated*` / `Rendered*` / `*Receipt` types are what a
//! collaborator hands back before the skill normalizes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for `fetch_trends`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendQuery {
    pub platform: String,
    pub region: String,
    /// `None` means all categories.
    pub category: Option<String>,
    /// Maximum number of trends to return. Must be greater than zero.
    pub limit: u32,
}

/// A raw trend as reported by a trend provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendCandidate {
    pub topic: String,
    pub score: f64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
}

/// A normalized trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub topic: String,
    pub score: f64,
    pub source: String,
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendMetadata {
    /// Always the `platform` of the originating query.
    pub platform: String,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResponse {
    /// Ordered by score, highest first. Never longer than the query's `limit`.
    pub trends: Vec<TrendResult>,
    pub metadata: TrendMetadata,
}

/// Parameters for `generate_script`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub trend_topic: String,
    pub persona_id: String,
    pub target_duration_seconds: f64,
    pub language: String,
}

/// Script artifact returned by a script generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedScript {
    pub script_text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub estimated_duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptResult {
    pub script_text: String,
    pub title: Option<String>,
    pub trend_topic: String,
    pub persona_id: String,
    pub language: String,
    /// Falls back to the requested target when the generator gives no estimate.
    pub estimated_duration_seconds: f64,
    pub generated_at: DateTime<Utc>,
}

/// Parameters for `generate_video`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRequest {
    pub script_text: String,
    pub persona_id: String,
    pub video_style: String,
    /// e.g. `"16:9"`, `"9:16"`.
    pub aspect_ratio: String,
    pub language: String,
}

/// Video artifact reference returned by a video generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedVideo {
    pub video_asset_id: String,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    /// Opaque id consumed by `publish_video`.
    pub video_asset_id: String,
    pub persona_id: String,
    pub video_style: String,
    pub aspect_ratio: String,
    pub language: String,
    pub duration_seconds: Option<f64>,
    pub preview_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Parameters for `publish_video`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub platform: String,
    pub video_asset_id: String,
    pub caption: String,
    /// Bare tags without a leading `#`. May be empty.
    pub hashtags: Vec<String>,
    /// `None` publishes immediately.
    pub schedule_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Published,
    Scheduled,
}

/// Confirmation returned by a publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub post_id: String,
    #[serde(default)]
    pub post_url: Option<String>,
    #[serde(default)]
    pub status: Option<PublishStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub platform: String,
    pub video_asset_id: String,
    pub post_id: String,
    pub post_url: Option<String>,
    pub status: PublishStatus,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub hashtags: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

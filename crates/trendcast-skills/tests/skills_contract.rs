//! Parameter and response contract tests for the four skills.
//!
//! Collaborators are in-process fakes that count calls, so every test can
//! also assert that a rejected call never reached the collaborator.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use trendcast_skills::{
    fetch_trends, publish_video, skill_fetch_trends, skill_generate_script, skill_generate_video,
    skill_publish_video, GeneratedScript, PublishReceipt, PublishRequest, PublishStatus,
    Publisher, RenderedVideo, ScriptGenerator, ScriptRequest, SkillError, SkillErrorKind,
    SkillName, TrendCandidate, TrendProvider, TrendQuery, UpstreamError, VideoGenerator,
    VideoRequest,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeTrends {
    candidates: Vec<TrendCandidate>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeTrends {
    /// Twenty candidates with descending scores, so any limit below 20 is exercised.
    fn plentiful() -> Self {
        let observed = DateTime::parse_from_rfc3339("2026-02-05T11:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let candidates = (0..20_i32)
            .map(|i| TrendCandidate {
                topic: format!("topic-{i}"),
                score: f64::from(100 - i),
                source: if i % 2 == 0 {
                    Some("hashtag_feed".to_string())
                } else {
                    None
                },
                observed_at: if i % 3 == 0 { Some(observed) } else { None },
            })
            .collect();
        Self {
            candidates,
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TrendProvider for FakeTrends {
    async fn fetch_trends(&self, _query: &TrendQuery) -> Result<Vec<TrendCandidate>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UpstreamError::Rejected("quota exceeded".to_string()));
        }
        Ok(self.candidates.clone())
    }
}

#[derive(Default)]
struct FakeScripts {
    empty: bool,
    calls: AtomicUsize,
}

impl ScriptGenerator for FakeScripts {
    async fn generate_script(
        &self,
        request: &ScriptRequest,
    ) -> Result<GeneratedScript, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let script_text = if self.empty {
            "   ".to_string()
        } else {
            format!("Here is what you need to know about {}.", request.trend_topic)
        };
        Ok(GeneratedScript {
            script_text,
            title: Some(request.trend_topic.clone()),
            estimated_duration_seconds: None,
        })
    }
}

#[derive(Default)]
struct FakeVideos {
    blank_asset: bool,
    calls: AtomicUsize,
}

impl VideoGenerator for FakeVideos {
    async fn generate_video(&self, request: &VideoRequest) -> Result<RenderedVideo, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let video_asset_id = if self.blank_asset {
            "  ".to_string()
        } else {
            format!("asset_{}", request.persona_id)
        };
        Ok(RenderedVideo {
            video_asset_id,
            duration_seconds: Some(58.2),
            preview_url: None,
        })
    }
}

#[derive(Default)]
struct FakePublisher {
    calls: AtomicUsize,
    last_hashtags: std::sync::Mutex<Vec<String>>,
}

impl Publisher for FakePublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_hashtags.lock().unwrap() = request.hashtags.clone();
        Ok(PublishReceipt {
            post_id: "post_42".to_string(),
            post_url: Some("https://youtube.com/shorts/post_42".to_string()),
            status: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn without(mut args: Value, field: &str) -> Value {
    args.as_object_mut().unwrap().remove(field);
    args
}

fn assert_missing(err: &SkillError, field: &str, mention: &str) {
    assert_eq!(
        err.kind(),
        SkillErrorKind::MissingParameter,
        "expected MissingParameter for '{field}', got: {err}"
    );
    assert_eq!(err.field(), Some(field));
    assert!(
        err.to_string().to_lowercase().contains(mention),
        "error message should mention '{mention}': {err}"
    );
}

fn is_iso_timestamp(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok())
}

fn trend_args() -> Value {
    json!({
        "platform": "twitter",
        "region": "us",
        "category": "technology",
        "limit": 10
    })
}

fn script_args() -> Value {
    json!({
        "trend_topic": "AI advancements",
        "persona_id": "persona_001",
        "target_duration_seconds": 60,
        "language": "en"
    })
}

fn video_args() -> Value {
    json!({
        "script_text": "Hello world, this is a test script.",
        "persona_id": "persona_001",
        "video_style": "modern",
        "aspect_ratio": "16:9",
        "language": "en"
    })
}

fn publish_args() -> Value {
    json!({
        "platform": "youtube",
        "video_asset_id": "asset_123",
        "caption": "Check out this video!",
        "hashtags": ["tech", "ai"],
        "schedule_time": null
    })
}

// ---------------------------------------------------------------------------
// fetch_trends
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_trends_accepts_valid_parameters() {
    let provider = FakeTrends::plentiful();
    let result = skill_fetch_trends(&provider, &trend_args()).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn fetch_trends_accepts_null_category() {
    let provider = FakeTrends::plentiful();
    let mut args = trend_args();
    args["category"] = Value::Null;
    assert!(skill_fetch_trends(&provider, &args).await.is_ok());
}

#[tokio::test]
async fn fetch_trends_reports_each_missing_field() {
    for field in ["platform", "region", "category", "limit"] {
        let provider = FakeTrends::plentiful();
        let err = skill_fetch_trends(&provider, &without(trend_args(), field))
            .await
            .unwrap_err();
        assert_missing(&err, field, field);
        assert_eq!(provider.calls(), 0, "provider must not be called");
    }
}

#[tokio::test]
async fn fetch_trends_rejects_non_string_platform() {
    let provider = FakeTrends::plentiful();
    let mut args = trend_args();
    args["platform"] = json!(123);
    let err = skill_fetch_trends(&provider, &args).await.unwrap_err();
    assert_eq!(err.kind(), SkillErrorKind::InvalidParameterType);
    let msg = err.to_string().to_lowercase();
    assert!(msg.contains("platform") && msg.contains("type"), "{msg}");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn fetch_trends_rejects_non_numeric_limit() {
    let provider = FakeTrends::plentiful();
    let mut args = trend_args();
    args["limit"] = json!("ten");
    let err = skill_fetch_trends(&provider, &args).await.unwrap_err();
    assert_eq!(err.kind(), SkillErrorKind::InvalidParameterType);
    assert!(err.to_string().to_lowercase().contains("limit"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn fetch_trends_response_has_required_structure() {
    let provider = FakeTrends::plentiful();
    let args = json!({ "platform": "twitter", "region": "us", "category": "technology", "limit": 5 });
    let response = skill_fetch_trends(&provider, &args).await.unwrap();

    assert!(!response.trends.is_empty());
    assert!(response.trends.len() <= 5);
    assert_eq!(response.metadata.platform, "twitter");

    let value = serde_json::to_value(&response).unwrap();
    assert!(value["trends"].is_array());
    assert!(value["metadata"].is_object());
    assert!(is_iso_timestamp(&value["metadata"]["fetched_at"]));
    for trend in value["trends"].as_array().unwrap() {
        assert!(trend["topic"].is_string());
        assert!(trend["score"].is_number());
        assert!(trend["source"].is_string());
        assert!(
            is_iso_timestamp(&trend["observed_at"]),
            "observed_at must be ISO-8601: {}",
            trend["observed_at"]
        );
    }
}

#[tokio::test]
async fn fetch_trends_never_exceeds_limit() {
    for limit in [1_u32, 3, 10, 20, 50] {
        let provider = FakeTrends::plentiful();
        let query = TrendQuery {
            platform: "reddit".to_string(),
            region: "global".to_string(),
            category: None,
            limit,
        };
        let response = fetch_trends(&provider, &query).await.unwrap();
        assert!(
            response.trends.len() <= limit as usize,
            "{} trends returned for limit {limit}",
            response.trends.len()
        );
    }
}

#[tokio::test]
async fn fetch_trends_echoes_platform_verbatim() {
    for platform in ["tiktok", "YouTube", "x.com"] {
        let provider = FakeTrends::plentiful();
        let mut args = trend_args();
        args["platform"] = json!(platform);
        let response = skill_fetch_trends(&provider, &args).await.unwrap();
        assert_eq!(response.metadata.platform, platform);
    }
}

#[tokio::test]
async fn fetch_trends_orders_highest_score_first() {
    let provider = FakeTrends::plentiful();
    let response = skill_fetch_trends(&provider, &trend_args()).await.unwrap();
    let scores: Vec<f64> = response.trends.iter().map(|t| t.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    assert_eq!(response.trends[0].topic, "topic-0");
}

#[tokio::test]
async fn fetch_trends_returns_empty_list_when_provider_has_nothing() {
    let provider = FakeTrends::default();
    let response = skill_fetch_trends(&provider, &trend_args()).await.unwrap();
    assert!(response.trends.is_empty());
    assert_eq!(response.metadata.platform, "twitter");
}

#[tokio::test]
async fn fetch_trends_typed_entry_rejects_zero_limit() {
    let provider = FakeTrends::plentiful();
    let query = TrendQuery {
        platform: "twitter".to_string(),
        region: "us".to_string(),
        category: None,
        limit: 0,
    };
    let err = fetch_trends(&provider, &query).await.unwrap_err();
    assert_eq!(err.kind(), SkillErrorKind::InvalidParameterType);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn fetch_trends_provider_failure_is_upstream_failure() {
    let provider = FakeTrends::failing();
    let err = skill_fetch_trends(&provider, &trend_args())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SkillError::UpstreamFailure {
            skill: SkillName::FetchTrends,
            source: UpstreamError::Rejected(_)
        }
    ));
    assert!(!err.is_validation());
    assert!(err.field().is_none());
}

#[tokio::test]
async fn non_object_arguments_are_rejected() {
    let provider = FakeTrends::plentiful();
    let err = skill_fetch_trends(&provider, &json!("twitter"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), SkillErrorKind::InvalidParameterType);
    assert_eq!(err.field(), Some("arguments"));
}

// ---------------------------------------------------------------------------
// generate_script
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_script_accepts_valid_parameters() {
    let generator = FakeScripts::default();
    let result = skill_generate_script(&generator, &script_args())
        .await
        .unwrap();
    assert!(result.script_text.contains("AI advancements"));
    assert_eq!(result.persona_id, "persona_001");
    assert_eq!(result.language, "en");
    assert!((result.estimated_duration_seconds - 60.0).abs() < f64::EPSILON);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generate_script_reports_each_missing_field() {
    let cases = [
        ("trend_topic", "topic"),
        ("persona_id", "persona"),
        ("target_duration_seconds", "duration"),
        ("language", "language"),
    ];
    for (field, mention) in cases {
        let generator = FakeScripts::default();
        let err = skill_generate_script(&generator, &without(script_args(), field))
            .await
            .unwrap_err();
        assert_missing(&err, field, mention);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn generate_script_rejects_non_positive_duration() {
    let generator = FakeScripts::default();
    let mut args = script_args();
    args["target_duration_seconds"] = json!(-5);
    let err = skill_generate_script(&generator, &args).await.unwrap_err();
    assert_eq!(err.kind(), SkillErrorKind::InvalidParameterType);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generate_script_empty_output_is_upstream_failure() {
    let generator = FakeScripts {
        empty: true,
        ..FakeScripts::default()
    };
    let err = skill_generate_script(&generator, &script_args())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SkillError::UpstreamFailure {
            source: UpstreamError::EmptyResult(_),
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// generate_video
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_video_accepts_valid_parameters() {
    let generator = FakeVideos::default();
    let result = skill_generate_video(&generator, &video_args())
        .await
        .unwrap();
    assert_eq!(result.video_asset_id, "asset_persona_001");
    assert_eq!(result.aspect_ratio, "16:9");
    assert_eq!(result.duration_seconds, Some(58.2));
}

#[tokio::test]
async fn generate_video_reports_each_missing_field() {
    let cases = [
        ("script_text", "script"),
        ("persona_id", "persona"),
        ("video_style", "style"),
        ("aspect_ratio", "aspect"),
        ("language", "language"),
    ];
    for (field, mention) in cases {
        let generator = FakeVideos::default();
        let err = skill_generate_video(&generator, &without(video_args(), field))
            .await
            .unwrap_err();
        assert_missing(&err, field, mention);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn generate_video_blank_asset_id_is_upstream_failure() {
    let generator = FakeVideos {
        blank_asset: true,
        ..FakeVideos::default()
    };
    let err = skill_generate_video(&generator, &video_args())
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            SkillError::UpstreamFailure {
                skill: SkillName::GenerateVideo,
                source: UpstreamError::EmptyResult(_)
            }
        ),
        "expected EmptyResult, got: {err:?}"
    );
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// publish_video
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_video_accepts_valid_parameters() {
    let publisher = FakePublisher::default();
    let result = skill_publish_video(&publisher, &publish_args())
        .await
        .unwrap();
    assert_eq!(result.post_id, "post_42");
    assert_eq!(result.status, PublishStatus::Published);
    assert!(result.scheduled_for.is_none());
    assert_eq!(result.hashtags, vec!["tech", "ai"]);
}

#[tokio::test]
async fn publish_video_accepts_omitted_schedule_time() {
    let publisher = FakePublisher::default();
    let result = skill_publish_video(&publisher, &without(publish_args(), "schedule_time")).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn publish_video_accepts_valid_schedule_time() {
    let publisher = FakePublisher::default();
    let mut args = publish_args();
    args["hashtags"] = json!(["tech"]);
    args["schedule_time"] = json!("2026-02-05T12:00:00Z");
    let result = skill_publish_video(&publisher, &args).await.unwrap();
    assert_eq!(result.status, PublishStatus::Scheduled);
    assert_eq!(
        result.scheduled_for.map(|t| t.to_rfc3339()),
        Some("2026-02-05T12:00:00+00:00".to_string())
    );
}

#[tokio::test]
async fn publish_video_reports_each_missing_field() {
    let cases = [
        ("platform", "platform"),
        ("video_asset_id", "asset"),
        ("caption", "caption"),
        ("hashtags", "hashtag"),
    ];
    for (field, mention) in cases {
        let publisher = FakePublisher::default();
        let err = skill_publish_video(&publisher, &without(publish_args(), field))
            .await
            .unwrap_err();
        assert_missing(&err, field, mention);
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn publish_video_rejects_delimited_hashtag_string() {
    let publisher = FakePublisher::default();
    let mut args = publish_args();
    args["hashtags"] = json!("tech,ai");
    let err = skill_publish_video(&publisher, &args).await.unwrap_err();
    assert_eq!(err.kind(), SkillErrorKind::InvalidParameterType);
    let msg = err.to_string().to_lowercase();
    assert!(msg.contains("hashtag"), "{msg}");
    assert!(msg.contains("type") && msg.contains("array"), "{msg}");
    assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn publish_video_sends_normalized_hashtags() {
    let publisher = FakePublisher::default();
    let mut args = publish_args();
    args["hashtags"] = json!(["#tech", " ai ", ""]);
    skill_publish_video(&publisher, &args).await.unwrap();
    assert_eq!(*publisher.last_hashtags.lock().unwrap(), vec!["tech", "ai"]);
}

#[tokio::test]
async fn publish_video_typed_entry_normalizes_hashtags() {
    let publisher = FakePublisher::default();
    let request = PublishRequest {
        platform: "youtube".to_string(),
        video_asset_id: "asset_123".to_string(),
        caption: "Check out this video!".to_string(),
        hashtags: vec!["#tech".to_string(), " ".to_string(), "##ai ".to_string()],
        schedule_time: None,
    };
    let result = publish_video(&publisher, &request).await.unwrap();
    assert_eq!(*publisher.last_hashtags.lock().unwrap(), vec!["tech", "ai"]);
    assert_eq!(result.hashtags, vec!["tech", "ai"]);
}

#[tokio::test]
async fn publish_video_accepts_empty_hashtag_list() {
    let publisher = FakePublisher::default();
    let mut args = publish_args();
    args["hashtags"] = json!([]);
    let result = skill_publish_video(&publisher, &args).await.unwrap();
    assert!(result.hashtags.is_empty());
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn skills_chain_from_trend_to_published_post() {
    let trends = FakeTrends::plentiful();
    let scripts = FakeScripts::default();
    let videos = FakeVideos::default();
    let publisher = FakePublisher::default();

    let response = skill_fetch_trends(&trends, &trend_args()).await.unwrap();
    let topic = &response.trends[0].topic;

    let script = skill_generate_script(
        &scripts,
        &json!({
            "trend_topic": topic,
            "persona_id": "persona_001",
            "target_duration_seconds": 30,
            "language": "en"
        }),
    )
    .await
    .unwrap();

    let video = skill_generate_video(
        &videos,
        &json!({
            "script_text": script.script_text,
            "persona_id": script.persona_id,
            "video_style": "modern",
            "aspect_ratio": "9:16",
            "language": script.language
        }),
    )
    .await
    .unwrap();

    let post = skill_publish_video(
        &publisher,
        &json!({
            "platform": "youtube",
            "video_asset_id": video.video_asset_id,
            "caption": script.title,
            "hashtags": [topic],
            "schedule_time": null
        }),
    )
    .await
    .unwrap();

    assert_eq!(post.video_asset_id, "asset_persona_001");
    assert_eq!(post.hashtags, vec![topic.clone()]);
}

//! `fetch_trends`: trending topics for a platform and region.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::{upstream, SkillName};
use crate::error::SkillError;
use crate::providers::TrendProvider;
use crate::types::{TrendCandidate, TrendMetadata, TrendQuery, TrendResponse, TrendResult};
use crate::validation::{args_object, validate, FieldKind, FieldSpec};

/// `category` must be passed but may be `null`.
pub const SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("platform", FieldKind::Text),
    FieldSpec::required("region", FieldKind::Text),
    FieldSpec::required("category", FieldKind::Text).nullable(),
    FieldSpec::required("limit", FieldKind::PositiveInteger),
];

impl TrendQuery {
    /// Builds a query from a JSON argument object.
    ///
    /// # Errors
    ///
    /// `MissingParameter` / `InvalidParameterType` per [`SCHEMA`]. A `limit`
    /// that does not fit in `u32` is an `InvalidParameterType`.
    pub fn from_args(args: &Map<String, Value>) -> Result<Self, SkillError> {
        let mut args = validate(args, SCHEMA)?;
        let raw_limit = args.take_integer("limit")?;
        let limit = u32::try_from(raw_limit).map_err(|_| SkillError::InvalidParameterType {
            field: "limit",
            expected: FieldKind::PositiveInteger.expected(),
            found: format!("number {raw_limit}"),
        })?;
        Ok(Self {
            platform: args.take_text("platform")?,
            region: args.take_text("region")?,
            category: args.take_optional_text("category")?,
            limit,
        })
    }
}

/// Validates `args` and fetches trends.
///
/// # Errors
///
/// Validation errors before the provider is called; `UpstreamFailure` if the
/// provider fails.
pub async fn skill_fetch_trends<P: TrendProvider>(
    provider: &P,
    args: &Value,
) -> Result<TrendResponse, SkillError> {
    let query = TrendQuery::from_args(args_object(args)?)?;
    fetch_trends(provider, &query).await
}

/// Fetches trends for an already-typed query.
///
/// The response holds at most `query.limit` trends, highest score first, and
/// `metadata.platform` is `query.platform` verbatim.
///
/// # Errors
///
/// `InvalidParameterType` if `limit` is zero; `UpstreamFailure` if the
/// provider fails.
pub async fn fetch_trends<P: TrendProvider>(
    provider: &P,
    query: &TrendQuery,
) -> Result<TrendResponse, SkillError> {
    if query.limit == 0 {
        return Err(SkillError::InvalidParameterType {
            field: "limit",
            expected: FieldKind::PositiveInteger.expected(),
            found: "number 0".to_string(),
        });
    }

    tracing::debug!(
        skill = %SkillName::FetchTrends,
        platform = %query.platform,
        region = %query.region,
        category = ?query.category,
        limit = query.limit,
        "delegating to trend provider"
    );

    let candidates = provider
        .fetch_trends(query)
        .await
        .map_err(|e| upstream(SkillName::FetchTrends, e))?;
    let received = candidates.len();

    let fetched_at = Utc::now();
    let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
    let trends = normalize_trends(candidates, &query.platform, fetched_at, limit);

    tracing::info!(
        skill = %SkillName::FetchTrends,
        platform = %query.platform,
        received,
        returned = trends.len(),
        "fetched trends"
    );

    Ok(TrendResponse {
        trends,
        metadata: TrendMetadata {
            platform: query.platform.clone(),
            fetched_at,
        },
    })
}

/// Drops unusable candidates, fills defaults, orders by score and caps at `limit`.
fn normalize_trends(
    candidates: Vec<TrendCandidate>,
    platform: &str,
    fetched_at: DateTime<Utc>,
    limit: usize,
) -> Vec<TrendResult> {
    let mut trends: Vec<TrendResult> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let topic = candidate.topic.trim();
            if topic.is_empty() || !candidate.score.is_finite() {
                tracing::debug!(topic = %candidate.topic, score = candidate.score, "dropping trend candidate");
                return None;
            }
            let source = candidate
                .source
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| platform.to_owned());
            Some(TrendResult {
                topic: topic.to_owned(),
                score: candidate.score,
                source,
                observed_at: candidate.observed_at.unwrap_or(fetched_at),
            })
        })
        .collect();

    trends.sort_by(|a, b| b.score.total_cmp(&a.score));
    trends.truncate(limit);
    trends
}

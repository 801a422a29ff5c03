//! `generate_script`: a short-form video script for a trending topic.

use chrono::Utc;
use serde_json::{Map, Value};

use super::{upstream, SkillName};
use crate::error::{SkillError, UpstreamError};
use crate::providers::ScriptGenerator;
use crate::types::{ScriptRequest, ScriptResult};
use crate::validation::{args_object, validate, FieldKind, FieldSpec};

pub const SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("trend_topic", FieldKind::Text),
    FieldSpec::required("persona_id", FieldKind::Text),
    FieldSpec::required("target_duration_seconds", FieldKind::PositiveNumber),
    FieldSpec::required("language", FieldKind::Text),
];

impl ScriptRequest {
    /// # Errors
    ///
    /// `MissingParameter` / `InvalidParameterType` per [`SCHEMA`].
    pub fn from_args(args: &Map<String, Value>) -> Result<Self, SkillError> {
        let mut args = validate(args, SCHEMA)?;
        Ok(Self {
            trend_topic: args.take_text("trend_topic")?,
            persona_id: args.take_text("persona_id")?,
            target_duration_seconds: args.take_number("target_duration_seconds")?,
            language: args.take_text("language")?,
        })
    }
}

/// Validates `args` and generates a script.
///
/// # Errors
///
/// Validation errors before the generator is called; `UpstreamFailure` if the
/// generator fails or returns an empty script.
pub async fn skill_generate_script<G: ScriptGenerator>(
    generator: &G,
    args: &Value,
) -> Result<ScriptResult, SkillError> {
    let request = ScriptRequest::from_args(args_object(args)?)?;
    generate_script(generator, &request).await
}

/// Generates a script for an already-typed request.
///
/// # Errors
///
/// `InvalidParameterType` if the target duration is not a positive finite
/// number; `UpstreamFailure` if the generator fails or returns an empty script.
pub async fn generate_script<G: ScriptGenerator>(
    generator: &G,
    request: &ScriptRequest,
) -> Result<ScriptResult, SkillError> {
    let target = request.target_duration_seconds;
    if !(target.is_finite() && target > 0.0) {
        return Err(SkillError::InvalidParameterType {
            field: "target_duration_seconds",
            expected: FieldKind::PositiveNumber.expected(),
            found: format!("number {target}"),
        });
    }

    tracing::debug!(
        skill = %SkillName::GenerateScript,
        trend_topic = %request.trend_topic,
        persona_id = %request.persona_id,
        language = %request.language,
        target_duration_seconds = target,
        "delegating to script generator"
    );

    let script = generator
        .generate_script(request)
        .await
        .map_err(|e| upstream(SkillName::GenerateScript, e))?;

    if script.script_text.trim().is_empty() {
        return Err(upstream(
            SkillName::GenerateScript,
            UpstreamError::EmptyResult("script generator returned an empty script".to_string()),
        ));
    }

    let estimated_duration_seconds = script
        .estimated_duration_seconds
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(target);

    tracing::info!(
        skill = %SkillName::GenerateScript,
        persona_id = %request.persona_id,
        chars = script.script_text.len(),
        estimated_duration_seconds,
        "generated script"
    );

    Ok(ScriptResult {
        script_text: script.script_text,
        title: script.title.filter(|t| !t.trim().is_empty()),
        trend_topic: request.trend_topic.clone(),
        persona_id: request.persona_id.clone(),
        language: request.language.clone(),
        estimated_duration_seconds,
        generated_at: Utc::now(),
    })
}

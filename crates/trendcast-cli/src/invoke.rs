//! Skill invocation for the CLI: argument loading, collaborator wiring and
//! schema rendering.

use std::path::Path;

use anyhow::Context;
use serde_json::{json, Value};
use trendcast_core::{AppConfig, Service};
use trendcast_skills::validation::args_object;
use trendcast_skills::{
    fetch_trends, generate_script, generate_video, publish_video, HttpPublisher,
    HttpScriptGenerator, HttpTrendProvider, HttpVideoGenerator, PublishRequest, ScriptRequest,
    ServiceClient, SkillName, TrendQuery, VideoRequest,
};

/// Parse the skill arguments from `--args` or `--args-file`.
///
/// With neither flag the arguments are an empty object, so the skill reports
/// its first missing parameter.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the text is not valid JSON.
pub(crate) fn read_args(inline: Option<&str>, file: Option<&Path>) -> anyhow::Result<Value> {
    let raw = match (inline, file) {
        (Some(text), _) => text.to_owned(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read arguments from {}", path.display()))?,
        (None, None) => return Ok(json!({})),
    };
    serde_json::from_str(&raw).context("arguments are not valid JSON")
}

/// The collaborator a skill delegates to.
pub(crate) fn service_for(skill: SkillName) -> Service {
    match skill {
        SkillName::FetchTrends => Service::Trends,
        SkillName::GenerateScript => Service::Script,
        SkillName::GenerateVideo => Service::Video,
        SkillName::PublishVideo => Service::Publish,
    }
}

fn build_client(config: &AppConfig, skill: SkillName) -> anyhow::Result<ServiceClient> {
    let service = service_for(skill);
    let endpoint = config.endpoint(service)?;
    let client = ServiceClient::new(
        &endpoint.base_url,
        endpoint.api_key.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
    )
    .with_context(|| format!("failed to build client for {}", service.url_var()))?;
    tracing::debug!(skill = %skill, base_url = %client.base_url(), "invoking skill");
    Ok(client)
}

/// Run `skill` against its configured HTTP collaborator and return the result
/// as JSON.
///
/// Arguments are validated before the collaborator's endpoint is looked up,
/// so a malformed call fails the same way with or without configuration.
///
/// # Errors
///
/// Wraps the skill's `SkillError`, or returns an error if the collaborator is
/// not configured.
pub(crate) async fn run_skill(
    config: &AppConfig,
    skill: SkillName,
    args: &Value,
) -> anyhow::Result<Value> {
    let args = args_object(args)?;

    let output = match skill {
        SkillName::FetchTrends => {
            let query = TrendQuery::from_args(args)?;
            let provider = HttpTrendProvider::new(build_client(config, skill)?);
            serde_json::to_value(fetch_trends(&provider, &query).await?)?
        }
        SkillName::GenerateScript => {
            let request = ScriptRequest::from_args(args)?;
            let generator = HttpScriptGenerator::new(build_client(config, skill)?);
            serde_json::to_value(generate_script(&generator, &request).await?)?
        }
        SkillName::GenerateVideo => {
            let request = VideoRequest::from_args(args)?;
            let generator = HttpVideoGenerator::new(build_client(config, skill)?);
            serde_json::to_value(generate_video(&generator, &request).await?)?
        }
        SkillName::PublishVideo => {
            let request = PublishRequest::from_args(args)?;
            let publisher = HttpPublisher::new(build_client(config, skill)?);
            serde_json::to_value(publish_video(&publisher, &request).await?)?
        }
    };
    Ok(output)
}

pub(crate) fn schema_json(skill: SkillName) -> Value {
    let fields: Vec<Value> = skill
        .schema()
        .iter()
        .map(|field| {
            json!({
                "name": field.name,
                "type": field.kind.expected(),
                "required": field.required,
                "nullable": field.nullable,
            })
        })
        .collect();
    json!({
        "skill": skill.as_str(),
        "description": skill.description(),
        "parameters": fields,
    })
}

//! The four skills. Each one validates, delegates to its collaborator, then
//! normalizes the collaborator's answer.

pub mod fetch_trends;
pub mod generate_script;
pub mod generate_video;
pub mod publish_video;

use std::str::FromStr;

use crate::error::{SkillError, UnknownSkill, UpstreamError};
use crate::validation::FieldSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillName {
    FetchTrends,
    GenerateScript,
    GenerateVideo,
    PublishVideo,
}

impl SkillName {
    pub const ALL: [SkillName; 4] = [
        SkillName::FetchTrends,
        SkillName::GenerateScript,
        SkillName::GenerateVideo,
        SkillName::PublishVideo,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkillName::FetchTrends => "fetch_trends",
            SkillName::GenerateScript => "generate_script",
            SkillName::GenerateVideo => "generate_video",
            SkillName::PublishVideo => "publish_video",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            SkillName::FetchTrends => "Fetch trending topics for a platform and region",
            SkillName::GenerateScript => "Generate a video script for a trending topic",
            SkillName::GenerateVideo => "Render a video from a script",
            SkillName::PublishVideo => "Publish or schedule a rendered video",
        }
    }

    #[must_use]
    pub fn schema(self) -> &'static [FieldSpec] {
        match self {
            SkillName::FetchTrends => fetch_trends::SCHEMA,
            SkillName::GenerateScript => generate_script::SCHEMA,
            SkillName::GenerateVideo => generate_video::SCHEMA,
            SkillName::PublishVideo => publish_video::SCHEMA,
        }
    }
}

impl std::fmt::Display for SkillName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillName {
    type Err = UnknownSkill;

    /// Accepts `snake_case` and `kebab-case`, with or without a `skill_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let bare = normalized.strip_prefix("skill_").unwrap_or(&normalized);
        SkillName::ALL
            .into_iter()
            .find(|skill| skill.as_str() == bare)
            .ok_or_else(|| UnknownSkill(s.to_string()))
    }
}

/// Wrap a collaborator failure, logging it once at the boundary.
fn upstream(skill: SkillName, source: UpstreamError) -> SkillError {
    tracing::warn!(skill = %skill, error = %source, "collaborator call failed");
    SkillError::UpstreamFailure { skill, source }
}

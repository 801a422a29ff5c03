use thiserror::Error;

use crate::skills::SkillName;

/// Errors returned by a skill invocation.
///
/// The two parameter variants are raised before any collaborator is called.
/// Collaborator failures are always wrapped in [`SkillError::UpstreamFailure`].
#[derive(Debug, Error)]
pub enum SkillError {
    /// A required parameter was not supplied.
    #[error("missing required parameter '{field}'")]
    MissingParameter { field: &'static str },

    /// A supplied parameter does not have the expected type or shape.
    #[error("invalid type for parameter '{field}': expected {expected}, got {found}")]
    InvalidParameterType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// The external collaborator behind the skill failed.
    #[error("{skill} upstream failure: {source}")]
    UpstreamFailure {
        skill: SkillName,
        #[source]
        source: UpstreamError,
    },
}

/// Coarse classification of a [`SkillError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillErrorKind {
    MissingParameter,
    InvalidParameterType,
    UpstreamFailure,
}

impl SkillError {
    #[must_use]
    pub fn kind(&self) -> SkillErrorKind {
        match self {
            SkillError::MissingParameter { .. } => SkillErrorKind::MissingParameter,
            SkillError::InvalidParameterType { .. } => SkillErrorKind::InvalidParameterType,
            SkillError::UpstreamFailure { .. } => SkillErrorKind::UpstreamFailure,
        }
    }

    /// The offending parameter, for validation failures.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SkillError::MissingParameter { field }
            | SkillError::InvalidParameterType { field, .. } => Some(field),
            SkillError::UpstreamFailure { .. } => None,
        }
    }

    /// Returns `true` for `MissingParameter` and `InvalidParameterType`.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, SkillError::UpstreamFailure { .. })
    }
}

/// Errors raised by an external collaborator (trend provider, generator, publisher).
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The collaborator answered with an explicit error message.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The collaborator succeeded but returned nothing usable.
    #[error("empty result: {0}")]
    EmptyResult(String),
}

/// Returned by `SkillName::from_str` for an unrecognised skill name.
#[derive(Debug, Error)]
#[error(
    "unknown skill \"{0}\" (expected one of: fetch_trends, generate_script, generate_video, publish_video)"
)]
pub struct UnknownSkill(pub String);

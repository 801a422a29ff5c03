//! Skill boundary layer for the trendcast content pipeline.
//!
//! Four stateless skills (fetch trends, generate a script, render a video,
//! publish it) each validate their parameters against a declared schema,
//! delegate to an external collaborator, and normalize the answer. Validation
//! always completes before a collaborator is called, and collaborator failures
//! surface as [`SkillError::UpstreamFailure`], never as validation errors.

pub mod error;
pub mod providers;
pub mod skills;
pub mod types;
pub mod validation;

pub use error::{SkillError, SkillErrorKind, UnknownSkill, UpstreamError};
pub use providers::{
    HttpPublisher, HttpScriptGenerator, HttpTrendProvider, HttpVideoGenerator, Publisher,
    ScriptGenerator, ServiceClient, TrendProvider, VideoGenerator,
};
pub use skills::fetch_trends::{fetch_trends, skill_fetch_trends};
pub use skills::generate_script::{generate_script, skill_generate_script};
pub use skills::generate_video::{generate_video, skill_generate_video};
pub use skills::publish_video::{publish_video, skill_publish_video};
pub use skills::SkillName;
pub use types::{
    GeneratedScript, PublishReceipt, PublishRequest, PublishResult, PublishStatus, RenderedVideo,
    ScriptRequest, ScriptResult, TrendCandidate, TrendMetadata, TrendQuery, TrendResponse,
    TrendResult, VideoRequest, VideoResult,
};
pub use validation::{validate, FieldKind, FieldSpec, FieldValue, ValidatedArgs};

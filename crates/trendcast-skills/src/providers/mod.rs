//! Collaborator interfaces the skills delegate to, plus HTTP implementations.
//!
//! The traits return `Send` futures so a skill call can be spawned onto a
//! multi-threaded runtime. Implementors may write `async fn` directly.

mod client;
mod http;

use std::future::Future;

pub use client::ServiceClient;
pub use http::{HttpPublisher, HttpScriptGenerator, HttpTrendProvider, HttpVideoGenerator};

use crate::error::UpstreamError;
use crate::types::{
    GeneratedScript, PublishReceipt, PublishRequest, RenderedVideo, ScriptRequest, TrendCandidate,
    TrendQuery, VideoRequest,
};

/// Source of raw trend data.
pub trait TrendProvider: Send + Sync {
    fn fetch_trends(
        &self,
        query: &TrendQuery,
    ) -> impl Future<Output = Result<Vec<TrendCandidate>, UpstreamError>> + Send;
}

/// Language-model (or other) script generator.
pub trait ScriptGenerator: Send + Sync {
    fn generate_script(
        &self,
        request: &ScriptRequest,
    ) -> impl Future<Output = Result<GeneratedScript, UpstreamError>> + Send;
}

/// Video rendering service.
pub trait VideoGenerator: Send + Sync {
    fn generate_video(
        &self,
        request: &VideoRequest,
    ) -> impl Future<Output = Result<RenderedVideo, UpstreamError>> + Send;
}

/// Social-platform publishing API.
pub trait Publisher: Send + Sync {
    fn publish(
        &self,
        request: &PublishRequest,
    ) -> impl Future<Output = Result<PublishReceipt, UpstreamError>> + Send;
}

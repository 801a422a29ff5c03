//! HTTP collaborator clients. Each posts its request to a fixed path under
//! the service's base URL and decodes the documented response body.

use serde::Deserialize;

use super::client::ServiceClient;
use super::{Publisher, ScriptGenerator, TrendProvider, VideoGenerator};
use crate::error::UpstreamError;
use crate::types::{
    GeneratedScript, PublishReceipt, PublishRequest, RenderedVideo, ScriptRequest, TrendCandidate,
    TrendQuery, VideoRequest,
};

/// `{"trends": [...]}` envelope from `POST trends`.
#[derive(Debug, Deserialize)]
struct TrendsEnvelope {
    #[serde(default)]
    trends: Vec<TrendCandidate>,
}

/// Trend provider at `POST {base}/trends`.
#[derive(Debug, Clone)]
pub struct HttpTrendProvider {
    client: ServiceClient,
}

impl HttpTrendProvider {
    #[must_use]
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

impl TrendProvider for HttpTrendProvider {
    async fn fetch_trends(&self, query: &TrendQuery) -> Result<Vec<TrendCandidate>, UpstreamError> {
        let envelope: TrendsEnvelope = self.client.post_json("trends", query).await?;
        Ok(envelope.trends)
    }
}

/// Script generator at `POST {base}/scripts`.
#[derive(Debug, Clone)]
pub struct HttpScriptGenerator {
    client: ServiceClient,
}

impl HttpScriptGenerator {
    #[must_use]
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

impl ScriptGenerator for HttpScriptGenerator {
    async fn generate_script(
        &self,
        request: &ScriptRequest,
    ) -> Result<GeneratedScript, UpstreamError> {
        self.client.post_json("scripts", request).await
    }
}

/// Video generator at `POST {base}/videos`.
#[derive(Debug, Clone)]
pub struct HttpVideoGenerator {
    client: ServiceClient,
}

impl HttpVideoGenerator {
    #[must_use]
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

impl VideoGenerator for HttpVideoGenerator {
    async fn generate_video(&self, request: &VideoRequest) -> Result<RenderedVideo, UpstreamError> {
        self.client.post_json("videos", request).await
    }
}

/// Publisher at `POST {base}/publish`.
#[derive(Debug, Clone)]
pub struct HttpPublisher {
    client: ServiceClient,
}

impl HttpPublisher {
    #[must_use]
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

impl Publisher for HttpPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, UpstreamError> {
        self.client.post_json("publish", request).await
    }
}

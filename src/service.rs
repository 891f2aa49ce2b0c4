use std::sync::Arc;

use crate::builder::RequestBuilder;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CommentParams, ExplainParams, GenerateParams, ModeParams, RenderModel, ReviewParams,
};
use crate::project::project;
use crate::transport::{CompletionTransport, HttpTransport};

/// Facade over the mode-driven pipeline: build the prompt, perform the single
/// network call, validate and project the response. Each call is independent;
/// no state survives between operations.
pub struct CodesmithService {
    transport: Arc<dyn CompletionTransport>,
}

impl CodesmithService {
    pub fn new(cfg: &Config) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(cfg.completion.endpoint_url.clone())),
        }
    }

    /// Seam for tests and alternative endpoints
    pub fn with_transport(transport: Arc<dyn CompletionTransport>) -> Self {
        Self { transport }
    }

    pub async fn generate(&self, params: GenerateParams) -> Result<RenderModel> {
        self.run(ModeParams::Generate(params)).await
    }

    pub async fn explain(&self, params: ExplainParams) -> Result<RenderModel> {
        self.run(ModeParams::Explain(params)).await
    }

    pub async fn review(&self, params: ReviewParams) -> Result<RenderModel> {
        self.run(ModeParams::Review(params)).await
    }

    pub async fn comment(&self, params: CommentParams) -> Result<RenderModel> {
        self.run(ModeParams::Comment(params)).await
    }

    async fn run(&self, params: ModeParams) -> Result<RenderModel> {
        let mode = params.mode();
        tracing::info!(%mode, "Dispatching operation");

        let request = RequestBuilder::build(&params);
        let raw = self
            .transport
            .send(&request)
            .await
            .map_err(|e| e.for_operation(mode))?;

        project(&params, &raw).map_err(|e| {
            tracing::error!(%mode, error = %e, "Projection failed");
            e.for_operation(mode)
        })
    }
}

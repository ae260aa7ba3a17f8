//! The preview pipeline orchestrator.
//!
//! One invocation runs the stage chain
//! fetch → transform → publish → cleanup → dispatch over a single trigger
//! event. Fetch, transform, and publish short-circuit to a 500 result;
//! cleanup always runs (eagerly on success, from the scratch guard's Drop
//! on early exits) and never changes the outcome; a dispatch failure
//! yields a 500 result carrying the dispatcher's error message.

use tracing::{error, info};

use vprev_dispatch::{JobSettings, TranscodeDispatcher};
use vprev_media::{PreviewTransformer, ScratchGuard};
use vprev_models::{AssetId, PipelineResult, StorageEvent, WorkingPaths};
use vprev_storage::ObjectStore;

use crate::config::HandlerConfig;

/// Orchestrates one preview invocation over injected collaborators.
pub struct PreviewPipeline<S, T, D> {
    store: S,
    transformer: T,
    dispatcher: D,
    config: HandlerConfig,
    settings: JobSettings,
}

impl<S, T, D> PreviewPipeline<S, T, D>
where
    S: ObjectStore,
    T: PreviewTransformer,
    D: TranscodeDispatcher,
{
    /// Create a pipeline. The settings template is loaded once by the
    /// caller and held read-only for the process lifetime.
    pub fn new(
        config: HandlerConfig,
        settings: JobSettings,
        store: S,
        transformer: T,
        dispatcher: D,
    ) -> Self {
        Self {
            store,
            transformer,
            dispatcher,
            config,
            settings,
        }
    }

    /// Process one trigger event to completion.
    pub async fn handle(&self, event: &StorageEvent) -> PipelineResult {
        let source = match event.source_object() {
            Ok(source) => source,
            Err(e) => {
                // A malformed event is a trigger-configuration defect
                error!("Rejecting malformed trigger event: {}", e);
                return PipelineResult::failure(400, format!("Invalid trigger event: {}", e));
            }
        };

        // Generated before any external call so partial failures stay
        // correlatable downstream
        let asset_id = AssetId::new();
        info!(
            asset_id = %asset_id,
            bucket = %source.bucket,
            key = %source.key,
            "Starting preview pipeline"
        );

        let paths = WorkingPaths::derive(&self.config.scratch_dir, &asset_id, &source.key);
        if let Err(e) = tokio::fs::create_dir_all(paths.scratch_dir()).await {
            error!(asset_id = %asset_id, "Failed to create scratch directory: {}", e);
            return PipelineResult::failure(500, "Failed to allocate scratch space");
        }
        let guard = ScratchGuard::new(
            paths.scratch_dir().to_path_buf(),
            vec![paths.local_source.clone(), paths.local_preview.clone()],
        );

        if let Err(e) = self
            .store
            .fetch(&source.bucket, &source.key, &paths.local_source)
            .await
        {
            error!(asset_id = %asset_id, "Failed to fetch source video: {}", e);
            return PipelineResult::failure(500, "Failed to fetch source video");
        }

        if let Err(e) = self
            .transformer
            .transform(&paths.local_source, &paths.local_preview)
            .await
        {
            error!(asset_id = %asset_id, "Failed to render preview: {}", e);
            return PipelineResult::failure(500, "Failed to render preview");
        }

        if let Err(e) = self
            .store
            .publish(
                &paths.local_preview,
                &self.config.destination_bucket,
                &paths.preview_key,
            )
            .await
        {
            error!(asset_id = %asset_id, "Failed to publish preview: {}", e);
            return PipelineResult::failure(500, "Failed to publish preview");
        }
        info!(
            asset_id = %asset_id,
            bucket = %self.config.destination_bucket,
            key = %paths.preview_key,
            "Preview published"
        );

        // Scratch files must be gone before dispatch begins
        guard.release().await;

        let settings = self.settings.with_input(&source.uri());
        match self
            .dispatcher
            .submit(&self.config.transcode_role, &asset_id, settings)
            .await
        {
            Ok(job) => {
                info!(asset_id = %asset_id, job_id = %job.id, "Transcode job dispatched");
                PipelineResult::ok()
            }
            Err(e) => {
                error!(asset_id = %asset_id, "Failed to dispatch transcode job: {}", e);
                PipelineResult::failure(500, e.to_string())
            }
        }
    }
}

use crate::ingest::IngestError;
use crate::store::StoreError;

/// Errors that abort a pipeline step
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Raw input could not be read
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),

    /// Store rejected an update
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

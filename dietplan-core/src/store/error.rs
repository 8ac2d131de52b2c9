use thiserror::Error;

/// Errors returned by [`AppStateStore`](super::AppStateStore) operations.
///
/// Persistence failures never show up here; they are logged by the writer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The import text was not a JSON object with the expected slice shapes.
    /// Nothing was changed.
    #[error("Import failed: {0}")]
    Import(String),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/*
 * Responsibility
 * - What the storage layer reports upward
 * - file I/O, JSON and record validation failures
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    // save() refused to persist the collection; the file is left untouched
    #[error("record {id} is incomplete, save aborted")]
    InvalidRecord { id: u64 },
}

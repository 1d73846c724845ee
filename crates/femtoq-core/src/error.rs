use thiserror::Error;

/// Errors surfaced by the queue engine.
///
/// The only failure mode the engine absorbs on its own is a rename losing a
/// claim race to a peer (`std::io::ErrorKind::NotFound` during `pop` or
/// during stale reclaim) — that never reaches this type.
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("node id {0:?} is reserved and cannot be used as a queue node")]
    InvalidNodeId(String),

    #[error("stale timeout must be positive, got {0:?}")]
    InvalidConfig(String),

    #[error("task {0} is not in progress on this node")]
    NotInProgress(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QueueError>;

use std::path::{Path, PathBuf};

use crate::error::{QueueError, Result};
use crate::fs as qfs;

pub const PENDING: &str = "pending";
pub const DONE: &str = "done";
pub const FAILED: &str = "failed";

const RESERVED: [&str; 3] = [PENDING, DONE, FAILED];

/// Owns the on-disk directory structure for one queue engine instance.
///
/// The per-node in-progress directory is the linchpin of the whole design:
/// it lets peers read "who owns this task" straight off `listdir`, with no
/// lock file or database involved.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    node_id: String,
}

impl Layout {
    /// Validate `node_id` and create the four required directories
    /// (`pending`, `done`, `failed`, `<node_id>`) under `root`, idempotently.
    pub fn new(root: impl Into<PathBuf>, node_id: impl Into<String>) -> Result<Self> {
        let root = root.into();
        let node_id = node_id.into();

        if RESERVED.contains(&node_id.as_str()) {
            return Err(QueueError::InvalidNodeId(node_id));
        }

        let layout = Self { root, node_id };

        qfs::ensure_dir(&layout.root)?;
        qfs::ensure_dir(layout.pending_dir())?;
        qfs::ensure_dir(layout.in_progress_dir(&layout.node_id))?;
        qfs::ensure_dir(layout.done_dir())?;
        qfs::ensure_dir(layout.failed_dir())?;

        Ok(layout)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn pending_dir(&self) -> PathBuf {
        self.root.join(PENDING)
    }

    pub fn done_dir(&self) -> PathBuf {
        self.root.join(DONE)
    }

    pub fn failed_dir(&self) -> PathBuf {
        self.root.join(FAILED)
    }

    /// The in-progress directory for an arbitrary node id (self or a peer).
    pub fn in_progress_dir(&self, node_id: &str) -> PathBuf {
        self.root.join(node_id)
    }

    pub fn own_in_progress_dir(&self) -> PathBuf {
        self.in_progress_dir(&self.node_id)
    }

    pub fn is_reserved(name: &str) -> bool {
        RESERVED.contains(&name)
    }
}

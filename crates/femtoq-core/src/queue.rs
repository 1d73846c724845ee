use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{QueueError, Result};
use crate::fs as qfs;
use crate::id;
use crate::layout::Layout;
use crate::reclaimer::StaleReclaimer;

pub const DEFAULT_STALE_TIMEOUT_MS: u64 = 30_000;

/// An immutable task: a sortable id and the exact bytes passed to `push`.
/// No framing or encoding is added or assumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub data: Vec<u8>,
}

/// Construction parameters for a [`Queue`].
pub struct QueueConfig {
    pub root: PathBuf,
    pub node_id: String,
    pub stale_timeout_ms: u64,
    pub clock: Arc<dyn Clock>,
}

impl QueueConfig {
    pub fn new(root: impl AsRef<std::path::Path>, node_id: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            node_id: node_id.into(),
            stale_timeout_ms: DEFAULT_STALE_TIMEOUT_MS,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_stale_timeout_ms(mut self, ms: u64) -> Self {
        self.stale_timeout_ms = ms;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// The queue engine: `push`, `pop`, `done`, `fail`, composed from the
/// directory layout, id generator, and stale reclaimer. The sole
/// synchronization primitive underneath every state transition is atomic
/// same-directory rename; the engine itself holds no lock and spawns no
/// threads.
pub struct Queue {
    layout: Layout,
    clock: Arc<dyn Clock>,
    stale_timeout_micros: u64,
    reclaimer: StaleReclaimer,
}

impl Queue {
    pub fn new(config: QueueConfig) -> Result<Self> {
        if config.stale_timeout_ms == 0 {
            return Err(QueueError::InvalidConfig(format!(
                "{}ms",
                config.stale_timeout_ms
            )));
        }

        let layout = Layout::new(config.root, config.node_id)?;
        info!(
            root = ?layout.root(),
            node_id = layout.node_id(),
            stale_timeout_ms = config.stale_timeout_ms,
            "queue engine constructed",
        );

        Ok(Self {
            layout,
            clock: config.clock,
            stale_timeout_micros: config.stale_timeout_ms * 1_000,
            reclaimer: StaleReclaimer::new(),
        })
    }

    pub fn node_id(&self) -> &str {
        self.layout.node_id()
    }

    pub fn root(&self) -> &std::path::Path {
        self.layout.root()
    }

    /// Generate an id, write the payload into `pending/<id>`, and return the
    /// id. The write goes through a same-directory temp-then-rename so a
    /// concurrent `pop` can never observe a partially written payload.
    pub fn push(&self, data: &[u8]) -> Result<String> {
        let task_id = id::generate(self.clock.now_micros());
        qfs::write_new_file_atomic(self.layout.pending_dir(), &task_id, data)?;
        info!(task = %task_id, bytes = data.len(), "pushed task");
        Ok(task_id)
    }

    /// Claim and return one task, or `None` if the queue (and this node's
    /// own in-progress directory) are both empty. Runs the stale reclaimer
    /// first; that call is internally rate-limited.
    pub fn pop(&self) -> Result<Option<Task>> {
        self.reclaimer
            .maybe_reclaim(&self.layout, self.clock.as_ref(), self.stale_timeout_micros)?;

        loop {
            let Some((src_dir, task_id)) = self.select_candidate()? else {
                return Ok(None);
            };

            let claimed = qfs::try_rename_into(
                &src_dir,
                &self.layout.own_in_progress_dir(),
                &task_id,
            )?;
            if !claimed {
                // A peer claimed (or reclaimed) it first; try the next candidate.
                warn!(task = %task_id, "lost claim race, retrying");
                continue;
            }

            let path = self.layout.own_in_progress_dir().join(&task_id);
            let data = qfs::read_file(&path)?;
            info!(task = %task_id, "claimed task");
            return Ok(Some(Task { id: task_id, data }));
        }
    }

    /// Own in-progress orphans take priority over fresh pending work, so a
    /// restarted node resumes what it was doing before claiming anything new.
    fn select_candidate(&self) -> Result<Option<(PathBuf, String)>> {
        let own_dir = self.layout.own_in_progress_dir();
        if let Some(id) = qfs::list_names_sorted(&own_dir)?.into_iter().next() {
            return Ok(Some((own_dir, id)));
        }

        let pending_dir = self.layout.pending_dir();
        if let Some(id) = qfs::list_names_sorted(&pending_dir)?.into_iter().next() {
            return Ok(Some((pending_dir, id)));
        }

        Ok(None)
    }

    /// Move a claimed task to `done`. Terminal: the core never moves it again.
    pub fn done(&self, task: &Task) -> Result<()> {
        self.complete(task, self.layout.done_dir())
    }

    /// Move a claimed task to `failed`. Terminal: the core never moves it again.
    pub fn fail(&self, task: &Task) -> Result<()> {
        self.complete(task, self.layout.failed_dir())
    }

    fn complete(&self, task: &Task, dst_dir: PathBuf) -> Result<()> {
        let moved = qfs::try_rename_into(
            &self.layout.own_in_progress_dir(),
            &dst_dir,
            &task.id,
        )?;
        if !moved {
            return Err(QueueError::NotInProgress(task.id.clone()));
        }
        info!(task = %task.id, dst = ?dst_dir, "completed task");
        Ok(())
    }
}

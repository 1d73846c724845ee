use std::cell::Cell;

use tracing::{debug, trace, warn};

use crate::clock::Clock;
use crate::error::Result;
use crate::fs as qfs;
use crate::id;
use crate::layout::Layout;

/// Scans peer in-progress directories and returns overdue tasks to
/// `pending`. Rate-limited so the O(peers × tasks) scan runs at most once
/// per `stale_timeout` per engine, not on every `pop`.
#[derive(Debug)]
pub struct StaleReclaimer {
    last_check_micros: Cell<Option<u64>>,
}

impl Default for StaleReclaimer {
    fn default() -> Self {
        Self::new()
    }
}

impl StaleReclaimer {
    pub fn new() -> Self {
        Self {
            last_check_micros: Cell::new(None),
        }
    }

    /// Run a scan if due; no-op otherwise. The first call always scans,
    /// since `last_check_micros` starts unset — this is intentional so a
    /// freshly restarted process detects stale peer claims promptly instead
    /// of waiting out a full timeout window first.
    pub fn maybe_reclaim(
        &self,
        layout: &Layout,
        clock: &dyn Clock,
        stale_timeout_micros: u64,
    ) -> Result<()> {
        let now = clock.now_micros();

        if let Some(last) = self.last_check_micros.get() {
            if now.saturating_sub(last) < stale_timeout_micros {
                return Ok(());
            }
        }
        self.last_check_micros.set(Some(now));

        self.scan(layout, now, stale_timeout_micros)
    }

    fn scan(&self, layout: &Layout, now_micros: u64, stale_timeout_micros: u64) -> Result<()> {
        debug!(root = ?layout.root(), "stale reclaim scan starting");

        for peer in qfs::list_names_sorted(layout.root())? {
            let peer_dir = layout.in_progress_dir(&peer);
            if !peer_dir.is_dir() || Layout::is_reserved(&peer) || peer == layout.node_id() {
                continue;
            }

            for task_name in qfs::list_names_sorted(&peer_dir)? {
                let Some(created_micros) = id::parse_created_micros(&task_name) else {
                    trace!(name = %task_name, peer = %peer, "skipping malformed task name during scan");
                    continue;
                };

                if now_micros.saturating_sub(created_micros) < stale_timeout_micros {
                    continue;
                }

                let reclaimed =
                    qfs::try_rename_into(&peer_dir, &layout.pending_dir(), &task_name)?;
                if reclaimed {
                    warn!(task = %task_name, peer = %peer, "reclaimed stale task to pending");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::fs as qfs;
    use tempfile::tempdir;

    #[test]
    fn reclaims_overdue_task_from_peer_directory() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path(), "node1").unwrap();
        qfs::ensure_dir(layout.in_progress_dir("node2")).unwrap();

        let task_name = id::generate(0);
        qfs::write_new_file_atomic(layout.in_progress_dir("node2"), &task_name, b"stuck").unwrap();

        let clock = MockClock::new(1_000_000);
        let reclaimer = StaleReclaimer::new();
        reclaimer.maybe_reclaim(&layout, &clock, 100).unwrap();

        assert!(layout.pending_dir().join(&task_name).exists());
        assert!(!layout.in_progress_dir("node2").join(&task_name).exists());
    }

    #[test]
    fn does_not_reclaim_fresh_task() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path(), "node1").unwrap();
        qfs::ensure_dir(layout.in_progress_dir("node2")).unwrap();

        let task_name = id::generate(900);
        qfs::write_new_file_atomic(layout.in_progress_dir("node2"), &task_name, b"fresh").unwrap();

        let clock = MockClock::new(1_000);
        let reclaimer = StaleReclaimer::new();
        reclaimer.maybe_reclaim(&layout, &clock, 1_000_000).unwrap();

        assert!(layout.in_progress_dir("node2").join(&task_name).exists());
        assert!(!layout.pending_dir().join(&task_name).exists());
    }

    #[test]
    fn rate_limits_repeated_calls() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path(), "node1").unwrap();
        qfs::ensure_dir(layout.in_progress_dir("node2")).unwrap();

        let clock = MockClock::new(0);
        let reclaimer = StaleReclaimer::new();
        reclaimer.maybe_reclaim(&layout, &clock, 1_000).unwrap();

        // Introduce a stale task after the first scan; within the timeout
        // window the second call must be a no-op (rate limited), not a scan.
        let task_name = id::generate(0);
        qfs::write_new_file_atomic(layout.in_progress_dir("node2"), &task_name, b"x").unwrap();
        clock.set_micros(500); // past staleness, but still inside the rate-limit window since last_check (0)
        reclaimer.maybe_reclaim(&layout, &clock, 1_000).unwrap();

        assert!(layout.in_progress_dir("node2").join(&task_name).exists());
    }

    #[test]
    fn ignores_own_directory_and_reserved_names() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path(), "node1").unwrap();

        let own_task = id::generate(0);
        qfs::write_new_file_atomic(layout.own_in_progress_dir(), &own_task, b"mine").unwrap();

        let clock = MockClock::new(1_000_000);
        let reclaimer = StaleReclaimer::new();
        reclaimer.maybe_reclaim(&layout, &clock, 100).unwrap();

        assert!(layout.own_in_progress_dir().join(&own_task).exists());
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of wall-clock time in microsecond resolution. Injectable so the
/// stale reclaimer can be driven deterministically in tests rather than
/// racing a real timeout.
pub trait Clock: Send + Sync {
    fn now_micros(&self) -> u64;
}

/// Real wall clock, backed by `time::OffsetDateTime::now_utc()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> u64 {
        let now = time::OffsetDateTime::now_utc();
        (now.unix_timestamp_nanos() / 1_000).max(0) as u64
    }
}

/// A clock whose reading is set explicitly, for deterministic tests of the
/// stale-reclaim timeout. Mirrors `original_source/test.py`'s
/// `set_time_mock`/`reset_time_mock` pair, but as a capability object
/// instead of monkeypatching a global.
#[derive(Debug, Default)]
pub struct MockClock {
    micros: AtomicU64,
}

impl MockClock {
    pub fn new(initial_micros: u64) -> Self {
        Self {
            micros: AtomicU64::new(initial_micros),
        }
    }

    pub fn set_micros(&self, micros: u64) {
        self.micros.store(micros, Ordering::SeqCst);
    }

    pub fn advance_micros(&self, delta: u64) {
        self.micros.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_micros(&self) -> u64 {
        self.micros.load(Ordering::SeqCst)
    }
}

//! A minimal, multi-node, durable task queue coordinated entirely through a
//! shared filesystem. Producers `push` opaque byte payloads; workers `pop`,
//! `done`, or `fail` them. The sole mutual-exclusion primitive is atomic
//! same-directory rename: exactly one rename of a given source path can
//! succeed, and that fact alone is what makes claim, completion, and stale
//! reclaim safe without a lock server.
//!
//! See [`Queue`] for the engine, [`QueueConfig`] for construction, and
//! [`clock::Clock`] for how to drive the stale-reclaim timeout
//! deterministically in tests.

pub mod clock;
pub mod error;
mod fs;
mod id;
pub mod layout;
mod reclaimer;
pub mod queue;

pub use clock::{Clock, MockClock, SystemClock};
pub use error::{QueueError, Result};
pub use layout::Layout;
pub use queue::{Queue, QueueConfig, Task, DEFAULT_STALE_TIMEOUT_MS};

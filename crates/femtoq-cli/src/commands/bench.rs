use std::time::Instant;

use anyhow::{Context, Result};
use femtoq_core::{Queue, QueueConfig};

use crate::RootArgs;

/// Push `count` payloads, then drain them with pop+done, reporting
/// throughput for each phase. Mirrors `original_source/benchmark.py`'s
/// push-then-process shape.
pub fn run(root: &RootArgs, count: u64, payload_size: usize) -> Result<()> {
    let queue = Queue::new(QueueConfig::new(&root.root, root.node_id()?))
        .context("failed to construct queue")?;
    let payload = vec![b'x'; payload_size];

    println!("pushing {count} tasks...");
    let start = Instant::now();
    for _ in 0..count {
        queue.push(&payload).context("push failed")?;
    }
    let push_elapsed = start.elapsed();
    println!(
        "pushed in {:.4}s ({:.2} tasks/sec)",
        push_elapsed.as_secs_f64(),
        count as f64 / push_elapsed.as_secs_f64()
    );

    println!("processing tasks (pop + done)...");
    let start = Instant::now();
    let mut processed = 0u64;
    while let Some(task) = queue.pop().context("pop failed")? {
        queue.done(&task).context("done failed")?;
        processed += 1;
    }
    let process_elapsed = start.elapsed();
    println!(
        "processed {processed} in {:.4}s ({:.2} tasks/sec)",
        process_elapsed.as_secs_f64(),
        processed as f64 / process_elapsed.as_secs_f64()
    );

    Ok(())
}

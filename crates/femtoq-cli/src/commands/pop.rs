use anyhow::{Context, Result};
use femtoq_core::{Queue, QueueConfig};

use crate::RootArgs;

pub fn run(root: &RootArgs, stale_timeout_ms: u64) -> Result<()> {
    let queue = Queue::new(
        QueueConfig::new(&root.root, root.node_id()?).with_stale_timeout_ms(stale_timeout_ms),
    )
    .context("failed to construct queue")?;

    match queue.pop().context("failed to pop task")? {
        Some(task) => {
            println!("id: {}", task.id);
            match std::str::from_utf8(&task.data) {
                Ok(text) => println!("data: {text}"),
                Err(_) => println!("data (hex): {}", hex_encode(&task.data)),
            }
        }
        None => println!("queue is empty"),
    }

    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

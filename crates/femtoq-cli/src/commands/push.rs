use std::io::Read;

use anyhow::{Context, Result};
use femtoq_core::{Queue, QueueConfig};

use crate::RootArgs;

pub fn run(root: &RootArgs, data: Option<String>) -> Result<()> {
    let payload = match data.as_deref() {
        Some("-") | None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read payload from stdin")?;
            buf
        }
        Some(s) => s.as_bytes().to_vec(),
    };

    let queue = Queue::new(QueueConfig::new(&root.root, root.node_id()?))
        .context("failed to construct queue")?;
    let id = queue.push(&payload).context("failed to push task")?;

    println!("{id}");
    Ok(())
}

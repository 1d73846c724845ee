use anyhow::{Context, Result};
use femtoq_core::{Queue, QueueConfig, Task};

use crate::RootArgs;

pub fn run(root: &RootArgs, id: &str) -> Result<()> {
    let queue = Queue::new(QueueConfig::new(&root.root, root.node_id()?))
        .context("failed to construct queue")?;

    let task = Task {
        id: id.to_string(),
        data: Vec::new(),
    };
    queue
        .done(&task)
        .with_context(|| format!("failed to mark task {id} done"))?;

    println!("done: {id}");
    Ok(())
}

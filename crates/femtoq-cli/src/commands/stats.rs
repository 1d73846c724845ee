use std::path::{Path, PathBuf};

use anyhow::Result;
use femtoq_core::Layout;

/// Per-bucket task counts: the three reserved buckets plus one entry per
/// in-progress node directory present under the root. Split out from
/// `run` so tests can assert on counts without scraping stdout.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub pending: usize,
    pub done: usize,
    pub failed: usize,
    pub in_progress: Vec<(String, usize)>,
}

pub fn run(root: &Path) -> Result<()> {
    let stats = compute(root)?;
    println!("pending: {}", stats.pending);
    println!("done:    {}", stats.done);
    println!("failed:  {}", stats.failed);
    for (name, count) in &stats.in_progress {
        println!("{name} (in-progress): {count}");
    }
    Ok(())
}

pub fn compute(root: &Path) -> Result<Stats> {
    let in_progress = node_directories(root)?
        .into_iter()
        .map(|name| {
            let count = count_entries(root.join(&name));
            (name, count)
        })
        .collect();

    Ok(Stats {
        pending: count_entries(root.join("pending")),
        done: count_entries(root.join("done")),
        failed: count_entries(root.join("failed")),
        in_progress,
    })
}

fn count_entries(dir: PathBuf) -> usize {
    std::fs::read_dir(&dir)
        .map(|entries| entries.filter_map(|e| e.ok()).count())
        .unwrap_or(0)
}

/// Node directories whose task counts are reported alongside the three
/// reserved buckets. A root that hasn't been touched by a `Queue` yet has
/// none, same as an empty reserved bucket.
fn node_directories(root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !Layout::is_reserved(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

use std::fs;

use anyhow::Result;
use femtoq_cli::{commands, RootArgs};
use tempfile::tempdir;

fn root_args(root: &std::path::Path, node: &str) -> RootArgs {
    RootArgs {
        root: root.to_path_buf(),
        node: Some(node.to_string()),
    }
}

#[test]
fn push_writes_payload_into_pending() -> Result<()> {
    let dir = tempdir()?;
    let root = root_args(dir.path(), "node1");

    commands::push::run(&root, Some("hello".to_string()))?;

    let pending = dir.path().join("pending");
    let entries: Vec<_> = fs::read_dir(&pending)?.collect::<Result<_, _>>()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read(entries[0].path())?, b"hello");
    Ok(())
}

#[test]
fn push_then_pop_then_done_drains_queue() -> Result<()> {
    let dir = tempdir()?;
    let root = root_args(dir.path(), "node1");

    commands::push::run(&root, Some("payload".to_string()))?;
    commands::pop::run(&root, 30_000)?;

    let node_dir = dir.path().join("node1");
    let claimed: Vec<_> = fs::read_dir(&node_dir)?.collect::<Result<_, _>>()?;
    assert_eq!(claimed.len(), 1);

    let id = claimed[0].file_name().to_string_lossy().into_owned();
    commands::done::run(&root, &id)?;

    assert!(dir.path().join("done").join(&id).exists());
    assert!(fs::read_dir(&node_dir)?.next().is_none());
    Ok(())
}

#[test]
fn fail_moves_claimed_task_to_failed_dir() -> Result<()> {
    let dir = tempdir()?;
    let root = root_args(dir.path(), "node1");

    commands::push::run(&root, Some("oops".to_string()))?;
    commands::pop::run(&root, 30_000)?;

    let node_dir = dir.path().join("node1");
    let claimed: Vec<_> = fs::read_dir(&node_dir)?.collect::<Result<_, _>>()?;
    let id = claimed[0].file_name().to_string_lossy().into_owned();

    commands::fail::run(&root, &id)?;
    assert!(dir.path().join("failed").join(&id).exists());
    Ok(())
}

#[test]
fn done_on_unclaimed_id_errors() {
    let dir = tempdir().unwrap();
    let root = root_args(dir.path(), "node1");

    let result = commands::done::run(&root, "0_deadbeefdeadbeef");
    assert!(result.is_err());
}

#[test]
fn stats_reports_on_missing_root_without_erroring() -> Result<()> {
    let dir = tempdir()?;
    let missing_root = dir.path().join("does-not-exist-yet");
    commands::stats::run(&missing_root)
}

#[test]
fn stats_reports_zero_for_every_bucket_on_a_fresh_root() -> Result<()> {
    let dir = tempdir()?;
    let root = root_args(dir.path(), "node1");

    // Touch the root via the core so the reserved directories exist, same
    // as any real node would before its first push.
    femtoq_core::Queue::new(femtoq_core::QueueConfig::new(&root.root, root.node_id()?))?;

    let stats = commands::stats::compute(dir.path())?;
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.done, 0);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.in_progress, vec![("node1".to_string(), 0)]);
    Ok(())
}

#[test]
fn stats_reports_one_in_progress_and_zero_pending_after_push_and_pop() -> Result<()> {
    let dir = tempdir()?;
    let root = root_args(dir.path(), "node1");

    commands::push::run(&root, Some("payload".to_string()))?;
    commands::pop::run(&root, 30_000)?;

    let stats = commands::stats::compute(dir.path())?;
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.done, 0);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.in_progress, vec![("node1".to_string(), 1)]);
    Ok(())
}

#[test]
fn full_cli_parses_and_runs_push_and_pop() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path().to_string_lossy().into_owned();

    femtoq_cli::run([
        "femtoq",
        "push",
        "--root",
        &root,
        "--node",
        "node1",
        "--data",
        "via-cli",
    ])?;

    femtoq_cli::run(["femtoq", "pop", "--root", &root, "--node", "node1"])?;

    let node_dir = dir.path().join("node1");
    let claimed: Vec<_> = fs::read_dir(&node_dir)?.collect::<Result<_, _>>()?;
    assert_eq!(claimed.len(), 1);
    Ok(())
}

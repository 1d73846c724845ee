use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

/// femtoq: a filesystem-coordinated durable task queue.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push a payload onto the queue
    Push {
        #[command(flatten)]
        root: RootArgs,

        /// Payload bytes; reads from stdin if omitted or `-`
        #[arg(long)]
        data: Option<String>,
    },
    /// Claim and print one task
    Pop {
        #[command(flatten)]
        root: RootArgs,

        #[arg(long, default_value_t = femtoq_core::DEFAULT_STALE_TIMEOUT_MS)]
        stale_timeout_ms: u64,
    },
    /// Mark a claimed task done
    Done {
        #[command(flatten)]
        root: RootArgs,

        /// Task id to complete
        id: String,
    },
    /// Mark a claimed task failed
    Fail {
        #[command(flatten)]
        root: RootArgs,

        /// Task id to fail
        id: String,
    },
    /// Print per-state task counts
    Stats {
        /// Queue root directory
        #[arg(long)]
        root: PathBuf,
    },
    /// Push N payloads, then drain them with pop+done, reporting throughput
    Bench {
        #[command(flatten)]
        root: RootArgs,

        /// Number of tasks to push and then process
        #[arg(long, default_value_t = 1_000)]
        count: u64,

        /// Payload size in bytes
        #[arg(long, default_value_t = 100)]
        payload_size: usize,
    },
}

#[derive(clap::Args)]
pub struct RootArgs {
    /// Queue root directory
    #[arg(long)]
    pub root: PathBuf,

    /// This node's id (defaults to the local hostname)
    #[arg(long)]
    pub node: Option<String>,
}

impl RootArgs {
    pub fn node_id(&self) -> Result<String> {
        match &self.node {
            Some(n) => Ok(n.clone()),
            None => Ok(hostname::get()?.to_string_lossy().into_owned()),
        }
    }
}

/// Parse `argv` (including the program name, as `std::env::args` yields it)
/// and dispatch to the matching subcommand.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    match cli.command {
        Commands::Push { root, data } => commands::push::run(&root, data),
        Commands::Pop {
            root,
            stale_timeout_ms,
        } => commands::pop::run(&root, stale_timeout_ms),
        Commands::Done { root, id } => commands::done::run(&root, &id),
        Commands::Fail { root, id } => commands::fail::run(&root, &id),
        Commands::Stats { root } => commands::stats::run(&root),
        Commands::Bench {
            root,
            count,
            payload_size,
        } => commands::bench::run(&root, count, payload_size),
    }
}

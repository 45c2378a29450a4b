//! Development workflows for justified-layout, run as `cargo xtask <task>`.
//!
//! - `test-all run` - Clean pending insta snapshots, then run the workspace tests
//! - `test-all clean` - Remove pending insta snapshots
//! - `test-all status` - List pending insta snapshots
//!
//! Tasks run from the workspace root regardless of where cargo was invoked.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod test_all;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for justified-layout")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run the workspace tests and manage pending snapshots
    TestAll {
        #[command(subcommand)]
        action: test_all::Action,
    },
}

/// The workspace root is the parent of the xtask package.
fn workspace_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = workspace_root()?;
    std::env::set_current_dir(&root)
        .with_context(|| format!("failed to enter workspace root {}", root.display()))?;

    match cli.task {
        Task::TestAll { action } => test_all::run(action),
    }
}

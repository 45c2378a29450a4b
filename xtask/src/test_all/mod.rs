//! Run all tests with proper cleanup.
//!
//! The layout scenario tests and the config tests use insta inline snapshots. A failing
//! snapshot leaves a `.pending-snap` file next to the test source (or a `.snap.new` file for
//! file snapshots). This module:
//! - Cleans up stale pending snapshots before testing
//! - Runs the workspace tests (or specific test filters)
//! - Reports results and leftover pending snapshots
//!
//! ## Commands
//!
//! - `run` - Run all tests with cleanup
//! - `clean` - Clean up all pending snapshots
//! - `status` - Show pending snapshot counts

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Subcommand;

/// Source directories that may contain pending snapshots.
pub const SOURCE_DIRS: &[&str] = &["src", "justified-layout-config/src"];

/// File name suffixes insta uses for snapshots awaiting review.
const PENDING_SUFFIXES: &[&str] = &[".pending-snap", ".snap.new"];

#[derive(Subcommand)]
pub enum Action {
    /// Run all tests with cleanup
    Run {
        /// Only run tests matching this filter
        #[arg(long, short)]
        filter: Option<String>,

        /// Don't clean up pending snapshots before running
        #[arg(long)]
        no_pre_clean: bool,

        /// Clean up pending snapshots after test failures
        #[arg(long)]
        post_clean: bool,

        /// Run tests in release mode
        #[arg(long)]
        release: bool,
    },
    /// Clean up all pending snapshots
    Clean {
        /// Show what would be cleaned without actually cleaning
        #[arg(long)]
        dry_run: bool,
    },
    /// Show pending snapshot counts
    Status,
}

pub fn run(action: Action) -> Result<()> {
    match action {
        Action::Run {
            filter,
            no_pre_clean,
            post_clean,
            release,
        } => run_tests(filter, no_pre_clean, post_clean, release),
        Action::Clean { dry_run } => clean_pending(dry_run),
        Action::Status => show_status(),
    }
}

// =============================================================================
// Test runner
// =============================================================================

fn run_tests(
    filter: Option<String>,
    no_pre_clean: bool,
    post_clean: bool,
    release: bool,
) -> Result<()> {
    println!("Running all tests\n");

    if !no_pre_clean {
        let cleaned = remove_pending()?;
        if cleaned > 0 {
            println!("Cleaned {cleaned} stale pending snapshots\n");
        }
    }

    let mut args = vec!["test".to_owned(), "--workspace".to_owned()];
    if release {
        args.push("--release".to_owned());
    }
    if let Some(filter) = filter {
        args.push("--".to_owned());
        args.push(filter);
    }

    println!("Running: cargo {}\n", args.join(" "));

    let start = Instant::now();
    let status = Command::new("cargo")
        .args(&args)
        .status()
        .context("failed to run cargo test")?;
    let duration = start.elapsed();

    println!();

    if status.success() {
        println!("All tests passed in {:.2}s", duration.as_secs_f64());
        return Ok(());
    }

    println!("Some tests failed (took {:.2}s)", duration.as_secs_f64());

    let pending = find_pending()?;
    if !pending.is_empty() {
        println!("\nFound {} pending snapshots (test output diffs)", pending.len());

        if post_clean {
            let cleaned = remove_pending()?;
            println!("Removed {cleaned} files (--post-clean)");
        } else {
            println!("   To view diffs: cargo insta review");
            println!("   To clean up: cargo xtask test-all clean");
        }
    }

    std::process::exit(1);
}

// =============================================================================
// Cleanup
// =============================================================================

fn clean_pending(dry_run: bool) -> Result<()> {
    let pending = find_pending()?;

    if pending.is_empty() {
        println!("No pending snapshots found");
        return Ok(());
    }

    for path in &pending {
        if dry_run {
            println!("  [dry-run] Would remove: {}", path.display());
        } else {
            println!("  {}", path.display());
            std::fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }

    if dry_run {
        println!("\n[DRY RUN] Would have removed {} files", pending.len());
    } else {
        println!("\nRemoved {} pending snapshots", pending.len());
    }

    Ok(())
}

fn show_status() -> Result<()> {
    let pending = find_pending()?;
    println!("Pending snapshots: {}", pending.len());

    for path in &pending {
        println!("  {}", path.display());
    }

    if !pending.is_empty() {
        println!("\n   View diffs: cargo insta review");
        println!("   Clean up: cargo xtask test-all clean");
    }

    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn is_pending(path: &Path) -> bool {
    let name = path.to_string_lossy();
    PENDING_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

fn collect_pending(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_pending(&path, files)?;
        } else if is_pending(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn find_pending() -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for dir in SOURCE_DIRS {
        let dir = Path::new(dir);
        if dir.exists() {
            collect_pending(dir, &mut files)?;
        }
    }

    files.sort();
    Ok(files)
}

fn remove_pending() -> Result<usize> {
    let files = find_pending()?;

    for path in &files {
        std::fs::remove_file(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }

    Ok(files.len())
}

//! Toc command

use crate::ui::list;
use anyhow::{Context, Result};
use freeze_core::{SnapshotGraph, compute_closure};
use std::path::PathBuf;

/// Compute and print the load-ordered TOC of `entry`.
pub fn toc(entry: &str, graphs: &[PathBuf], json: bool) -> Result<()> {
    let graph = SnapshotGraph::load(graphs).context("Failed to load module graph")?;
    let toc = compute_closure(entry, &graph)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list::toc_json(&toc))?);
    } else {
        list::print_toc(&toc);
    }
    Ok(())
}

//! Configure command

use crate::ConfigureArgs;
use crate::ui::{TermReporter, Theme};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use freeze_core::{ConfigureOptions, SnapshotGraph, SystemInterpreter, freeze_home};

/// Probe the host and write the configuration.
pub async fn configure(args: ConfigureArgs) -> Result<()> {
    let home = freeze_home()?;
    let mut options = ConfigureOptions::new(&home);
    if let Some(path) = args.config {
        options.config_path = path;
    }
    options.archive_entry = args.entry;
    options.tk_module = args.tk_module;
    options.library_dirs = args.library_dirs;
    options.upx_dir = args.upx_dir;

    let graph = SnapshotGraph::load(&args.graphs).context("Failed to load module graph")?;
    let interpreter = SystemInterpreter::locate(&args.interpreter)?;
    let reporter = TermReporter::new();

    eprintln!();
    let config = freeze_core::configure(&options, &graph, &interpreter, &reporter).await?;

    let theme = Theme::default();
    eprintln!();
    eprintln!(
        "  {} wrote {} ({} archive modules)",
        theme.icons.success.with(theme.colors.success),
        options.config_path.display(),
        config.archive_dependencies.len()
    );
    Ok(())
}

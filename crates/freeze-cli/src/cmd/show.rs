//! Show command

use crate::ui::Theme;
use anyhow::{Result, bail};
use crossterm::style::Stylize;
use freeze_core::{ConfigStore, StoreError, config_path};
use freeze_schema::{Capability, Config};
use std::path::PathBuf;

/// Print a summary of the stored configuration.
pub async fn show(config: Option<PathBuf>) -> Result<()> {
    let path = match config {
        Some(path) => path,
        None => config_path()?,
    };
    let store = ConfigStore::new(&path);

    let config = match store.load().await {
        Ok(config) => config,
        Err(StoreError::NotFound(_)) => {
            bail!(
                "No configuration at {}. Run `freeze configure` first.",
                path.display()
            )
        }
        Err(e) => return Err(e.into()),
    };

    render(&config);
    Ok(())
}

fn render(config: &Config) {
    let theme = Theme::default();
    let lw = theme.layout.label_width;
    let or_unknown = |v: Option<String>| v.unwrap_or_else(|| "unknown".to_string());

    println!();
    println!(
        "  {} {}",
        "freeze".white().bold(),
        or_unknown(config.tool_version.clone()).dark_grey()
    );
    println!();
    println!(
        "  {:<lw$}{}",
        "interpreter",
        or_unknown(config.interpreter.as_ref().map(|p| p.display().to_string()))
    );
    println!(
        "  {:<lw$}{}",
        "version",
        or_unknown(config.interpreter_version.clone())
    );
    println!(
        "  {:<lw$}{}",
        "platform",
        or_unknown(config.target_platform.as_ref().map(ToString::to_string))
    );
    let generated = config
        .generated_at
        .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string());
    println!("  {:<lw$}{}", "generated", or_unknown(generated));
    println!("  {:<lw$}{}", "elf exe", config.use_elf_exe);
    println!();

    let tcl_detail = config
        .tcl_tk
        .tcl_root
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let upx_detail = config
        .upx
        .version
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let unicode_detail = config.unicode.module.clone().unwrap_or_default();

    let rows: [(&str, Capability, &str); 6] = [
        ("tcl-tk", config.tcl_tk.status, &tcl_detail),
        ("zlib", config.zlib, ""),
        ("crypt", config.crypt, ""),
        ("resource-update", config.resource_update, ""),
        ("unicode", config.unicode.status, &unicode_detail),
        ("upx", config.upx.status, &upx_detail),
    ];
    for (name, outcome, detail) in rows {
        let (icon, color) = theme.capability(outcome);
        println!(
            "  {} {:<lw$}{} {}",
            icon.with(color),
            name,
            outcome.as_str().with(color),
            detail.dark_grey()
        );
    }

    println!();
    println!(
        "  {:<lw$}{} modules",
        "archive",
        config.archive_dependencies.len()
    );
}

//! TOC output formatting
//!
//! Column-aligned rendering for `freeze toc`.

use super::theme::Theme;
use crossterm::style::Stylize;
use freeze_schema::{ModuleRecord, Toc};
use serde_json::{Value, json};

/// Print column headers for `freeze toc`
pub fn print_toc_header(theme: &Theme) {
    let header = format!(
        "  {:>iw$} {:<nw$} {:<kw$} {}",
        "#",
        "name",
        "kind",
        "origin",
        iw = theme.layout.index_width,
        nw = theme.layout.name_width,
        kw = theme.layout.kind_width,
    );
    println!("{}", header.with(theme.colors.header));
}

/// Padded, unstyled columns for one row: position, name, kind, origin.
fn row_columns(theme: &Theme, index: usize, record: &ModuleRecord) -> [String; 4] {
    let origin = record
        .origin()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    [
        format!("{index:>w$}", w = theme.layout.index_width),
        format!("{:<w$}", record.name.as_str(), w = theme.layout.name_width),
        format!("{:<w$}", record.kind.as_str(), w = theme.layout.kind_width),
        origin,
    ]
}

/// Print a single row for `freeze toc`
pub fn print_toc_row(theme: &Theme, index: usize, record: &ModuleRecord) {
    let [pos, name, kind, origin] = row_columns(theme, index, record);
    println!(
        "  {} {} {} {}",
        pos.dark_grey(),
        name.with(theme.colors.module_name),
        kind.with(theme.kind(record.kind)),
        origin.with(theme.colors.secondary),
    );
}

/// Print footer for `freeze toc`
pub fn print_toc_footer(toc: &Toc) {
    let noun = if toc.len() == 1 { "module" } else { "modules" };
    println!();
    println!("{}", format!("  {} {noun}", toc.len()).dark_grey());
}

/// Print a whole TOC as a table, in load order.
pub fn print_toc(toc: &Toc) {
    let theme = Theme::default();
    println!();
    print_toc_header(&theme);
    for (i, record) in toc.iter().enumerate() {
        print_toc_row(&theme, i + 1, record);
    }
    print_toc_footer(toc);
}

/// JSON form of a TOC for `freeze toc --json`.
///
/// Every entry carries an `origin` key; it is `null` when the module has no
/// file on disk.
pub fn toc_json(toc: &Toc) -> Value {
    toc.iter()
        .map(|record| {
            json!({
                "name": record.name.as_str(),
                "origin": record.origin(),
                "kind": record.kind,
            })
        })
        .collect()
}

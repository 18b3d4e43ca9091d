//! freeze - bundle configuration for interpreted programs
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Computes the load-ordered table of contents (TOC) of modules a program
//! needs, and records what the host can support when bundling it into a
//! standalone executable.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.freeze/
//! ├── config.toml     # Result of the last `freeze configure`
//! └── support/
//!     ├── useUnicode.py   # Generated codec support module
//!     └── loader/         # Per-platform loader stubs
//! ```

pub mod cmd;
pub mod ui;

pub use freeze_core::paths::*;

use clap::{Args, Parser, Subcommand};
use freeze_core::configure::{DEFAULT_ARCHIVE_ENTRY, DEFAULT_TK_MODULE};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "freeze")]
#[command(author, version = env!("FREEZE_VERSION"), about = "freeze - module closure and bundle configuration")]
pub struct Cli {
    /// Log probe and closure progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Probe the host and write the bundle configuration
    Configure(ConfigureArgs),
    /// Print the load-ordered TOC of a module
    Toc {
        /// Entry module name
        entry: String,
        /// Module graph snapshot(s), in search order
        #[arg(long = "graph", short = 'g', required = true)]
        graphs: Vec<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the stored configuration
    Show {
        /// Config file (defaults to ~/.freeze/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// Config file (defaults to ~/.freeze/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Module graph snapshot(s), in search order
    #[arg(long = "graph", short = 'g', required = true)]
    pub graphs: Vec<PathBuf>,
    /// Entry module of the archive support code
    #[arg(long, default_value = DEFAULT_ARCHIVE_ENTRY)]
    pub entry: String,
    /// Toolkit module used to locate TCL/TK
    #[arg(long, default_value = DEFAULT_TK_MODULE)]
    pub tk_module: String,
    /// Extra directory to search for the TCL shared library
    #[arg(long = "library-dir")]
    pub library_dirs: Vec<PathBuf>,
    /// Interpreter to configure for
    #[arg(long, env = "FREEZE_INTERPRETER", default_value = "python3")]
    pub interpreter: PathBuf,
    /// Directory containing the upx executable
    #[arg(long, env = "FREEZE_UPX_DIR")]
    pub upx_dir: Option<PathBuf>,
}

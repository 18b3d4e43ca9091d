//! Core library for freeze.
//!
//! Builds load-ordered module TOCs from an import graph and records what the
//! host can support when bundling a program into a standalone executable.

pub mod closure;
pub mod configure;
pub mod graph;
pub mod interpreter;
pub mod paths;
pub mod probes;
pub mod store;

pub mod reporter;

pub use closure::{ClosureError, compute_closure};
pub use configure::{ConfigureOptions, configure};
pub use graph::{GraphError, GraphProvider, SnapshotGraph};
pub use interpreter::{Interpreter, SystemInterpreter};
pub use paths::*;
pub use reporter::{NullReporter, Reporter};
pub use store::{ConfigStore, StoreError};

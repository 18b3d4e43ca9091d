//! Shared types for freeze.
//!
//! Everything the graph provider, the closure builder and the config store
//! exchange lives here, so that each of them agrees on one wire format.

pub mod capability;
pub mod config;
pub mod module;
pub mod platform;
pub mod toc;

// Re-exports
pub use capability::Capability;
pub use config::{CONFIG_VERSION, Config, TclTkConfig, UnicodeConfig, UpxConfig};
pub use module::{ImportEdge, ModuleKind, ModuleName, ModuleRecord};
pub use platform::Platform;
pub use toc::Toc;

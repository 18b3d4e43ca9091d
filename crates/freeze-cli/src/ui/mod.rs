//! Terminal output.
//!
//! Commands never style text themselves: probe progress goes through
//! [`TermReporter`], tables through [`list`], and both take their colors and
//! icons from [`Theme`].

pub mod list;
pub mod reporter;
pub mod theme;

pub use reporter::TermReporter;
pub use theme::Theme;

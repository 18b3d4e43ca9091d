pub mod configure;
pub mod show;
pub mod toc;

//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod renderer;

pub use deps::ServerDeps;
pub use renderer::LinkRenderer;

//! Renderers for derived dashboard pages

pub mod console;
pub mod composite;

// Re-export for convenience
pub use console::ConsoleEventHandler;
pub use composite::CompositeEventHandler;

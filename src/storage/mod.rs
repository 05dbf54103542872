//! Output persistence for generated bibliographies.

pub mod local;

// Re-export for convenience
pub use local::LocalStorage;

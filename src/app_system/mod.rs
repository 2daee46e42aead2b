//! System orchestration, startup, and shutdown logic.

pub mod inventix_system;
pub mod tracing;

pub use inventix_system::*;
pub use tracing::*;

//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (`requestAnimationFrame` on web)
//! - Storage (LocalStorage on web)

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod raf;

#[cfg(target_arch = "wasm32")]
pub use raf::RafScheduler;

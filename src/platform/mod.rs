//! Platform abstraction layer
//!
//! Handles the pieces that sit between the host and the simulation:
//! - Held-key input, sampled once per tick
//! - Frame clock (time base with pause rebasing)
//! - Key-value storage (memory, JSON file, LocalStorage on web)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{HeldKeys, MoveKey};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use time::FrameClock;

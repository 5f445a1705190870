// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing storage implementations.
//!
//! This module contains concrete implementations of the storage trait defined in
//! the ports layer.

#[cfg(feature = "file")]
pub mod file;
pub mod memory;

// Re-export adapters based on feature flags
#[cfg(feature = "file")]
pub use file::FileStorage;
pub use memory::MemoryStorage;

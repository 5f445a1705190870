// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the traits the configuration model is consumed through.
//! They are implemented by adapters in the adapters layer.

pub mod storage;

// Re-export commonly used types
pub use storage::ConfigStorage;

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration tests.

use std::sync::Once;

static TRACING: Once = Once::new();

/// The document most scenarios start from.
#[allow(dead_code)]
pub const SAMPLE: &str = "# Sample configuration\n\
                          answer = 42\n\
                          pi = 3.14\n\
                          \n\
                          ## Flags\n\
                          is_active = true\n\
                          quotes = a\\nb";

/// Routes library logs to the test output, once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    });
}

/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, util::TryInitError, EnvFilter};

fn filter_layer() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Install a global subscriber logging to `stdout` and respecting the `RUST_LOG`
/// environment variable.
///
/// If the environment variable is not set, the "info" level is used. Returns an error if
/// a global subscriber is already installed.
pub fn init_subscriber() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter_layer())
        .with(fmt::layer().with_target(true))
        .try_init()
}

/// Create a subscriber for tests.
///
/// The returned guard only installs the subscriber for the current thread, so test
/// threads do not conflict with one another.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    tracing_subscriber::registry()
        .with(filter_layer())
        .with(fmt::layer().with_target(true).with_test_writer())
        .set_default()
}

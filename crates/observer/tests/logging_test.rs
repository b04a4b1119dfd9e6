// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use balance_observer::logging::{self, LoggingConfig, LoggingError};

// One global subscriber per process, so everything runs in a single test.
#[test]
fn test_file_logging_and_single_init() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("observer-logs");
    let write_path = path.to_string_lossy().to_string();

    let config = || LoggingConfig {
        level: "info",
        json_format: true,
        strip_ansi: true,
        write_to_file: true,
        write_path: &write_path,
        write_max_file_size: 1024 * 1024,
        write_max_files: 2,
        loki_url: None,
    };

    let guard = logging::init_with_config(config())?;
    tracing::info!(chain = "polkadot", "Chain router started");
    drop(guard);

    let contents = std::fs::read_to_string(path.join("logs.log"))?;
    assert!(contents.contains("Chain router started"));
    assert!(contents.contains("polkadot"));

    assert!(matches!(
        logging::init_with_config(config()),
        Err(LoggingError::AlreadyInitialized(_))
    ));
    Ok(())
}

// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing_subscriber::{EnvFilter, Registry, prelude::*};

/// Output format of the console logger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Installs the global subscriber. Filtering follows `RUST_LOG` when it is
/// set and [`default_env_filter`] otherwise.
pub fn setup_logger(format: LogFormat, color: bool) {
    let layer: Box<dyn tracing_subscriber::layer::Layer<Registry> + Send + Sync> = match format {
        LogFormat::Text => Box::new(
            tracing_subscriber::fmt::Layer::new()
                .with_ansi(color)
                .with_filter(get_env_filter(default_env_filter())),
        ),
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::Layer::new()
                .json()
                .with_filter(get_env_filter(default_env_filter())),
        ),
    };
    tracing_subscriber::registry().with(layer).init();
}

/// Returns an [`EnvFilter`] according to the `RUST_LOG` environment variable, or `def`.
///
/// Note that [`tracing_subscriber::filter::Builder`] only allows a single default directive,
/// whereas we want to provide multiple.
fn get_env_filter(def: EnvFilter) -> EnvFilter {
    use std::env::{
        self,
        VarError::{NotPresent, NotUnicode},
    };
    match env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV) {
        Ok(s) => EnvFilter::new(s),
        Err(NotPresent) => def,
        Err(NotUnicode(_)) => EnvFilter::default(),
    }
}

/// `info` for the indexer, quieter for the database driver which logs every
/// statement.
pub fn default_env_filter() -> EnvFilter {
    let default_directives = ["info", "sqlx=warn", "sqlx::query=off"];
    EnvFilter::new(default_directives.join(","))
}

#[test]
fn test_default_env_filter() {
    let filter = default_env_filter().to_string();
    assert!(filter.contains("sqlx::query=off"));
}

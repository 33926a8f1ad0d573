// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::requeue::DEFAULT_ERROR_REQUEUE_SECS;
use crate::error::{ReplicatorError, Result};
use std::env;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Only watch source secrets in this namespace, all namespaces when unset
    pub watch_namespace: Option<String>,
    /// Retry delay for failed passes that carry no requeue interval of their own
    pub error_requeue_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            watch_namespace: None,
            error_requeue_interval: Duration::from_secs(DEFAULT_ERROR_REQUEUE_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let watch_namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.trim().is_empty());

        let error_requeue_interval = match lookup("ERROR_REQUEUE_SECONDS") {
            None => Duration::from_secs(DEFAULT_ERROR_REQUEUE_SECS),
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    ReplicatorError::Config(format!("ERROR_REQUEUE_SECONDS '{}': {}", raw, e))
                })?;
                if secs == 0 {
                    return Err(ReplicatorError::Config(
                        "ERROR_REQUEUE_SECONDS must be greater than 0".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
        };

        Ok(Config {
            watch_namespace,
            error_requeue_interval,
        })
    }
}

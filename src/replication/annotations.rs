// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Annotation codec: reads the replication settings off a source secret.

use crate::constants::annotations;
use crate::constants::requeue::DEFAULT_RECONCILE_INTERVAL_SECS;
use crate::replication::duration::parse_go_duration;
use k8s_openapi::api::core::v1::Secret;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::warn;

/// Replication settings derived from a secret's annotations.
///
/// Never persisted, recomputed on every reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationConfig {
    pub replication_enabled: bool,
    pub allowed_namespaces: Vec<String>,
    pub excluded_namespaces: Vec<String>,
    pub reconcile_interval: Duration,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        ReplicationConfig {
            replication_enabled: false,
            allowed_namespaces: Vec::new(),
            excluded_namespaces: Vec::new(),
            reconcile_interval: default_reconcile_interval(),
        }
    }
}

impl ReplicationConfig {
    /// Parse the replication settings of a secret
    pub fn from_secret(secret: &Secret) -> Self {
        Self::from_annotations(secret.metadata.annotations.as_ref())
    }

    /// Parse the replication settings from a raw annotation map, `None`
    /// meaning the object carries no annotations
    pub fn from_annotations(annotations: Option<&BTreeMap<String, String>>) -> Self {
        let get = |key: &str| annotations.and_then(|a| a.get(key)).map(String::as_str);

        ReplicationConfig {
            replication_enabled: get(annotations::REPLICATION_ALLOWED)
                .and_then(parse_bool)
                .unwrap_or(false),
            allowed_namespaces: get(annotations::ALLOWED_NAMESPACES)
                .map(parse_namespace_list)
                .unwrap_or_default(),
            excluded_namespaces: get(annotations::EXCLUDED_NAMESPACES)
                .map(parse_namespace_list)
                .unwrap_or_default(),
            reconcile_interval: parse_reconcile_interval(get(annotations::RECONCILE_INTERVAL)),
        }
    }
}

/// Reconcile interval used when the annotation is absent or invalid
pub fn default_reconcile_interval() -> Duration {
    Duration::from_secs(DEFAULT_RECONCILE_INTERVAL_SECS)
}

/// Boolean parsing with the same accepted spellings as Go's `strconv.ParseBool`
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated namespace list.
///
/// Elements are trimmed, empty elements are dropped and duplicates keep their
/// first position.
pub fn parse_namespace_list(value: &str) -> Vec<String> {
    let mut namespaces: Vec<String> = Vec::new();
    for ns in value.split(',').map(str::trim).filter(|ns| !ns.is_empty()) {
        if !namespaces.iter().any(|existing| existing == ns) {
            namespaces.push(ns.to_string());
        }
    }
    namespaces
}

/// Parse the reconcile interval, falling back to the default on any problem.
pub fn parse_reconcile_interval(value: Option<&str>) -> Duration {
    let Some(raw) = value else {
        return default_reconcile_interval();
    };

    match parse_go_duration(raw) {
        Ok(interval) => {
            if interval < Duration::from_secs(1) {
                warn!(
                    "Reconcile interval {:?} is below one second, the secret will be requeued almost continuously",
                    interval
                );
            }
            interval
        }
        Err(e) => {
            let fallback = default_reconcile_interval();
            warn!(
                "Invalid reconcile interval annotation: {}, using default of {:?}",
                e, fallback
            );
            fallback
        }
    }
}

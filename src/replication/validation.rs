// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cross-field validation of a parsed replication configuration.

use crate::error::{ReplicatorError, Result};
use crate::replication::annotations::ReplicationConfig;
use std::collections::HashSet;

/// Namespaces present in both lists, in allow-list order
pub fn overlapping_namespaces(allowed: &[String], excluded: &[String]) -> Vec<String> {
    let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
    allowed
        .iter()
        .filter(|ns| excluded.contains(ns.as_str()))
        .cloned()
        .collect()
}

/// Reject configurations whose allowed and excluded namespaces intersect
pub fn validate_configuration(config: &ReplicationConfig, namespace: &str, name: &str) -> Result<()> {
    let overlap = overlapping_namespaces(&config.allowed_namespaces, &config.excluded_namespaces);
    if overlap.is_empty() {
        return Ok(());
    }

    Err(ReplicatorError::InvalidConfiguration {
        namespace: namespace.to_string(),
        name: name.to_string(),
        overlap,
    })
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Target namespace selection.

use crate::error::{ReplicatorError, Result};
use crate::kubernetes::SecretApi;
use crate::replication::annotations::ReplicationConfig;
use tracing::{debug, info};

/// Compute the namespaces a source secret is replicated to.
///
/// A non-empty allow-list is returned as is: the exclusion list and the
/// existence of the namespaces are not checked. Otherwise every live
/// namespace qualifies except the source namespace and excluded ones.
pub async fn select_targets(
    api: &dyn SecretApi,
    config: &ReplicationConfig,
    source_namespace: &str,
    source_name: &str,
) -> Result<Vec<String>> {
    if !config.allowed_namespaces.is_empty() {
        debug!(
            "Using allowed namespaces for secret {}/{}: {:?}",
            source_namespace, source_name, config.allowed_namespaces
        );
        return Ok(config.allowed_namespaces.clone());
    }

    let namespaces = api.list_namespaces().await.map_err(|e| match e {
        ReplicatorError::KubeError(source) => ReplicatorError::NamespaceList {
            source,
            requeue_after: config.reconcile_interval,
        },
        other => other,
    })?;

    Ok(filter_namespaces(
        namespaces,
        source_namespace,
        source_name,
        &config.excluded_namespaces,
    ))
}

/// Drop the source namespace and excluded namespaces, keeping API order
pub fn filter_namespaces(
    namespaces: Vec<String>,
    source_namespace: &str,
    source_name: &str,
    excluded: &[String],
) -> Vec<String> {
    namespaces
        .into_iter()
        .filter(|ns| {
            if ns == source_namespace {
                info!(
                    "secret {} in the {} namespace is a source secret",
                    source_name, source_namespace
                );
                false
            } else if excluded.contains(ns) {
                info!(
                    "not replicating secret {} to namespace {}, it is an excluded namespace",
                    source_name, ns
                );
                false
            } else {
                true
            }
        })
        .collect()
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One reconciliation pass for a single source secret.

use crate::error::Result;
use crate::kubernetes::SecretApi;
use crate::replication::annotations::ReplicationConfig;
use crate::replication::engine::{converge, ConvergeSummary};
use crate::replication::selector::select_targets;
use crate::replication::tracker::TrackedSources;
use crate::replication::validation::validate_configuration;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// How a successful pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The source secret no longer exists, replicas are left as they are
    SourceGone,
    /// Replication is not enabled on the source
    Disabled,
    /// Targets were converged, run again after `requeue_after`
    Replicated {
        targets: Vec<String>,
        summary: ConvergeSummary,
        requeue_after: Duration,
    },
}

impl PassOutcome {
    /// Delay before the next pass, `None` to wait for the next change
    pub fn requeue_after(&self) -> Option<Duration> {
        match self {
            PassOutcome::Replicated { requeue_after, .. } => Some(*requeue_after),
            PassOutcome::SourceGone | PassOutcome::Disabled => None,
        }
    }
}

/// Runs reconciliation passes against a cluster.
///
/// Passes for different secrets may run concurrently; the tracked source set
/// is the only state they share.
#[derive(Clone)]
pub struct Replicator {
    api: Arc<dyn SecretApi>,
    tracked: TrackedSources,
}

impl Replicator {
    pub fn new(api: Arc<dyn SecretApi>, tracked: TrackedSources) -> Self {
        Self { api, tracked }
    }

    pub fn tracked(&self) -> &TrackedSources {
        &self.tracked
    }

    /// Reconcile the source secret `namespace/name`.
    ///
    /// The source is always re-fetched. Errors are returned only for a failed
    /// source fetch, an invalid configuration, or a failed namespace listing;
    /// per-namespace write failures are logged and the pass still succeeds.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, namespace: &str, name: &str) -> Result<PassOutcome> {
        let Some(source) = self.api.get_secret(namespace, name).await? else {
            debug!("Secret {}/{} no longer exists", namespace, name);
            return Ok(PassOutcome::SourceGone);
        };

        let config = ReplicationConfig::from_secret(&source);
        if let Err(e) = validate_configuration(&config, namespace, name) {
            error!("invalid secret annotation configuration: {}", e);
            return Err(e);
        }

        if !config.replication_enabled {
            debug!("Replication not enabled for secret {}/{}", namespace, name);
            return Ok(PassOutcome::Disabled);
        }

        if self.tracked.track(namespace, name) {
            debug!("Tracking source secret {}/{}", namespace, name);
        }

        let targets = match select_targets(self.api.as_ref(), &config, namespace, name).await {
            Ok(targets) => targets,
            Err(e) => {
                error!("error listing namespaces: {}", e);
                return Err(e);
            }
        };

        let summary = converge(self.api.as_ref(), &source, &targets).await;
        info!(
            "Replicated secret {}/{} to {} namespaces: {} created, {} updated, {} up-to-date, {} failed",
            namespace,
            name,
            targets.len(),
            summary.created,
            summary.updated,
            summary.up_to_date,
            summary.failed
        );

        Ok(PassOutcome::Replicated {
            targets,
            summary,
            requeue_after: config.reconcile_interval,
        })
    }
}

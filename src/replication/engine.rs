// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Converges replicas in target namespaces to the source secret's payload.

use crate::constants::annotations;
use crate::kubernetes::SecretApi;
use k8s_openapi::api::core::v1::Secret;
use kube::{api::ObjectMeta, ResourceExt};
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument};

/// What happened to the replica in one target namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicaOutcome {
    Created,
    Updated,
    UpToDate,
    Failed,
}

/// Per-outcome counts of one convergence batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvergeSummary {
    pub created: usize,
    pub updated: usize,
    pub up_to_date: usize,
    pub failed: usize,
}

impl ConvergeSummary {
    fn record(&mut self, outcome: ReplicaOutcome) {
        match outcome {
            ReplicaOutcome::Created => self.created += 1,
            ReplicaOutcome::Updated => self.updated += 1,
            ReplicaOutcome::UpToDate => self.up_to_date += 1,
            ReplicaOutcome::Failed => self.failed += 1,
        }
    }
}

/// Provenance value recorded on replicas: `<sourceNamespace>_<sourceName>`
pub fn provenance(source_namespace: &str, source_name: &str) -> String {
    format!("{}_{}", source_namespace, source_name)
}

/// Build a fresh replica carrying only the payload and the provenance annotation
pub fn build_replica(source: &Secret, target_namespace: &str) -> Secret {
    let source_namespace = source.namespace().unwrap_or_default();
    let source_name = source.name_any();

    Secret {
        metadata: ObjectMeta {
            name: Some(source_name.clone()),
            namespace: Some(target_namespace.to_string()),
            annotations: Some(BTreeMap::from([(
                annotations::REPLICATED_FROM.to_string(),
                provenance(&source_namespace, &source_name),
            )])),
            ..Default::default()
        },
        data: source.data.clone(),
        ..Default::default()
    }
}

fn same_payload(source: &Secret, replica: &Secret) -> bool {
    let empty = BTreeMap::new();
    source.data.as_ref().unwrap_or(&empty) == replica.data.as_ref().unwrap_or(&empty)
}

/// Create or update the replica of `source` in `target_namespace`.
///
/// Failures are logged and reported as [`ReplicaOutcome::Failed`], never
/// propagated.
#[instrument(
    skip(api, source),
    fields(secret = %format!("{}/{}", source.namespace().unwrap_or_default(), source.name_any()))
)]
pub async fn replicate_to_namespace(
    api: &dyn SecretApi,
    source: &Secret,
    target_namespace: &str,
) -> ReplicaOutcome {
    let name = source.name_any();

    let existing = match api.get_secret(target_namespace, &name).await {
        Ok(existing) => existing,
        Err(e) => {
            error!(
                "error checking if secret {} exists in namespace {}: {}",
                name, target_namespace, e
            );
            return ReplicaOutcome::Failed;
        }
    };

    match existing {
        None => {
            let replica = build_replica(source, target_namespace);
            if let Err(e) = api.create_secret(&replica).await {
                error!(
                    "error replicating secret {} to namespace {}: {}",
                    name, target_namespace, e
                );
                return ReplicaOutcome::Failed;
            }
            info!("replicated secret {} to namespace {}", name, target_namespace);
            ReplicaOutcome::Created
        }
        Some(replica) if same_payload(source, &replica) => {
            debug!(
                "secret {} is already up-to-date in namespace {}",
                name, target_namespace
            );
            ReplicaOutcome::UpToDate
        }
        Some(mut replica) => {
            replica.data = source.data.clone();
            if let Err(e) = api.update_secret(&replica).await {
                error!(
                    "error updating secret {} in namespace {}: {}",
                    name, target_namespace, e
                );
                return ReplicaOutcome::Failed;
            }
            info!("updated secret {} in namespace {}", name, target_namespace);
            ReplicaOutcome::Updated
        }
    }
}

/// Converge every target namespace in order, one at a time.
///
/// There is no cancellation point inside the loop: a long target list is one
/// long pass.
pub async fn converge(api: &dyn SecretApi, source: &Secret, targets: &[String]) -> ConvergeSummary {
    let mut summary = ConvergeSummary::default();
    for target in targets {
        summary.record(replicate_to_namespace(api, source, target).await);
    }
    summary
}

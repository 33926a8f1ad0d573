// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret reconciler - watches Secrets and runs a replication pass for each change.

use crate::config::Config;
use crate::error::{ReplicatorError, Result};
use crate::replication::{PassOutcome, Replicator};
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

pub struct SecretReconciler {
    client: Client,
    config: Config,
    replicator: Replicator,
}

impl SecretReconciler {
    pub fn new(client: Client, config: Config, replicator: Replicator) -> Self {
        Self {
            client,
            config,
            replicator,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let secrets: Api<Secret> = match self.config.watch_namespace.as_deref() {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let context = Arc::new(self);

        Controller::new(secrets, WatcherConfig::default())
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled secret: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

/// Translate a finished pass into the next controller action
pub fn action_for(outcome: &PassOutcome) -> Action {
    match outcome.requeue_after() {
        Some(interval) => Action::requeue(interval),
        None => Action::await_change(),
    }
}

/// Retry delay for a failed pass
pub fn error_requeue(error: &ReplicatorError, fallback: Duration) -> Duration {
    error.requeue_after().unwrap_or(fallback)
}

async fn reconcile(secret: Arc<Secret>, ctx: Arc<SecretReconciler>) -> Result<Action> {
    let name = secret.name_any();
    let namespace = secret
        .namespace()
        .ok_or_else(|| ReplicatorError::MissingField(format!("namespace on secret {}", name)))?;

    debug!("Reconciling secret: {}/{}", namespace, name);

    let outcome = ctx.replicator.reconcile(&namespace, &name).await?;
    Ok(action_for(&outcome))
}

fn error_policy(_secret: Arc<Secret>, error: &ReplicatorError, ctx: Arc<SecretReconciler>) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(error_requeue(error, ctx.config.error_requeue_interval))
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use secret_replicator::config::Config;
use secret_replicator::kubernetes::KubeSecretApi;
use secret_replicator::reconcilers::SecretReconciler;
use secret_replicator::replication::{Replicator, TrackedSources};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting secret replicator");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: watch_namespace={}, error_requeue_interval={:?}",
        config.watch_namespace.as_deref().unwrap_or("<all>"),
        config.error_requeue_interval
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let replicator = Replicator::new(
        Arc::new(KubeSecretApi::new(client.clone())),
        TrackedSources::new(),
    );
    let secret_reconciler = SecretReconciler::new(client, config, replicator);

    info!("Starting secret reconciler...");
    secret_reconciler.run().await?;

    info!("Secret reconciler stopped");
    Ok(())
}

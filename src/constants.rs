// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys used by the replicator
pub mod annotations {
    /// Boolean switch, replication only happens when this parses as true
    pub const REPLICATION_ALLOWED: &str = "secret-replicator.fussionlabs.com/replication-allowed";
    /// Comma-separated list of namespaces to replicate to
    pub const ALLOWED_NAMESPACES: &str = "secret-replicator.fussionlabs.com/allowed-namespaces";
    /// Comma-separated list of namespaces never to replicate to
    pub const EXCLUDED_NAMESPACES: &str = "secret-replicator.fussionlabs.com/excluded-namespaces";
    /// Re-evaluation cadence as a duration string, e.g. "90s" or "1h30m"
    pub const RECONCILE_INTERVAL: &str = "secret-replicator.fussionlabs.com/reconcile-interval";
    /// Set on replicas only, records `<sourceNamespace>_<sourceName>`
    pub const REPLICATED_FROM: &str = "secret-replicator.fussionlabs.com/replicated-from";
}

/// The operator name used as field manager
pub const OPERATOR_NAME: &str = "secret-replicator";

/// Requeue timing
pub mod requeue {
    /// Reconcile interval used when the annotation is absent or invalid (5 minutes)
    pub const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 300;
    /// Retry delay for failed passes that carry no interval of their own
    pub const DEFAULT_ERROR_REQUEUE_SECS: u64 = 60;
}

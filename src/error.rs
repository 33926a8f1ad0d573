// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplicatorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error(
        "unable to replicate secret {namespace}/{name}, cannot have overlaps between allowed and excluded namespaces: {}",
        .overlap.join(",")
    )]
    InvalidConfiguration {
        namespace: String,
        name: String,
        overlap: Vec<String>,
    },

    #[error("Failed to list namespaces: {source}")]
    NamespaceList {
        #[source]
        source: kube::Error,
        requeue_after: Duration,
    },

    #[error("Object is missing {0}")]
    MissingField(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ReplicatorError {
    /// Requeue interval attached to the error, if the failed pass still wants
    /// to be re-run at its configured cadence.
    pub fn requeue_after(&self) -> Option<Duration> {
        match self {
            ReplicatorError::NamespaceList { requeue_after, .. } => Some(*requeue_after),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReplicatorError>;

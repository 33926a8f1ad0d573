// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Annotation-driven secret replication: configuration parsing, target
//! selection and convergence of replicas.

pub mod annotations;
pub mod driver;
pub mod duration;
pub mod engine;
pub mod selector;
pub mod tracker;
pub mod validation;

pub use annotations::ReplicationConfig;
pub use driver::{PassOutcome, Replicator};
pub use engine::{ConvergeSummary, ReplicaOutcome};
pub use tracker::TrackedSources;

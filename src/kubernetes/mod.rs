// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes API access used by the replication engine.

pub mod api;

pub use api::{KubeSecretApi, SecretApi};

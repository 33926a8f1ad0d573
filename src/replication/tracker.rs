// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Process-local record of source secrets seen with replication enabled.

use k8s_openapi::api::core::v1::Secret;
use kube::runtime::reflector::ObjectRef;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Concurrency-safe set of source secret identities.
///
/// Clones share the same set. Entries are only ever added; the set is
/// rebuilt by reconciliation after a restart.
#[derive(Clone, Default, Debug)]
pub struct TrackedSources {
    inner: Arc<Mutex<HashSet<ObjectRef<Secret>>>>,
}

impl TrackedSources {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<ObjectRef<Secret>>> {
        // Only inserts happen under the lock, so a poisoned set is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a source, returns false if it was already tracked
    pub fn track(&self, namespace: &str, name: &str) -> bool {
        self.lock().insert(ObjectRef::new(name).within(namespace))
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.lock().contains(&ObjectRef::new(name).within(namespace))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Current members as `(namespace, name)` pairs, unordered
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.lock()
            .iter()
            .map(|r| (r.namespace.clone().unwrap_or_default(), r.name.clone()))
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

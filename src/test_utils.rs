// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: an in-memory cluster and a mock HTTP backend for kube clients.

use crate::error::{ReplicatorError, Result};
use crate::kubernetes::SecretApi;
use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::{Client, ResourceExt};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// Build a secret with the given annotations and string payload
pub fn make_secret(
    namespace: &str,
    name: &str,
    annotations: &[(&str, &str)],
    data: &[(&str, &str)],
) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            annotations: if annotations.is_empty() {
                None
            } else {
                Some(
                    annotations
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                )
            },
            ..Default::default()
        },
        data: Some(payload(data)),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

/// Build a secret payload from string values
pub fn payload(data: &[(&str, &str)]) -> BTreeMap<String, ByteString> {
    data.iter()
        .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
        .collect()
}

/// A Kubernetes API error as the client would surface it
pub fn api_error(code: u16, reason: &str) -> kube::Error {
    kube::Error::Api(kube::error::ErrorResponse {
        status: "Failure".to_string(),
        message: format!("injected {}", reason),
        reason: reason.to_string(),
        code,
    })
}

#[derive(Default)]
struct FakeState {
    secrets: BTreeMap<(String, String), Secret>,
    namespaces: Vec<String>,
    creates: Vec<(String, String)>,
    updates: Vec<(String, String)>,
    fail_list: bool,
    fail_get: HashSet<String>,
    fail_create: HashSet<String>,
    fail_update: HashSet<String>,
}

/// In-memory [`SecretApi`] that records every write
#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<FakeState>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespaces(self, namespaces: &[&str]) -> Self {
        self.state.lock().unwrap().namespaces = namespaces.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_secret(self, secret: Secret) -> Self {
        self.put(secret);
        self
    }

    /// Listing namespaces fails
    pub fn failing_list(self) -> Self {
        self.state.lock().unwrap().fail_list = true;
        self
    }

    /// Reads of secrets in this namespace fail with a server error
    pub fn failing_get_in(self, namespace: &str) -> Self {
        self.state.lock().unwrap().fail_get.insert(namespace.to_string());
        self
    }

    /// Creates in this namespace fail with a server error
    pub fn failing_create_in(self, namespace: &str) -> Self {
        self.state.lock().unwrap().fail_create.insert(namespace.to_string());
        self
    }

    /// Updates in this namespace fail with a conflict
    pub fn failing_update_in(self, namespace: &str) -> Self {
        self.state.lock().unwrap().fail_update.insert(namespace.to_string());
        self
    }

    /// Store a secret directly, bypassing the write log
    pub fn put(&self, secret: Secret) {
        let key = (secret.namespace().unwrap_or_default(), secret.name_any());
        self.state.lock().unwrap().secrets.insert(key, secret);
    }

    pub fn secret(&self, namespace: &str, name: &str) -> Option<Secret> {
        self.state
            .lock()
            .unwrap()
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Namespaces of all created secrets, in call order
    pub fn created_in(&self) -> Vec<String> {
        self.state.lock().unwrap().creates.iter().map(|(ns, _)| ns.clone()).collect()
    }

    /// Namespaces of all updated secrets, in call order
    pub fn updated_in(&self) -> Vec<String> {
        self.state.lock().unwrap().updates.iter().map(|(ns, _)| ns.clone()).collect()
    }

    pub fn write_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.creates.len() + state.updates.len()
    }
}

#[async_trait]
impl SecretApi for FakeCluster {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        let state = self.state.lock().unwrap();
        if state.fail_get.contains(namespace) {
            return Err(api_error(500, "InternalError").into());
        }
        Ok(state
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }

    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let state = self.state.lock().unwrap();
        if state.fail_list {
            return Err(api_error(503, "ServiceUnavailable").into());
        }
        Ok(state.namespaces.clone())
    }

    async fn create_secret(&self, secret: &Secret) -> Result<()> {
        let key = (secret.namespace().unwrap_or_default(), secret.name_any());
        let mut state = self.state.lock().unwrap();
        if state.fail_create.contains(&key.0) {
            return Err(api_error(500, "InternalError").into());
        }
        if state.secrets.contains_key(&key) {
            return Err(ReplicatorError::KubeError(api_error(409, "AlreadyExists")));
        }
        state.creates.push(key.clone());
        state.secrets.insert(key, secret.clone());
        Ok(())
    }

    async fn update_secret(&self, secret: &Secret) -> Result<()> {
        let key = (secret.namespace().unwrap_or_default(), secret.name_any());
        let mut state = self.state.lock().unwrap();
        if state.fail_update.contains(&key.0) {
            return Err(api_error(409, "Conflict").into());
        }
        if !state.secrets.contains_key(&key) {
            return Err(api_error(404, "NotFound").into());
        }
        state.updates.push(key.clone());
        state.secrets.insert(key, secret.clone());
        Ok(())
    }
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    /// Method and path of every request received so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests.lock().unwrap().push((method.clone(), path.clone()));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("object", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock secret JSON response
pub fn secret_json(namespace: &str, name: &str, data: &[(&str, &str)]) -> String {
    let secret = make_secret(namespace, name, &[], data);
    serde_json::to_string(&secret).unwrap()
}

/// Create a mock namespace list JSON response
pub fn namespace_list_json(names: &[&str]) -> String {
    let items: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "apiVersion": "v1",
                "kind": "Namespace",
                "metadata": { "name": name, "uid": format!("uid-{}", name) }
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "NamespaceList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

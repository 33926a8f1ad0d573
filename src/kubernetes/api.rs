// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The slice of the Kubernetes API the replicator consumes.

use crate::constants::OPERATOR_NAME;
use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Secret};
use kube::{
    api::{ListParams, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

/// Object access needed to replicate secrets.
///
/// Every decision is taken against freshly fetched state; implementations do
/// not cache.
#[async_trait]
pub trait SecretApi: Send + Sync {
    /// Fetch a secret, `None` when it does not exist
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>>;

    /// Names of all namespaces in the cluster, in API order
    async fn list_namespaces(&self) -> Result<Vec<String>>;

    /// Create a secret in the namespace set in its metadata
    async fn create_secret(&self, secret: &Secret) -> Result<()>;

    /// Replace an existing secret. The resourceVersion of the fetched object
    /// is kept, so a concurrent writer surfaces as a conflict.
    async fn update_secret(&self, secret: &Secret) -> Result<()>;
}

/// [`SecretApi`] backed by a live cluster
#[derive(Clone)]
pub struct KubeSecretApi {
    client: Client,
}

impl KubeSecretApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn secrets(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn post_params() -> PostParams {
        PostParams {
            field_manager: Some(OPERATOR_NAME.to_string()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl SecretApi for KubeSecretApi {
    #[instrument(skip(self))]
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        match self.secrets(namespace).get(name).await {
            Ok(secret) => Ok(Some(secret)),
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("Secret {}/{} not found", namespace, name);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = namespaces.list(&ListParams::default()).await?;

        Ok(list.items.iter().map(|ns| ns.name_any()).collect())
    }

    async fn create_secret(&self, secret: &Secret) -> Result<()> {
        let namespace = secret.namespace().unwrap_or_default();
        self.secrets(&namespace)
            .create(&Self::post_params(), secret)
            .await?;
        Ok(())
    }

    async fn update_secret(&self, secret: &Secret) -> Result<()> {
        let namespace = secret.namespace().unwrap_or_default();
        self.secrets(&namespace)
            .replace(&secret.name_any(), &Self::post_params(), secret)
            .await?;
        Ok(())
    }
}

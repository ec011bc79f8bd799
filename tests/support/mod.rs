// ABOUTME: In-memory ResourceApi used by the object controller tests.
// ABOUTME: Stores objects by reference and records every request it serves.

#![allow(dead_code)]

use async_trait::async_trait;
use kegd::kube::{ObjectRef, ResourceApi, ResourceError};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// A fake API server knowing a fixed set of kinds.
#[derive(Default)]
pub struct MemoryCluster {
    kinds: HashMap<(String, String), bool>,
    objects: Mutex<HashMap<ObjectRef, Value>>,
    requests: Mutex<Vec<(&'static str, ObjectRef)>>,
    failure: Option<String>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
            .with_kind("v1", "ConfigMap", true)
            .with_kind("apps/v1", "Deployment", true)
            .with_kind("v1", "Namespace", false)
    }

    pub fn with_kind(mut self, api_version: &str, kind: &str, namespaced: bool) -> Self {
        self.kinds
            .insert((api_version.to_string(), kind.to_string()), namespaced);
        self
    }

    /// Make every CRUD call fail with an API error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn insert(&self, target: ObjectRef, body: Value) {
        self.objects.lock().unwrap().insert(target, body);
    }

    pub fn object(&self, target: &ObjectRef) -> Option<Value> {
        self.objects.lock().unwrap().get(target).cloned()
    }

    pub fn requests(&self) -> Vec<(&'static str, ObjectRef)> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, verb: &'static str, target: &ObjectRef) -> Result<(), ResourceError> {
        self.requests.lock().unwrap().push((verb, target.clone()));
        match self.failure {
            Some(ref message) => Err(ResourceError::Api(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ResourceApi for MemoryCluster {
    async fn is_namespaced(&self, api_version: &str, kind: &str) -> Result<bool, ResourceError> {
        self.kinds
            .get(&(api_version.to_string(), kind.to_string()))
            .copied()
            .ok_or_else(|| ResourceError::UnknownResource {
                api_version: api_version.to_string(),
                kind: kind.to_string(),
            })
    }

    async fn create(&self, target: &ObjectRef, body: &Value) -> Result<Value, ResourceError> {
        self.record("create", target)?;
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(target) {
            return Err(ResourceError::AlreadyExists(target.clone()));
        }
        objects.insert(target.clone(), body.clone());
        Ok(body.clone())
    }

    async fn replace(&self, target: &ObjectRef, body: &Value) -> Result<Value, ResourceError> {
        self.record("replace", target)?;
        let mut objects = self.objects.lock().unwrap();
        match objects.get_mut(target) {
            Some(existing) => {
                *existing = body.clone();
                Ok(body.clone())
            }
            None => Err(ResourceError::NotFound(target.clone())),
        }
    }

    async fn get(&self, target: &ObjectRef) -> Result<Value, ResourceError> {
        self.record("get", target)?;
        self.object(target)
            .ok_or_else(|| ResourceError::NotFound(target.clone()))
    }

    async fn delete(&self, target: &ObjectRef) -> Result<Value, ResourceError> {
        self.record("delete", target)?;
        match self.objects.lock().unwrap().remove(target) {
            Some(_) => Ok(json!({"kind": "Status", "status": "Success"})),
            None => Err(ResourceError::NotFound(target.clone())),
        }
    }
}

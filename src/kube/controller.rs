// ABOUTME: Object controller: namespace resolution and traced CRUD over a ResourceApi.
// ABOUTME: Every request/response pair is logged with a fresh external request id.

use serde_json::Value;
use snafu::ResultExt;
use std::fmt;
use uuid::Uuid;

use super::api::ResourceApi;
use super::error::{ControllerError, DiscoverySnafu, RequestSnafu};
use super::object::{ObjectConfig, ObjectRef};

pub const DEFAULT_NAMESPACE: &str = "default";

type Result<T> = std::result::Result<T, ControllerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Read,
    Delete,
}

impl Operation {
    pub fn http_method(&self) -> &'static str {
        match self {
            Operation::Create => "post",
            Operation::Update => "put",
            Operation::Read => "get",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Read => "read",
            Operation::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Creates, reads, updates and deletes objects through a [`ResourceApi`].
pub struct ObjectController<A> {
    api: A,
    default_namespace: String,
}

impl<A: ResourceApi> ObjectController<A> {
    pub fn new(api: A) -> Self {
        Self::with_default_namespace(api, DEFAULT_NAMESPACE)
    }

    pub fn with_default_namespace(api: A, default_namespace: &str) -> Self {
        Self {
            api,
            default_namespace: default_namespace.to_string(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Create `object`, placing it in the first of: its own namespace,
    /// `default_namespace`, the controller default.
    pub async fn create_object(
        &self,
        object: &ObjectConfig,
        default_namespace: Option<&str>,
        driver_request_id: Option<&str>,
    ) -> Result<Value> {
        let target = self.write_target(object, default_namespace).await?;
        tracing::debug!(target_object = %target, "create object");

        let exchange = Exchange::new(Operation::Create, driver_request_id);
        exchange.request(Some(object.data()));
        let created = self
            .api
            .create(&target, object.data())
            .await
            .context(RequestSnafu {
                operation: Operation::Create,
                target: target.clone(),
            })?;
        exchange.response(&created);
        Ok(created)
    }

    /// Replace `object`; namespace resolution matches [`create_object`](Self::create_object).
    pub async fn update_object(
        &self,
        object: &ObjectConfig,
        default_namespace: Option<&str>,
        driver_request_id: Option<&str>,
    ) -> Result<Value> {
        let target = self.write_target(object, default_namespace).await?;
        tracing::debug!(target_object = %target, "update object");

        let exchange = Exchange::new(Operation::Update, driver_request_id);
        exchange.request(Some(object.data()));
        let updated = self
            .api
            .replace(&target, object.data())
            .await
            .context(RequestSnafu {
                operation: Operation::Update,
                target: target.clone(),
            })?;
        exchange.response(&updated);
        Ok(updated)
    }

    pub async fn read_object(
        &self,
        target: &ObjectRef,
        driver_request_id: Option<&str>,
    ) -> Result<Value> {
        tracing::debug!(target_object = %target, "read object");

        let exchange = Exchange::new(Operation::Read, driver_request_id);
        exchange.request(None);
        let found = self.api.get(target).await.context(RequestSnafu {
            operation: Operation::Read,
            target: target.clone(),
        })?;
        exchange.response(&found);
        Ok(found)
    }

    /// Read that reports a missing object as `None` instead of an error.
    pub async fn safe_read_object(
        &self,
        target: &ObjectRef,
        driver_request_id: Option<&str>,
    ) -> Result<Option<Value>> {
        match self.read_object(target, driver_request_id).await {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn delete_object(
        &self,
        target: &ObjectRef,
        driver_request_id: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(target_object = %target, "delete object");

        let exchange = Exchange::new(Operation::Delete, driver_request_id);
        exchange.request(None);
        let status = self.api.delete(target).await.context(RequestSnafu {
            operation: Operation::Delete,
            target: target.clone(),
        })?;
        exchange.response(&status);
        Ok(())
    }

    pub async fn is_object_namespaced(&self, api_version: &str, kind: &str) -> Result<bool> {
        self.api
            .is_namespaced(api_version, kind)
            .await
            .context(DiscoverySnafu { api_version, kind })
    }

    async fn write_target(
        &self,
        object: &ObjectConfig,
        supplied_namespace: Option<&str>,
    ) -> Result<ObjectRef> {
        let mut target = object.target().clone();
        target.namespace = if self
            .is_object_namespaced(object.api_version(), object.kind())
            .await?
        {
            let namespace = object
                .namespace()
                .or(supplied_namespace)
                .unwrap_or(&self.default_namespace);
            Some(namespace.to_string())
        } else {
            None
        };
        Ok(target)
    }
}

/// One traced request/response pair.
struct Exchange<'a> {
    operation: Operation,
    external_request_id: Uuid,
    driver_request_id: &'a str,
}

impl<'a> Exchange<'a> {
    fn new(operation: Operation, driver_request_id: Option<&'a str>) -> Self {
        Self {
            operation,
            external_request_id: Uuid::new_v4(),
            driver_request_id: driver_request_id.unwrap_or_default(),
        }
    }

    fn request(&self, body: Option<&Value>) {
        self.log("sent", "request", body);
    }

    fn response(&self, body: &Value) {
        self.log("received", "response", Some(body));
    }

    fn log(&self, message_direction: &str, message_type: &str, body: Option<&Value>) {
        let content_type = if body.is_some() {
            "application/json"
        } else {
            ""
        };
        let body = body.map(Value::to_string).unwrap_or_default();
        tracing::info!(
            message_direction,
            external_request_id = %self.external_request_id,
            content_type,
            message_type,
            protocol = "http",
            http_method = self.operation.http_method(),
            driver_request_id = self.driver_request_id,
            "{body}"
        );
    }
}

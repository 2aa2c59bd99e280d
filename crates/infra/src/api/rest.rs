//! REST implementation of the collection port
//!
//! One generic adapter maps the uniform CRUD contract onto verb/path pairs
//! against a per-domain base URL:
//!
//! | operation | request                          |
//! |-----------|----------------------------------|
//! | `list`    | `GET    {base}/{resource}`       |
//! | `get`     | `GET    {base}/{resource}/{id}`  |
//! | `create`  | `POST   {base}/{resource}`       |
//! | `update`  | `PUT    {base}/{resource}/{id}`  |
//! | `delete`  | `DELETE {base}/{resource}/{id}`  |
//! | `probe`   | `GET    {base}/health` (public, no retry) |

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use finboard_core::CollectionPort;
use finboard_domain::{ListQuery, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::http::{RequestDescriptor, TransportClient};

/// REST adapter for one domain's resource collection.
pub struct RestCollection<T, D, P> {
    transport: Arc<TransportClient>,
    base_url: String,
    resource: &'static str,
    _marker: PhantomData<fn() -> (T, D, P)>,
}

impl<T, D, P> RestCollection<T, D, P> {
    /// Bind the adapter to `{base_url}/{resource}`.
    #[must_use]
    pub fn new(transport: Arc<TransportClient>, base_url: &str, resource: &'static str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            resource,
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.resource, id)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    fn apply_query(descriptor: RequestDescriptor, query: Option<&ListQuery>) -> RequestDescriptor {
        let Some(query) = query else {
            return descriptor;
        };
        let mut descriptor = descriptor;
        if let Some(search) = &query.search {
            descriptor = descriptor.with_query("search", search.clone());
        }
        if let Some(limit) = query.limit {
            descriptor = descriptor.with_query("limit", limit.to_string());
        }
        if let Some(offset) = query.offset {
            descriptor = descriptor.with_query("offset", offset.to_string());
        }
        descriptor
    }
}

#[async_trait]
impl<T, D, P> CollectionPort<T, D, P> for RestCollection<T, D, P>
where
    T: DeserializeOwned + Send + Sync + 'static,
    D: Serialize + Send + Sync + 'static,
    P: Serialize + Send + Sync + 'static,
{
    async fn list(&self, query: Option<&ListQuery>) -> Result<Vec<T>> {
        let descriptor =
            Self::apply_query(RequestDescriptor::get(self.collection_url()), query);
        self.transport.send_json(&descriptor).await
    }

    async fn get(&self, id: &str) -> Result<T> {
        self.transport.send_json(&RequestDescriptor::get(self.item_url(id))).await
    }

    async fn create(&self, draft: &D) -> Result<T> {
        let descriptor = RequestDescriptor::post(self.collection_url()).with_json(draft)?;
        self.transport.send_json(&descriptor).await
    }

    async fn update(&self, id: &str, patch: &P) -> Result<T> {
        let descriptor = RequestDescriptor::put(self.item_url(id)).with_json(patch)?;
        self.transport.send_json(&descriptor).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.transport.send_unit(&RequestDescriptor::delete(self.item_url(id))).await
    }

    async fn probe(&self) -> Result<Duration> {
        self.transport.probe(&self.health_url()).await
    }
}

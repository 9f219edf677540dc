//! HTTP entity store
//!
//! [`EntityStore`] over an OData v4 Web API. One request per primitive:
//!
//! | Primitive | Request |
//! |-----------|---------|
//! | `list` | `GET {base}/{set}?{query}` |
//! | `retrieve` | `GET {base}/{set}({id})` |
//! | `create` | `POST {base}/{set}` with `Prefer: return=representation` |
//! | `update` | `PATCH {base}/{set}({id})` with `If-Match: *` |
//! | `delete` | `DELETE {base}/{set}({id})` |
//! | `entity_set_name` | `GET {base}/EntityDefinitions(LogicalName='..')` |
//! | `primary_id_attribute` | `GET {base}/EntityDefinitions?$filter=EntitySetName eq '..'` |
//!
//! `If-Match: *` keeps a PATCH from creating the record when it does not
//! exist. Authentication beyond a static bearer token belongs to the host.

use crate::odata;
use async_trait::async_trait;
use recordgate_core::{EntityStore, ListPage, Payload, Query, Record, StoreError};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

/// Entity store reached over HTTP
pub struct HttpEntityStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpEntityStore {
    /// Create a store for the Web API rooted at `endpoint`
    ///
    /// `endpoint` is the service root (e.g.
    /// "https://org.example.com/api/data/v9.2"); a trailing slash is
    /// stripped.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the HTTP client cannot be constructed.
    pub fn new(endpoint: &str, token: Option<&str>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(HttpEntityStore {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    /// Service root this store talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header("Accept", "application/json")
            .header("OData-MaxVersion", "4.0")
            .header("OData-Version", "4.0");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(target: "recordgate::http", status = status.as_u16(), "Store rejected request");
        Err(odata::status_error(status.as_u16(), &body))
    }

    async fn read_json(response: Response) -> Result<Option<JsonValue>, StoreError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let text = response.text().await.map_err(transport_error)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::Parse(format!("invalid JSON response: {}", e)))
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::Network(e.to_string())
    }
}

#[async_trait]
impl EntityStore for HttpEntityStore {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn list(&self, collection: &str, query: &Query) -> Result<ListPage, StoreError> {
        let url = odata::collection_url(&self.base_url, collection);
        debug!(target: "recordgate::http", %url, query = %query.to_query_string(), "GET");
        let response = self
            .send(self.request(Method::GET, &url).query(&query.params()))
            .await?;
        match Self::read_json(response).await? {
            Some(body) => odata::parse_list_page(body),
            None => Err(StoreError::Parse("empty list response".to_string())),
        }
    }

    async fn retrieve(
        &self,
        collection: &str,
        id: &str,
        query: &Query,
    ) -> Result<Option<Record>, StoreError> {
        let url = odata::record_url(&self.base_url, collection, id);
        debug!(target: "recordgate::http", %url, "GET");
        let result = self
            .send(self.request(Method::GET, &url).query(&query.params()))
            .await;
        match result {
            Ok(response) => match Self::read_json(response).await? {
                Some(body) => odata::parse_record(body).map(Some),
                None => Ok(None),
            },
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, collection: &str, payload: &Payload) -> Result<Record, StoreError> {
        let url = odata::collection_url(&self.base_url, collection);
        debug!(target: "recordgate::http", %url, "POST");
        let response = self
            .send(
                self.request(Method::POST, &url)
                    .header("Prefer", "return=representation")
                    .json(payload),
            )
            .await?;
        let entity_id = response
            .headers()
            .get(odata::ENTITY_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(odata::parse_entity_id);
        match Self::read_json(response).await? {
            Some(body) => odata::parse_record(body),
            None => {
                let id = entity_id.ok_or_else(|| {
                    StoreError::Parse("create returned neither a body nor an entity id".to_string())
                })?;
                let mut record = Record::new();
                record.insert(odata::CREATED_ID_KEY.to_string(), JsonValue::String(id));
                Ok(record)
            }
        }
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        payload: &Payload,
    ) -> Result<Option<Record>, StoreError> {
        let url = odata::record_url(&self.base_url, collection, id);
        debug!(target: "recordgate::http", %url, "PATCH");
        let response = self
            .send(
                self.request(Method::PATCH, &url)
                    .header("Prefer", "return=representation")
                    .header("If-Match", "*")
                    .json(payload),
            )
            .await?;
        match Self::read_json(response).await? {
            Some(body) => odata::parse_record(body).map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = odata::record_url(&self.base_url, collection, id);
        debug!(target: "recordgate::http", %url, "DELETE");
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }

    async fn entity_set_name(&self, logical_name: &str) -> Result<String, StoreError> {
        let url = odata::entity_definition_url(&self.base_url, logical_name);
        debug!(target: "recordgate::http", %url, "GET metadata");
        let response = self.send(self.request(Method::GET, &url)).await?;
        match Self::read_json(response).await? {
            Some(body) => odata::parse_entity_set_name(&body),
            None => Err(StoreError::Parse("empty metadata response".to_string())),
        }
    }

    async fn primary_id_attribute(&self, entity_set: &str) -> Result<String, StoreError> {
        let url = odata::entity_definitions_url(&self.base_url);
        debug!(target: "recordgate::http", %url, entity_set, "GET primary id");
        let response = self
            .send(
                self.request(Method::GET, &url)
                    .query(&odata::primary_id_params(entity_set)),
            )
            .await?;
        match Self::read_json(response).await? {
            Some(body) => odata::parse_primary_id_attribute(body, entity_set),
            None => Err(StoreError::Parse("empty metadata response".to_string())),
        }
    }
}

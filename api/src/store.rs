use crate::config::AppConfig;
use anyhow::{Context, Result};
use gcb_event::{index_mappings, Event, SearchRequest, SearchResults};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

pub const TEMPLATE_NAME: &str = "event_template";

/// OpenSearch client for the event index.
pub struct OpenSearchClient {
    client: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    index: String,
    batch_size: usize,
}

impl std::fmt::Debug for OpenSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSearchClient")
            .field("base_url", &self.base_url)
            .field("index", &self.index)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

/// A document the store refused to index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub id: String,
    pub reason: String,
}

/// Outcome of [`OpenSearchClient::write_events`]
#[derive(Debug, Default)]
pub struct BulkSummary {
    pub written: usize,
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Debug, Deserialize)]
struct BulkItem {
    #[serde(rename = "_id")]
    id: Option<String>,
    error: Option<BulkItemError>,
}

#[derive(Debug, Deserialize)]
struct BulkItemError {
    #[serde(rename = "type")]
    kind: Option<String>,
    reason: Option<String>,
}

impl OpenSearchClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.os_address.clone(),
            username: config.os_username.clone(),
            password: config.os_password.clone(),
            index: config.event_index.clone(),
            batch_size: config.batch_size,
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);
        match &self.username {
            Some(user) => builder.basic_auth(user, self.password.as_ref()),
            None => builder,
        }
    }

    /// Puts the index template that maps every event field to its search type
    pub async fn put_index_template(&self) -> Result<()> {
        let body = json!({
            "index_patterns": [self.index],
            "template": {
                "settings": { "number_of_shards": 1 },
                "mappings": index_mappings(),
            },
        });

        let resp = self
            .request(Method::PUT, &format!("_index_template/{}", TEMPLATE_NAME))
            .json(&body)
            .send()
            .await
            .context("Failed to send index template request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenSearch index template error {}: {}", status, body);
        }

        tracing::info!(template = TEMPLATE_NAME, index = %self.index, "Index template created");
        Ok(())
    }

    /// Indexes events in bulk batches, keyed by game id. Documents rejected by
    /// the store are reported in the summary; a failed batch request aborts.
    pub async fn write_events(&self, events: &[Event]) -> Result<BulkSummary> {
        let storable: Vec<&Event> = events.iter().filter(|e| e.is_storable()).collect();
        if storable.len() < events.len() {
            tracing::warn!(
                skipped = events.len() - storable.len(),
                "Skipping events without a game id"
            );
        }

        tracing::info!(
            events = storable.len(),
            batches = storable.len().div_ceil(self.batch_size),
            "Writing events"
        );

        let mut summary = BulkSummary::default();
        for batch in storable.chunks(self.batch_size) {
            let body = self.bulk_body(batch)?;
            let failures = self.send_bulk(body).await?;
            summary.written += batch.len() - failures.len();
            summary.failures.extend(failures);
        }
        Ok(summary)
    }

    fn bulk_body(&self, events: &[&Event]) -> Result<String> {
        let mut body = String::new();
        for event in events {
            let id = event.key().unwrap_or_default();
            let action = json!({ "index": { "_index": self.index, "_id": id } });
            let doc = serde_json::to_string(event)
                .with_context(|| format!("Failed to serialize event {}", id))?;
            body.push_str(&action.to_string());
            body.push('\n');
            body.push_str(&doc);
            body.push('\n');
        }
        Ok(body)
    }

    async fn send_bulk(&self, body: String) -> Result<Vec<DocumentFailure>> {
        let resp = self
            .request(Method::POST, "_bulk")
            .header("content-type", "application/x-ndjson")
            .body(body)
            .send()
            .await
            .context("Failed to send bulk write request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenSearch bulk write error {}: {}", status, body);
        }

        let bulk: BulkResponse = resp
            .json()
            .await
            .context("Failed to parse bulk write response")?;
        if !bulk.errors {
            return Ok(Vec::new());
        }

        let failures: Vec<DocumentFailure> = bulk
            .items
            .into_iter()
            .flat_map(|item| item.into_values())
            .filter_map(|item| {
                let error = item.error?;
                Some(DocumentFailure {
                    id: item.id.unwrap_or_default(),
                    reason: match (error.kind, error.reason) {
                        (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
                        (kind, reason) => reason.or(kind).unwrap_or_default(),
                    },
                })
            })
            .collect();
        for failure in &failures {
            tracing::warn!(id = %failure.id, reason = %failure.reason, "Event was not indexed");
        }
        Ok(failures)
    }

    /// Runs a search against the event index
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let body = request
            .to_body()
            .context("Failed to compile search request")?;

        let resp = self
            .request(Method::POST, &format!("{}/_search", self.index))
            .json(&body)
            .send()
            .await
            .context("Failed to send search request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenSearch search error {}: {}", status, body);
        }

        let response: Value = resp
            .json()
            .await
            .context("Failed to parse search response")?;
        let results =
            SearchResults::from_response(response).context("Unexpected search response shape")?;
        tracing::debug!(
            total = results.total,
            returned = results.events.len(),
            "Search completed"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests;

use crate::api_types::{
    ApiError, ApiEvent, EventSearchResponse, Links, Meta, JSON_API_CONTENT_TYPE,
};
use crate::request_logging::RequestLogging;
use crate::store::OpenSearchClient;
use gcb_event::SearchRequest;
use indexmap::IndexMap;
use poem::http::StatusCode;
use poem::web::{Data, Json, Query};
use poem::{get, handler, Endpoint, EndpointExt, Request, Response, Route};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SEARCH_PATH: &str = "/api/events/search";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
}

pub fn routes(store: Arc<OpenSearchClient>) -> impl Endpoint {
    Route::new()
        .at(SEARCH_PATH, get(search_events))
        .at("/api/health", get(health))
        .data(store)
        .with(RequestLogging)
}

#[handler]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Event search API is running".to_string(),
    })
}

/// Groups repeated query keys, keeping the order in which keys first appear
fn group_params(pairs: Vec<(String, String)>) -> IndexMap<String, Vec<String>> {
    let mut params: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in pairs {
        params.entry(key).or_default().push(value);
    }
    params
}

#[handler]
async fn search_events(
    req: &Request,
    store: Data<&Arc<OpenSearchClient>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let self_link = req
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| SEARCH_PATH.to_string());
    let mut doc = EventSearchResponse {
        links: Links {
            first: page_link(&pairs, 0),
            self_link,
            ..Default::default()
        },
        ..Default::default()
    };

    let request = match SearchRequest::build(&group_params(pairs.clone())) {
        Ok(request) => request,
        Err(errors) => {
            tracing::debug!(errors = %errors, "Rejected search parameters");
            doc.error = Some(ApiError {
                status: "bad request".to_string(),
                detail: errors.to_string(),
            });
            return document_response(StatusCode::BAD_REQUEST, &doc);
        }
    };

    let results = match store.search(&request).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Failed to perform search request: {:#}", e);
            doc.error = Some(ApiError {
                status: "internal server error".to_string(),
                detail: "failed executing search request".to_string(),
            });
            return document_response(StatusCode::INTERNAL_SERVER_ERROR, &doc);
        }
    };

    let data: Result<Vec<ApiEvent>, _> =
        results.events.iter().map(ApiEvent::from_event).collect();
    let data = match data {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Failed to externalize events: {:#}", e);
            doc.error = Some(ApiError {
                status: "internal server error".to_string(),
                detail: "failed writing search response".to_string(),
            });
            return document_response(StatusCode::INTERNAL_SERVER_ERROR, &doc);
        }
    };

    let page = request.page();
    let seen = (u64::from(page) + 1) * u64::from(request.limit());
    if page > 0 {
        doc.links.previous = Some(page_link(&pairs, page - 1));
    }
    if seen < results.total {
        doc.links.next = Some(page_link(&pairs, page.saturating_add(1)));
    }
    doc.meta = Meta {
        total: results.total,
    };
    doc.data = data;

    document_response(StatusCode::OK, &doc)
}

/// Link to the same search with `page` replaced
fn page_link(pairs: &[(String, String)], page: u32) -> String {
    let mut url = match reqwest::Url::parse("http://localhost") {
        Ok(url) => url,
        Err(_) => return SEARCH_PATH.to_string(),
    };
    url.set_path(SEARCH_PATH);
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs.iter().filter(|(k, _)| k != "page") {
            query.append_pair(key, value);
        }
        query.append_pair("page", &page.to_string());
    }
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

fn document_response(status: StatusCode, doc: &EventSearchResponse) -> Response {
    match serde_json::to_string(doc) {
        Ok(body) => Response::builder()
            .status(status)
            .content_type(JSON_API_CONTENT_TYPE)
            .body(body),
        Err(e) => {
            tracing::error!("Failed to marshal event search response: {}", e);
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body("failed to write response")
        }
    }
}

#[cfg(test)]
mod tests;

use super::*;
use crate::config::AppConfig;
use mockito::{Matcher, Server, ServerGuard};
use poem::test::TestClient;
use serde_json::{json, Value};

fn store(server: &ServerGuard) -> Arc<OpenSearchClient> {
    Arc::new(OpenSearchClient::new(&AppConfig {
        os_address: server.url(),
        os_username: None,
        os_password: None,
        event_index: "event_index".to_string(),
        batch_size: 100,
        port: 8080,
    }))
}

const TWO_HITS: &str = r#"{"hits":{"total":{"value":5},"hits":[
    {"_id":"RPG24ND00001","_source":{"game_id":"RPG24ND00001","title":"Into the Dark","cost":4.0}},
    {"_id":"RPG24ND00002","_source":{"game_id":"RPG24ND00002","title":"Out of the Dark"}}
]}}"#;

#[test]
fn test_group_params_keeps_first_seen_order() {
    let grouped = group_params(vec![
        ("title".to_string(), "dark".to_string()),
        ("cost".to_string(), "4".to_string()),
        ("title".to_string(), "night".to_string()),
    ]);
    let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["title", "cost"]);
    assert_eq!(grouped["title"], vec!["dark", "night"]);
}

#[test]
fn test_page_link_replaces_page() {
    let pairs = vec![
        ("title".to_string(), "dark night".to_string()),
        ("page".to_string(), "3".to_string()),
        ("cost".to_string(), "(1,5]".to_string()),
    ];
    assert_eq!(
        page_link(&pairs, 4),
        "/api/events/search?title=dark+night&cost=%281%2C5%5D&page=4"
    );
}

#[tokio::test]
async fn test_health() {
    let server = Server::new_async().await;
    let cli = TestClient::new(routes(store(&server)));
    let resp = cli.get("/api/health").send().await;
    resp.assert_status_is_ok();
    let body: Value = resp.0.into_body().into_json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_search_returns_json_api_document() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/event_index/_search")
        .match_body(Matcher::PartialJson(json!({
            "size": 2,
            "from": 2,
            "query": { "bool": { "must": [{ "match": { "title": "dark" } }] } },
        })))
        .with_status(200)
        .with_body(TWO_HITS)
        .create_async()
        .await;

    let cli = TestClient::new(routes(store(&server)));
    let resp = cli
        .get("/api/events/search?title=dark&limit=2&page=1")
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_content_type(JSON_API_CONTENT_TYPE);

    let body: Value = resp.0.into_body().into_json().await.unwrap();
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["data"][0]["id"], "RPG24ND00001");
    assert_eq!(body["data"][0]["type"], "event");
    assert_eq!(body["data"][0]["gameId"], "RPG24ND00001");
    assert_eq!(body["data"][0]["cost"], 4.0);
    assert_eq!(body["data"][1]["title"], "Out of the Dark");
    assert_eq!(
        body["links"],
        json!({
            "self": "/api/events/search?title=dark&limit=2&page=1",
            "first": "/api/events/search?title=dark&limit=2&page=0",
            "previous": "/api/events/search?title=dark&limit=2&page=0",
            "next": "/api/events/search?title=dark&limit=2&page=2",
        })
    );
    assert!(body.get("error").is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_last_page_has_no_next_link() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/event_index/_search")
        .with_status(200)
        .with_body(TWO_HITS)
        .create_async()
        .await;

    let cli = TestClient::new(routes(store(&server)));
    let resp = cli.get("/api/events/search?limit=5").send().await;
    resp.assert_status_is_ok();
    let body: Value = resp.0.into_body().into_json().await.unwrap();
    assert!(body["links"].get("next").is_none());
    assert!(body["links"].get("previous").is_none());
}

#[tokio::test]
async fn test_invalid_parameters_are_a_bad_request() {
    let server = Server::new_async().await;
    let cli = TestClient::new(routes(store(&server)));
    let resp = cli
        .get("/api/events/search?cost=cheap&limit=1&limit=2&color=red")
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = resp.0.into_body().into_json().await.unwrap();
    assert_eq!(body["error"]["status"], "bad request");
    let detail = body["error"]["detail"].as_str().unwrap();
    assert!(detail.contains("invalid search query param cost"));
    assert!(detail.contains("only 1 limit query parameter is allowed"));
    assert!(detail.contains("field 'color' is not supported"));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_store_failure_is_a_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/event_index/_search")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let cli = TestClient::new(routes(store(&server)));
    let resp = cli.get("/api/events/search?gameId=A1").send().await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.0.into_body().into_json().await.unwrap();
    assert_eq!(body["error"]["detail"], "failed executing search request");
}

use super::*;
use gcb_event::{load_events_from_str, Field};
use indexmap::IndexMap;
use mockito::{Matcher, Server};

fn config(address: &str, batch_size: usize) -> AppConfig {
    AppConfig {
        os_address: address.to_string(),
        os_username: Some("user".to_string()),
        os_password: Some("pass".to_string()),
        event_index: "event_index".to_string(),
        batch_size,
        port: 8080,
    }
}

fn events(ids: &[&str]) -> Vec<Event> {
    ids.iter()
        .map(|id| {
            let mut event = Event::default();
            event.set_field(Field::GameId, id).unwrap();
            event.set_field(Field::Title, "Dragon Dice").unwrap();
            event
        })
        .collect()
}

#[test]
fn test_debug_hides_credentials() {
    let client = OpenSearchClient::new(&config("http://localhost:9200", 10));
    let debug = format!("{:?}", client);
    assert!(!debug.contains("pass"));
    assert!(debug.contains("event_index"));
}

#[tokio::test]
async fn test_put_index_template() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/_index_template/event_template")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .match_body(Matcher::PartialJson(json!({
            "index_patterns": ["event_index"],
            "template": { "mappings": { "properties": {
                "game_id": { "type": "keyword" },
                "cost": { "type": "double" },
            } } },
        })))
        .with_status(200)
        .with_body(r#"{"acknowledged":true}"#)
        .create_async()
        .await;

    let client = OpenSearchClient::new(&config(&server.url(), 10));
    client.put_index_template().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_put_index_template_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/_index_template/event_template")
        .with_status(400)
        .with_body("bad template")
        .create_async()
        .await;

    let client = OpenSearchClient::new(&config(&server.url(), 10));
    let err = client.put_index_template().await.unwrap_err();
    assert!(err.to_string().contains("bad template"));
}

#[tokio::test]
async fn test_write_events_in_batches() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/_bulk")
        .match_header("content-type", "application/x-ndjson")
        .with_status(200)
        .with_body(r#"{"took":5,"errors":false,"items":[]}"#)
        .expect(3)
        .create_async()
        .await;

    let client = OpenSearchClient::new(&config(&server.url(), 2));
    let summary = client
        .write_events(&events(&["A1", "A2", "A3", "A4", "A5"]))
        .await
        .unwrap();
    assert_eq!(summary.written, 5);
    assert!(summary.failures.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_write_events_body_is_ndjson() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/_bulk")
        .match_body(Matcher::Exact(
            "{\"index\":{\"_index\":\"event_index\",\"_id\":\"A1\"}}\n\
             {\"game_id\":\"A1\",\"title\":\"Dragon Dice\"}\n"
                .to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"errors":false,"items":[]}"#)
        .create_async()
        .await;

    let client = OpenSearchClient::new(&config(&server.url(), 10));
    client.write_events(&events(&["A1"])).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_write_events_reports_rejected_documents() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/_bulk")
        .with_status(200)
        .with_body(
            r#"{
                "errors": true,
                "items": [
                    { "index": { "_id": "A1", "status": 201 } },
                    { "index": { "_id": "A2", "status": 400, "error": {
                        "type": "mapper_parsing_exception",
                        "reason": "failed to parse field [cost]"
                    } } }
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = OpenSearchClient::new(&config(&server.url(), 10));
    let summary = client.write_events(&events(&["A1", "A2"])).await.unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(
        summary.failures,
        vec![DocumentFailure {
            id: "A2".to_string(),
            reason: "mapper_parsing_exception: failed to parse field [cost]".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_write_events_skips_keyless_events() {
    let server = Server::new_async().await;
    let client = OpenSearchClient::new(&config(&server.url(), 10));
    let summary = client.write_events(&[Event::default()]).await.unwrap();
    assert_eq!(summary.written, 0);
}

#[tokio::test]
async fn test_search() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/event_index/_search")
        .match_body(Matcher::Json(json!({
            "track_total_hits": true,
            "size": 100,
            "from": 0,
            "query": { "bool": { "must": [{ "term": { "game_id": "A1" } }] } },
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"hits":{"total":{"value":1},"hits":[
                {"_id":"A1","_source":{"game_id":"A1","title":"Dragon Dice"}}
            ]}}"#,
        )
        .create_async()
        .await;

    let mut params = IndexMap::new();
    params.insert("gameId".to_string(), vec!["A1".to_string()]);
    let request = SearchRequest::build(&params).unwrap();

    let client = OpenSearchClient::new(&config(&server.url(), 10));
    let results = client.search(&request).await.unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.events[0].title.as_deref(), Some("Dragon Dice"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/event_index/_search")
        .with_status(503)
        .with_body("cluster unavailable")
        .create_async()
        .await;

    let client = OpenSearchClient::new(&config(&server.url(), 10));
    let err = client
        .search(&SearchRequest::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_loaded_csv_is_written() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/_bulk")
        .match_body(Matcher::Regex(r#""_id":"RPG24ND00001""#.to_string()))
        .with_status(200)
        .with_body(r#"{"errors":false,"items":[]}"#)
        .create_async()
        .await;

    let loaded = load_events_from_str(
        "Game ID,Title,Cost $\nRPG24ND00001,Into the Dark,4\n,Nameless,2\n",
    )
    .unwrap();
    let client = OpenSearchClient::new(&config(&server.url(), 10));
    let summary = client.write_events(&loaded.events).await.unwrap();
    assert_eq!(summary.written, 1);
    mock.assert_async().await;
}

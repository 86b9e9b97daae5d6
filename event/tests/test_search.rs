use gcb_event::{load_events_from_str, SearchRequest, SearchResults};
use indexmap::IndexMap;
use serde_json::json;

fn query(s: &str) -> IndexMap<String, Vec<String>> {
    let mut params: IndexMap<String, Vec<String>> = IndexMap::new();
    for pair in s.split('&') {
        let (k, v) = pair.split_once('=').unwrap();
        params.entry(k.to_string()).or_default().push(v.to_string());
    }
    params
}

#[test]
fn test_search_body_for_typical_request() {
    let request = SearchRequest::build(&query(
        "filter=dragon&eventType=rpg&eventType=bgm&ageRequired=kids&cost=(,10]&sort=cost.desc&limit=25&page=2",
    ))
    .unwrap();

    assert_eq!(
        request.to_body().unwrap(),
        json!({
            "track_total_hits": true,
            "size": 25,
            "from": 50,
            "query": { "bool": { "must": [
                { "multi_match": {
                    "query": "dragon",
                    "fields": ["title^6", "short_description^2", "long_description"],
                    "operator": "and",
                } },
                { "terms": { "event_type": ["RPG - Role Playing Game", "BGM - Board Game"] } },
                { "term": { "age_required": "Kids only (12 and under)" } },
                { "range": { "cost": { "lte": 10 } } },
            ] } },
            "sort": [{ "cost": { "order": "desc" } }],
        })
    );
}

#[test]
fn test_invalid_request_reports_every_parameter() {
    let errors = SearchRequest::build(&query("year=last&limit=9000&color=red")).unwrap_err();
    let params: Vec<&str> = errors.iter().map(|e| e.param.as_str()).collect();
    assert_eq!(params, vec!["year", "limit", "color"]);
}

#[test]
fn test_loaded_events_survive_a_store_round_trip() {
    let loaded = load_events_from_str(
        "game id,title,event type,start date & time,also runs\n\
         WKS24ND00007,Paint Night,wks - workshop,08/03/2024 07:30 PM,08/04/2024\n",
    )
    .unwrap();
    let event = &loaded.events[0];

    let response = json!({
        "hits": {
            "total": { "value": 1 },
            "hits": [{ "_id": "WKS24ND00007", "_source": serde_json::to_value(event).unwrap() }],
        }
    });
    let results = SearchResults::from_response(response).unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(&results.events[0], event);
    assert_eq!(
        results.events[0].also_runs.unwrap().to_rfc3339(),
        "2024-08-04T00:00:00-04:00"
    );
}

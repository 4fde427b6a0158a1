//! Pagination contract tests for the set-page fetch loop.

use startgg_sync::config::Config;
use startgg_sync::error::AppError;
use startgg_sync::sync::client::create_http_client_with_timeout;
use startgg_sync::sync::paginator::fetch_all_sets;
use startgg_sync::testing_utils::{bye_only_set_node, set_node, sets_page_body};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        api_token: "integration-token".to_string(),
        api_url: server.uri(),
        log_file_path: None,
        http_timeout_seconds: 30,
    }
}

#[tokio::test]
async fn test_three_pages_issue_exactly_three_calls_in_order() {
    let server = MockServer::start().await;
    for page in 1..=3u64 {
        Mock::given(method("POST"))
            .and(body_string_contains(format!("page:{page} ")))
            .respond_with(ResponseTemplate::new(200).set_body_json(sets_page_body(
                3,
                vec![
                    set_node(&format!("page{page}-a"), page as i64),
                    set_node(&format!("page{page}-b"), page as i64),
                ],
            )))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = create_http_client_with_timeout(30).unwrap();
    let config = config_for(&server);

    let sets = fetch_all_sets(&client, &config, "event-1").await.unwrap();

    let ids: Vec<&str> = sets.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["page1-a", "page1-b", "page2-a", "page2-b", "page3-a", "page3-b"]
    );
    // Mock expectations verify exactly one call per page
    server.verify().await;
}

#[tokio::test]
async fn test_two_page_25_set_dataset_round_trip() {
    let server = MockServer::start().await;

    let mut page1 = Vec::new();
    for i in 0..17i64 {
        page1.push(set_node(&format!("p1-{i}"), i));
    }
    page1.push(bye_only_set_node("p1-bye-0"));
    page1.push(bye_only_set_node("p1-bye-1"));
    page1.push(bye_only_set_node("p1-bye-2"));

    let mut page2 = Vec::new();
    for i in 0..4i64 {
        page2.push(set_node(&format!("p2-{i}"), i));
    }
    page2.push(bye_only_set_node("p2-bye-0"));

    assert_eq!(page1.len() + page2.len(), 25);

    Mock::given(method("POST"))
        .and(body_string_contains("page:1 "))
        .respond_with(ResponseTemplate::new(200).set_body_json(sets_page_body(2, page1)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("page:2 "))
        .respond_with(ResponseTemplate::new(200).set_body_json(sets_page_body(2, page2)))
        .mount(&server)
        .await;

    let client = create_http_client_with_timeout(30).unwrap();
    let config = config_for(&server);

    let sets = fetch_all_sets(&client, &config, "event-9").await.unwrap();

    // 25 sets minus 4 bye-only placeholders
    assert_eq!(sets.len(), 21);
    assert!(sets.iter().all(|s| !s.id.contains("bye")));
}

#[tokio::test]
async fn test_missing_envelope_mid_pagination_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("page:1 "))
        .respond_with(ResponseTemplate::new(200).set_body_json(sets_page_body(
            2,
            vec![set_node("p1-0", 1)],
        )))
        .mount(&server)
        .await;
    // Page 2 loses the pageInfo envelope
    Mock::given(method("POST"))
        .and(body_string_contains("page:2 "))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"event": {"sets": {"nodes": []}}}
        })))
        .mount(&server)
        .await;

    let client = create_http_client_with_timeout(30).unwrap();
    let config = config_for(&server);

    let err = fetch_all_sets(&client, &config, "event-1").await.unwrap_err();
    assert!(matches!(err, AppError::Protocol { .. }));
}

#[tokio::test]
async fn test_transport_error_mid_pagination_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("page:1 "))
        .respond_with(ResponseTemplate::new(200).set_body_json(sets_page_body(
            3,
            vec![set_node("p1-0", 1)],
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("page:2 "))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = create_http_client_with_timeout(30).unwrap();
    let config = config_for(&server);

    let err = fetch_all_sets(&client, &config, "event-1").await.unwrap_err();
    assert!(matches!(err, AppError::Transport { status: 502, .. }));
}

use saverbot_client::types::SaveTaskRequest;
use saverbot_client::{RecentQuery, SaverApi, SaverError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn api_for(server: &MockServer) -> SaverApi {
    SaverApi::new(&server.uri(), SaverApi::DEFAULT_USER_AGENT).expect("client builds")
}

#[tokio::test]
async fn query_article_hits_the_exact_path_with_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article/query/P1001"))
        .and(header("user-agent", "Uptime-Kuma"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"id": "P1001", "title": "A+B"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let envelope = api.query_article("P1001").await.unwrap();

    assert!(envelope.is_success());
    let article = envelope.data.unwrap();
    assert_eq!(article.id.as_deref(), Some("P1001"));
    assert_eq!(article.title.as_deref(), Some("A+B"));
}

#[tokio::test]
async fn identifiers_are_encoded_as_a_single_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article/query/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let envelope = api.query_article("a b").await.unwrap();
    assert!(envelope.is_success());
}

#[tokio::test]
async fn trailing_slash_on_the_endpoint_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"count": 7}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = format!("{}/", server.uri());
    let api = SaverApi::new(&endpoint, "Uptime-Kuma").unwrap();
    let envelope = api.article_count().await.unwrap();

    assert_eq!(envelope.data.unwrap().count, Some(7));
}

#[tokio::test]
async fn non_success_status_maps_to_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article/query/missing"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let err = api.query_article("missing").await.unwrap_err();

    assert!(matches!(err, SaverError::Transport { status: 502 }));
}

#[tokio::test]
async fn recent_articles_sends_only_the_set_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article/recent"))
        .and(query_param("count", "5"))
        .and(query_param("updated_after", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [{"id": "P1", "title": "one"}, {"id": "P2", "title": "two"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let query = RecentQuery {
        count: Some(5),
        updated_after: Some("2024-01-01".into()),
        truncated_count: None,
    };
    let envelope = api.recent_articles(&query).await.unwrap();

    let articles = envelope.data.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].id.as_deref(), Some("P2"));
}

#[tokio::test]
async fn relevant_and_history_share_the_article_route_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article/relevant/P1001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [{"id": "P1002"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/article/history/P1001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [{"id": 9, "articleId": "P1001", "version": 3}]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server).await;

    let relevant = api.relevant_articles("P1001").await.unwrap();
    assert_eq!(relevant.data.unwrap()[0].id.as_deref(), Some("P1002"));

    let history = api.article_history("P1001").await.unwrap();
    let entry = &history.data.unwrap()[0];
    assert_eq!(entry.id.as_deref(), Some("9"));
    assert_eq!(entry.version, Some(3));
}

#[tokio::test]
async fn create_task_posts_the_save_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/task/create"))
        .and(body_json(json!({
            "type": "save",
            "payload": {"target": "article", "targetId": "P1001"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"taskId": "t-123"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let envelope = api
        .create_task(&SaveTaskRequest::save("article", "P1001"))
        .await
        .unwrap();

    assert!(envelope.is_success());
    assert_eq!(envelope.data.unwrap().task_id.as_deref(), Some("t-123"));
}

#[tokio::test]
async fn query_task_returns_the_envelope_undigested() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/query/t-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"id": "t-123", "status": 1, "type": "save"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let envelope = api.query_task("t-123").await.unwrap();

    let task = envelope.data.unwrap();
    assert_eq!(task.id.as_deref(), Some("t-123"));
    assert_eq!(task.status, Some(1));
    assert_eq!(task.kind.as_deref(), Some("save"));
}

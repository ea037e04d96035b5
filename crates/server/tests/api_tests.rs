use std::sync::Arc;

use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use tower::ServiceExt;

use ideas_core::{AttachmentSet, Idea, IdeaId, IdeaKey, UserId, Visibility, put_requests};
use ideas_handler::UpdateIdeaHandler;
use ideas_server::api::AppState;
use ideas_store::{IdeaStore, TagIndex};
use ideas_store_memory::{MemoryAttachmentStore, MemoryIdeaStore, MemoryTagIndex};

// -- Helpers --------------------------------------------------------------

struct TestApp {
    app: axum::Router,
    ideas: Arc<MemoryIdeaStore>,
    tags: Arc<MemoryTagIndex>,
    files: Arc<MemoryAttachmentStore>,
}

async fn build_app() -> TestApp {
    let ideas = Arc::new(MemoryIdeaStore::new());
    let tags = Arc::new(MemoryTagIndex::new());
    let files = Arc::new(MemoryAttachmentStore::with_objects(["x.pdf", "y.pdf"]));

    let mut idea = Idea::new(&IdeaKey::new("i1", "u1"));
    idea.title = "Draft".into();
    idea.slug = "draft".into();
    idea.file_attachments = AttachmentSet::from_keys(["x.pdf", "y.pdf"]);
    ideas.put(&idea).await.unwrap();
    tags.write_batch(&put_requests(
        &["a".to_owned(), "b".to_owned()],
        &UserId::new("u1"),
        &IdeaId::new("i1"),
    ))
    .await
    .unwrap();

    let handler = UpdateIdeaHandler::new(ideas.clone(), tags.clone(), files.clone());
    let app = ideas_server::api::router(AppState {
        handler: Arc::new(handler),
    });
    TestApp {
        app,
        ideas,
        tags,
        files,
    }
}

fn update_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri("/v1/ideas/update")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn event(username: &str, arguments: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ctx": {
            "identity": {"username": username},
            "arguments": arguments
        }
    })
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let test = build_app().await;

    let response = test
        .app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn update_applies_all_steps() {
    let test = build_app().await;

    let response = test
        .app
        .oneshot(update_request(&event(
            "u1",
            serde_json::json!({
                "title": "My Idea",
                "content": "<p>Hello <script>x()</script>world</p>",
                "ideaId": "i1",
                "ideaOwnerId": "u1",
                "tags": ["b", "c"],
                "fileAttachments": ["y.pdf"],
                "imageAttachments": ["cover.png"],
                "isPrivate": true
            }),
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"result": {"ok": true}, "idea": {"ideaId": "i1", "slug": "my-idea"}})
    );

    let idea = test
        .ideas
        .get(&IdeaKey::new("i1", "u1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(idea.title, "My Idea");
    assert_eq!(idea.visibility, Visibility::Private);
    assert_eq!(idea.preview_image.as_deref(), Some("cover.png"));
    assert_eq!(idea.content.as_deref(), Some("<p>Hello world</p>"));
    assert_eq!(idea.stripped_content.as_deref(), Some("Hello world"));

    assert_eq!(test.files.keys(), ["y.pdf"]);

    let mut tags = test.tags.tags_for_idea(&IdeaId::new("i1")).await.unwrap();
    tags.sort();
    assert_eq!(tags, ["b", "c"]);
}

#[tokio::test]
async fn permission_failure_is_in_band() {
    let test = build_app().await;

    let response = test
        .app
        .oneshot(update_request(&event(
            "u2",
            serde_json::json!({"title": "Mine now", "ideaId": "i1", "ideaOwnerId": "u1"}),
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({
            "result": {"ok": false, "error": "You do not have permission to edit this idea"}
        })
    );
    assert_eq!(test.files.keys(), ["x.pdf", "y.pdf"]);
}

#[tokio::test]
async fn too_many_tags_is_in_band() {
    let test = build_app().await;
    let tags: Vec<String> = (0..101).map(|i| format!("t{i}")).collect();

    let response = test
        .app
        .oneshot(update_request(&event(
            "u1",
            serde_json::json!({"title": "T", "ideaId": "i1", "ideaOwnerId": "u1", "tags": tags}),
        )))
        .await
        .unwrap();

    let json = json_body(response).await;
    assert_eq!(json["result"]["ok"], false);
    assert_eq!(json["result"]["error"], "Too much tags");
    assert!(json.get("idea").is_none());
}

#[tokio::test]
async fn unknown_idea_is_in_band() {
    let test = build_app().await;

    let response = test
        .app
        .oneshot(update_request(&event(
            "u1",
            serde_json::json!({"title": "T", "ideaId": "nope", "ideaOwnerId": "u1"}),
        )))
        .await
        .unwrap();

    let json = json_body(response).await;
    assert_eq!(json["result"]["error"], "Idea not found");
}

#[tokio::test]
async fn malformed_event_is_in_band() {
    let test = build_app().await;

    let response = test
        .app
        .oneshot(update_request(&serde_json::json!({"ctx": {"arguments": {}}})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["result"]["ok"], false);
    assert!(
        json["result"]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request: ")
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let test = build_app().await;

    let response = test
        .app
        .oneshot(
            Request::builder()
                .uri("/v1/ideas")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

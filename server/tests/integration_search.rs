use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use server::Sources;
use std::fs;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn build_tiny_corpus() -> (TempDir, Sources) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("noisewords.txt"), "the\nis\n").unwrap();
    fs::write(dir.path().join("docs.txt"), "docA.txt docB.txt docC.txt docD.txt").unwrap();
    fs::write(dir.path().join("docA.txt"), "Deep deep deep deep deep. The world is wide").unwrap();
    fs::write(dir.path().join("docB.txt"), "deep, deep, deep!").unwrap();
    fs::write(dir.path().join("docC.txt"), "World world world world WORLD").unwrap();
    fs::write(dir.path().join("docD.txt"), "world? world.").unwrap();
    let sources = Sources { docs: dir.path().join("docs.txt"), noise: dir.path().join("noisewords.txt") };
    (dir, sources)
}

const ADMIN_TOKEN: &str = "reload-secret";

async fn call_raw(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = call_raw(app, req).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    call(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn search_ranks_with_first_keyword_preference() {
    let (_dir, sources) = build_tiny_corpus();
    let app = server::build_app(sources).unwrap();

    let (status, json) = get(app, "/search?kw1=Deep&kw2=world").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["matched"], true);
    let docs: Vec<&str> = json["results"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
    assert_eq!(docs, vec!["docA.txt", "docC.txt", "docB.txt", "docD.txt"]);
}

#[tokio::test]
async fn search_without_matches_returns_null() {
    let (_dir, sources) = build_tiny_corpus();
    let app = server::build_app(sources).unwrap();

    let (status, json) = get(app, "/search?kw1=ocean&kw2=the").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["matched"], false);
    assert!(json["results"].is_null());
}

#[tokio::test]
async fn search_respects_k() {
    let (_dir, sources) = build_tiny_corpus();
    let app = server::build_app(sources).unwrap();

    let (_, json) = get(app, "/search?kw1=world&kw2=deep&k=2").await;
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn keyword_lists_occurrences() {
    let (_dir, sources) = build_tiny_corpus();
    let app = server::build_app(sources).unwrap();

    let (status, json) = get(app.clone(), "/keyword/world").await;
    assert_eq!(status, StatusCode::OK);
    let occs = json.as_array().unwrap();
    assert_eq!(occs[0]["document"], "docC.txt");
    assert_eq!(occs[0]["frequency"], 5);
    assert_eq!(occs.len(), 3);

    let (status, _) = get(app, "/keyword/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reload_requires_admin_token() {
    let (_dir, sources) = build_tiny_corpus();
    let app = server::build_app(sources).unwrap();

    let req = Request::post("/index/reload").header("X-ADMIN-TOKEN", "wrong").body(Body::empty()).unwrap();
    let (status, _) = call(app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_input_fails_startup() {
    let dir = tempdir().unwrap();
    let sources = Sources { docs: dir.path().join("docs.txt"), noise: dir.path().join("noise.txt") };
    assert!(server::build_app(sources).is_err());
}

#[tokio::test]
async fn health_says_ok() {
    let (_dir, sources) = build_tiny_corpus();
    let app = server::build_app(sources).unwrap();

    let (status, body) = call_raw(app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn stats_counts_keywords_and_occurrences() {
    let (_dir, sources) = build_tiny_corpus();
    let app = server::build_app(sources).unwrap();

    // deep x2, world x3, wide x1
    let (status, json) = get(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["keywords"], 3);
    assert_eq!(json["occurrences"], 6);
}

#[tokio::test]
async fn reload_rebuilds_from_changed_files() {
    let (dir, sources) = build_tiny_corpus();
    std::env::set_var("ADMIN_TOKEN", ADMIN_TOKEN);
    let app = server::build_app(sources).unwrap();

    let (_, json) = get(app.clone(), "/search?kw1=Ocean&kw2=").await;
    assert_eq!(json["matched"], false);

    fs::write(dir.path().join("docE.txt"), "Ocean ocean, the ocean!").unwrap();
    fs::write(dir.path().join("docs.txt"), "docA.txt docB.txt docC.txt docD.txt docE.txt").unwrap();
    let req = Request::post("/index/reload").header("X-ADMIN-TOKEN", ADMIN_TOKEN).body(Body::empty()).unwrap();
    let (status, json) = call(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["keywords"], 4);

    let (_, json) = get(app.clone(), "/search?kw1=Ocean&kw2=").await;
    assert_eq!(json["matched"], true);
    assert_eq!(json["results"], serde_json::json!(["docE.txt"]));

    let (_, json) = get(app, "/stats").await;
    assert_eq!(json["keywords"], 4);
    assert_eq!(json["occurrences"], 7);
}

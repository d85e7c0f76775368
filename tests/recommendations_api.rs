mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{test_app_with, TestApp};

const COMPLETION: &str = "1. Walking on Sunshine - Katrina and the Waves\n\
\"Happy - Pharrell Williams\"\n\
Here are some songs for you:\n\
missing - Nobody\n\
broken - Server Error\n\
Dancing Queen - ABBA";

async fn recommend(app: &TestApp) -> (StatusCode, serde_json::Value) {
    app.send(
        Method::POST,
        "/api/recommendations",
        None,
        Some(json!({"mood": "happy", "language": "English", "genre": "pop"})),
    )
    .await
}

#[tokio::test]
async fn returns_enriched_songs_and_drops_failed_lookups() {
    let app = test_app_with(Some(COMPLETION), false);
    let (status, body) = recommend(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    for rec in recs {
        assert_eq!(
            rec["youtubeLink"],
            "https://www.youtube.com/watch?v=vid_1234567"
        );
        assert!(rec.get("imageUrl").is_none());
    }
    assert_eq!(recs[1]["songTitle"], "Happy");
    assert_eq!(recs[1]["artist"], "Pharrell Williams");
    assert_eq!(recs[2]["artist"], "ABBA");
}

#[tokio::test]
async fn at_most_five_songs_are_returned() {
    let app = test_app_with(Some("A - 1\nB - 2\nC - 3\nD - 4\nE - 5\nF - 6\nG - 7"), false);
    let (status, body) = recommend(&app).await;

    assert_eq!(status, StatusCode::OK);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 5);
    assert_eq!(recs[4]["songTitle"], "E");
}

#[tokio::test]
async fn cover_art_is_attached_when_configured() {
    let app = test_app_with(Some("Dancing Queen - ABBA"), true);
    let (status, body) = recommend(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["recommendations"][0]["imageUrl"],
        "https://img.example/Dancing Queen/xl.png"
    );
}

#[tokio::test]
async fn upstream_failure_is_a_gateway_error() {
    let app = test_app_with(None, false);
    let (status, body) = recommend(&app).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({"success": false, "error": "Failed to get recommendations"})
    );
}

#[tokio::test]
async fn unusable_completion_is_an_empty_success() {
    let app = test_app_with(Some("I'm sorry, I cannot help with that."), false);
    let (status, body) = recommend(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn missing_preferences_are_rejected() {
    let app = test_app_with(Some(COMPLETION), false);
    let (status, body) = app
        .send(
            Method::POST,
            "/api/recommendations",
            None,
            Some(json!({"mood": "happy"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn signed_in_callers_can_also_recommend() {
    let app = test_app_with(Some(COMPLETION), false);
    let (token, _) = app.register("alice").await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/recommendations",
            Some(&token),
            Some(json!({"mood": "calm", "language": "French", "genre": "jazz"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

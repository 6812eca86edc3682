//! HTTP-level tests for the `/characters` resource.
//!
//! Covers create/read/update/delete, film link replacement through the
//! `films` field, invalid film references, and search query parameters.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete_auth, get, put_json_auth, test_token, BASE_URL};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_film(app: &axum::Router, title: &str) -> String {
    let film = create(app, "/api/v1/movies", json!({ "title": title })).await;
    film["id"].as_str().unwrap().to_string()
}

async fn create_character(app: &axum::Router, body: Value) -> String {
    let character = create(app, "/api/v1/characters", body).await;
    character["id"].as_str().unwrap().to_string()
}

async fn fetch(app: &axum::Router, uri: &str) -> Value {
    let response = get(app.clone(), uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

fn film_titles(detail: &Value) -> Vec<String> {
    detail["films"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_returns_detail_with_film_links() {
    let app = common::build_test_app();
    let film_id = create_film(&app, "Lilo & Stitch").await;

    let character = create(
        &app,
        "/api/v1/characters",
        json!({
            "name": "Stitch",
            "story": "Experiment 626",
            "age": 3,
            "weight": 40.5,
            "films": [film_id],
        }),
    )
    .await;

    assert_eq!(character["name"], "Stitch");
    assert_eq!(character["image"], "");
    assert_eq!(character["age"], 3);
    assert_eq!(character["films"][0]["title"], "Lilo & Stitch");
    assert_eq!(
        character["films"][0]["reference"],
        format!("{BASE_URL}/movies/{film_id}")
    );
}

#[tokio::test]
async fn test_create_without_story_is_validation_error() {
    let app = common::build_test_app();
    let response = common::post_json_auth(
        app,
        "/api/v1/characters",
        json!({ "name": "Nameless" }),
        &test_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_is_partial() {
    let app = common::build_test_app();
    let id = create_character(
        &app,
        json!({ "name": "Ariel", "story": "A mermaid", "age": 16 }),
    )
    .await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/characters/{id}"),
        json!({ "weight": 50.0 }),
        &test_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let detail = fetch(&app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(detail["name"], "Ariel");
    assert_eq!(detail["story"], "A mermaid");
    assert_eq!(detail["age"], 16);
    assert_eq!(detail["weight"], 50.0);
}

#[tokio::test]
async fn test_update_unknown_character_is_not_found() {
    let app = common::build_test_app();
    let response = put_json_auth(
        app,
        &format!("/api/v1/characters/{}", uuid::Uuid::new_v4()),
        json!({ "age": 1 }),
        &test_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_then_delete_again() {
    let app = common::build_test_app();
    let id = create_character(&app, json!({ "name": "Rapunzel", "story": "Long hair" })).await;
    let uri = format!("/api/v1/characters/{id}");

    let response = delete_auth(app.clone(), &uri, &test_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["deleted"], true);

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &uri, &test_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["data"]["deleted"], false);
}

// ---------------------------------------------------------------------------
// Film links
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_films_field_replaces_links() {
    let app = common::build_test_app();
    let a = create_film(&app, "Shrek").await;
    let b = create_film(&app, "Shrek 2").await;
    let c = create_film(&app, "Shrek the Third").await;
    let id = create_character(&app, json!({ "name": "shrek", "story": "An ogre" })).await;
    let uri = format!("/api/v1/characters/{id}");

    let response = put_json_auth(app.clone(), &uri, json!({ "films": [a, b] }), &test_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(film_titles(&fetch(&app, &uri).await), ["Shrek", "Shrek 2"]);

    put_json_auth(app.clone(), &uri, json!({ "films": [c] }), &test_token()).await;
    assert_eq!(film_titles(&fetch(&app, &uri).await), ["Shrek the Third"]);

    // Omitting `films` leaves links alone
    put_json_auth(app.clone(), &uri, json!({ "age": 30 }), &test_token()).await;
    assert_eq!(film_titles(&fetch(&app, &uri).await), ["Shrek the Third"]);

    put_json_auth(app.clone(), &uri, json!({ "films": [] }), &test_token()).await;
    assert!(film_titles(&fetch(&app, &uri).await).is_empty());
}

#[tokio::test]
async fn test_bogus_film_id_is_invalid_reference() {
    let app = common::build_test_app();
    let film = create_film(&app, "Frozen").await;
    let id = create_character(
        &app,
        json!({ "name": "Elsa", "story": "Ice queen", "films": [film] }),
    )
    .await;
    let uri = format!("/api/v1/characters/{id}");

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "films": ["bogus-id"] }),
        &test_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");
    assert!(json["error"].as_str().unwrap().contains("bogus-id"));
    assert_eq!(film_titles(&fetch(&app, &uri).await), ["Frozen"]);
}

#[tokio::test]
async fn test_unknown_film_uuid_on_create_creates_nothing() {
    let app = common::build_test_app();
    let response = common::post_json_auth(
        app.clone(),
        "/api/v1/characters",
        json!({ "name": "Olaf", "story": "A snowman", "films": [uuid::Uuid::new_v4()] }),
        &test_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let all = fetch(&app, "/api/v1/characters").await;
    assert_eq!(all.as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_by_movie_returns_each_character_once() {
    let app = common::build_test_app();
    let a = create_film(&app, "Toy Story").await;
    let b = create_film(&app, "Toy Story 2").await;
    create_character(
        &app,
        json!({ "name": "Woody", "story": "A cowboy", "films": [a, b] }),
    )
    .await;
    create_character(&app, json!({ "name": "Lonely", "story": "No films" })).await;

    let found = fetch(&app, "/api/v1/characters?movie=toy%20story").await;
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Woody");
    assert!(found[0].get("story").is_none(), "summaries omit the story");
}

#[tokio::test]
async fn test_search_by_film_title_spelling() {
    let app = common::build_test_app();
    let film = create_film(&app, "Cars").await;
    create_character(
        &app,
        json!({ "name": "Mater", "story": "Tow truck", "films": [film] }),
    )
    .await;

    let found = fetch(&app, "/api/v1/characters?film_title=cars").await;
    assert_eq!(found.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_with_both_film_filters_is_bad_request() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/characters?movie=cars&film_title=up").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_search_by_age_is_deterministic() {
    let app = common::build_test_app();
    for (name, age) in [("Huey", 1), ("Dewey", 1), ("Louie", 2)] {
        create_character(&app, json!({ "name": name, "story": "A duck", "age": age })).await;
    }

    let first = fetch(&app, "/api/v1/characters?age=1").await;
    let second = fetch(&app, "/api/v1/characters?age=1").await;

    let names: Vec<&str> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Dewey", "Huey"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_search_without_params_lists_everyone() {
    let app = common::build_test_app();
    create_character(&app, json!({ "name": "Timon", "story": "Meerkat" })).await;
    create_character(&app, json!({ "name": "Pumbaa", "story": "Warthog" })).await;

    let all = fetch(&app, "/api/v1/characters?name=").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

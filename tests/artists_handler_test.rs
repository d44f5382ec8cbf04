//! Integration tests for artist handler routes

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use fyyur::db::entities::{artist, show};
use fyyur::handlers;
use fyyur::state::AppState;
use fyyur::test_utils::*;

fn create_test_router(state: &AppState) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes())
        .with_state(state.clone())
}

async fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: axum::response::Response,
) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn new_artist_payload() -> Value {
    json!({
        "name": "Guns N Petals",
        "city": "San Francisco",
        "state": "CA",
        "phone": "2125550100",
        "genres": ["Rock n Roll"],
        "image_link": "https://images.example.com/guns-n-petals.jpg",
        "facebook_link": "https://www.facebook.com/GunsNPetals",
        "seeking_venue": true,
        "seeking_description": "Looking for shows to perform at in the San Francisco Bay Area!"
    })
}

#[tokio::test]
async fn test_list_artists() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "Guns N Petals").await;
    create_test_artist(&state.db, "Matt Quevedo").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/api/artists").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_json_response(response).await;
    let artists = body.as_array().unwrap();
    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0]["name"], "Guns N Petals");
    assert_eq!(artists[1]["name"], "Matt Quevedo");
}

#[tokio::test]
async fn test_search_artists_partial_match() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let petals = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_artist(&state.db, "Matt Quevedo").await;
    create_test_artist(&state.db, "The Wild Sax Band").await;
    create_test_show(&state.db, petals.id, venue.id, at("2099-04-01 20:00:00")).await;
    create_test_show(&state.db, petals.id, venue.id, at("2019-05-21 21:30:00")).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(json_request("POST", "/api/artists/search", json!({ "search_term": "A" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["results"]["count"], 3);

    let response = create_test_router(&state)
        .oneshot(json_request("POST", "/api/artists/search", json!({ "search_term": "band" })))
        .await
        .unwrap();
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["results"]["count"], 1);
    assert_eq!(body["results"]["data"][0]["name"], "The Wild Sax Band");

    let response = create_test_router(&state)
        .oneshot(json_request("POST", "/api/artists/search", json!({ "search_term": "petals" })))
        .await
        .unwrap();
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["results"]["data"][0]["num_upcoming_shows"], 1);
}

#[tokio::test]
async fn test_get_artist_with_shows() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, at("2019-05-21 21:30:00")).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/artists/{}", artist.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["name"], "Guns N Petals");
    assert_eq!(body["seeking_venue"], false);
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 0);
    assert_eq!(body["past_shows"][0]["venue_id"], venue.id);
    assert_eq!(body["past_shows"][0]["venue_name"], "The Musical Hop");
    assert_eq!(body["upcoming_shows"], json!([]));
}

#[tokio::test]
async fn test_get_artist_not_found() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/api/artists/99999").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_artist() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(json_request("POST", "/api/artists", new_artist_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["message"], "Artist Guns N Petals was successfully listed!");

    let stored = artist::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].seeking_venue);
    assert_eq!(stored[0].genres.0, vec!["Rock n Roll".to_string()]);
}

#[tokio::test]
async fn test_create_artist_missing_name() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let mut payload = new_artist_payload();
    payload["name"] = json!("   ");
    payload["website_link"] = json!("not a url");

    let response = app
        .oneshot(json_request("POST", "/api/artists", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = parse_json_response(response).await;
    assert!(body["fields"].get("name").is_some());
    assert!(body["fields"].get("website_link").is_some());
    assert_eq!(artist::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_artist_form() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Matt Quevedo").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/artists/{}/edit", artist.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["id"], artist.id);
    assert_eq!(body["form"]["name"], "Matt Quevedo");
    assert_eq!(body["form"]["phone"], "2125550100");
    assert_eq!(body["form"]["seeking_venue"], false);
}

#[tokio::test]
async fn test_update_artist() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Matt Quevedo").await;
    let app = create_test_router(&state);

    let mut payload = new_artist_payload();
    payload["name"] = json!("Matt Quevedo Trio");
    payload["genres"] = json!(["Jazz"]);

    let response = app
        .oneshot(json_request("PUT", &format!("/api/artists/{}", artist.id), payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_json_response(response).await;
    assert_eq!(
        body["message"],
        "The Artist Matt Quevedo Trio has been successfully updated!"
    );
    assert_eq!(body["artist"]["genres"], json!(["Jazz"]));
    assert_eq!(body["artist"]["seeking_venue"], true);
}

#[tokio::test]
async fn test_update_artist_invalid_keeps_record() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Matt Quevedo").await;
    let app = create_test_router(&state);

    let mut payload = new_artist_payload();
    payload["genres"] = json!([]);

    let response = app
        .oneshot(json_request("PUT", &format!("/api/artists/{}", artist.id), payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let stored = artist::Entity::find_by_id(artist.id)
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, artist);
}

#[tokio::test]
async fn test_delete_artist() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, at("2019-05-21 21:30:00")).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/artists/{}", artist.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["message"], "Artist Guns N Petals deleted successfully!");
    assert_eq!(artist::Entity::find().count(&state.db).await.unwrap(), 0);
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 0);
}

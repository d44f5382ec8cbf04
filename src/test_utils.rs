//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data generators

use chrono::NaiveDateTime;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::Config,
    db::entities::{artist, show, venue, Genres},
    services::partition::START_TIME_FORMAT,
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run all migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        recent_listings_limit: 5,
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    AppState::new(db, test_config())
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp
pub fn at(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, START_TIME_FORMAT)
        .expect("Test timestamps use YYYY-MM-DD HH:MM:SS")
}

// ============================================================================
// Test Data Factories
// ============================================================================

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        phone: Set(Some("4155550100".to_string())),
        image_link: Set(Some(format!("https://images.example.com/{}.jpg", slug(name)))),
        facebook_link: Set(None),
        website_link: Set(None),
        genres: Set(Genres(vec!["Jazz".to_string()])),
        seeking_artist: Set(true),
        seeking_description: Set(venue::DEFAULT_SEEKING_DESCRIPTION.to_string()),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        phone: Set(Some("2125550100".to_string())),
        genres: Set(Genres(vec!["Rock n Roll".to_string()])),
        image_link: Set(Some(format!("https://images.example.com/{}.jpg", slug(name)))),
        facebook_link: Set(None),
        website_link: Set(None),
        seeking_venue: Set(false),
        seeking_description: Set(artist::DEFAULT_SEEKING_DESCRIPTION.to_string()),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: NaiveDateTime,
) -> show::Model {
    let show = show::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(start_time),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

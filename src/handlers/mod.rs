pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{NaiveDateTime, Utc};

use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::index))

        // Venue endpoints
        .route("/venues", get(venues::list_venues).post(venues::create_venue))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/:id",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )
        .route("/venues/:id/edit", get(venues::edit_venue_form))

        // Artist endpoints
        .route("/artists", get(artists::list_artists).post(artists::create_artist))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/:id",
            get(artists::get_artist)
                .put(artists::update_artist)
                .delete(artists::delete_artist),
        )
        .route("/artists/:id/edit", get(artists::edit_artist_form))

        // Show endpoints
        .route("/shows", get(shows::list_shows).post(shows::create_show))
}

/// Reference time for splitting shows into past and upcoming.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

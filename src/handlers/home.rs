use axum::{extract::State, Json};

use crate::{
    error::Result,
    services::listing::{recent_listings, RecentListings},
    state::AppState,
};

/// Most recently listed venues and artists
pub async fn index(State(state): State<AppState>) -> Result<Json<RecentListings>> {
    let listings = recent_listings(&state.db, state.config.recent_listings_limit).await?;
    Ok(Json(listings))
}

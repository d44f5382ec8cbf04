use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    db::repositories::VenueRepository,
    error::{AppError, Result},
    forms::{SearchForm, VenueForm},
    services::{
        detail::{venue_detail, VenueDetail},
        listing::{list_venues_grouped, VenueArea},
        search::{self, SearchResults},
    },
    state::AppState,
};

use super::now;

/// Venues grouped by city and state
pub async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<VenueArea>>> {
    Ok(Json(list_venues_grouped(&state.db).await?))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Json(form): Json<SearchForm>,
) -> Result<Json<Value>> {
    let results: SearchResults =
        search::search_venues(&state.db, &form.search_term, now()).await?;
    Ok(Json(json!({
        "results": results,
        "search_term": form.search_term,
    })))
}

pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>> {
    Ok(Json(venue_detail(&state.db, id, now()).await?))
}

pub async fn create_venue(
    State(state): State<AppState>,
    Json(form): Json<VenueForm>,
) -> Result<(StatusCode, Json<Value>)> {
    let form = form.cleaned()?;
    let name = form.name.clone();

    let venue = VenueRepository::new(state.db.clone())
        .create(form)
        .await
        .map_err(|e| {
            e.into_persistence(format!("An error occurred. Venue {} could not be listed.", name))
        })?;

    let message = format!("Venue {} was successfully listed!", venue.name);
    tracing::info!(venue_id = venue.id, "{}", message);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": message, "venue": venue })),
    ))
}

/// Current values of a venue, shaped as the edit form expects them
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let venue = VenueRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

    Ok(Json(json!({
        "id": venue.id,
        "form": VenueForm::from(venue),
    })))
}

pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<VenueForm>,
) -> Result<Json<Value>> {
    let form = form.cleaned()?;

    let venue = VenueRepository::new(state.db.clone())
        .update(id, form)
        .await
        .map_err(|e| e.into_persistence("An error occurred while trying to update the venue."))?;

    let message = format!("Venue {} has been updated", venue.name);
    tracing::info!(venue_id = venue.id, "{}", message);

    Ok(Json(json!({ "message": message, "venue": venue })))
}

pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let venue = VenueRepository::new(state.db.clone())
        .delete(id)
        .await
        .map_err(|e| e.into_persistence(format!("Venue {} not deleted.", id)))?;

    let message = format!("Venue {} deleted successfully!", venue.name);
    tracing::info!(venue_id = venue.id, "{}", message);

    Ok(Json(json!({ "message": message })))
}

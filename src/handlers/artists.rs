use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    db::repositories::ArtistRepository,
    error::{AppError, Result},
    forms::{ArtistForm, SearchForm},
    services::{
        detail::{artist_detail, ArtistDetail},
        listing::{self, ArtistSummary},
        search::{self, SearchResults},
    },
    state::AppState,
};

use super::now;

pub async fn list_artists(State(state): State<AppState>) -> Result<Json<Vec<ArtistSummary>>> {
    Ok(Json(listing::list_artists(&state.db).await?))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Json(form): Json<SearchForm>,
) -> Result<Json<Value>> {
    let results: SearchResults =
        search::search_artists(&state.db, &form.search_term, now()).await?;
    Ok(Json(json!({
        "results": results,
        "search_term": form.search_term,
    })))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>> {
    Ok(Json(artist_detail(&state.db, id, now()).await?))
}

pub async fn create_artist(
    State(state): State<AppState>,
    Json(form): Json<ArtistForm>,
) -> Result<(StatusCode, Json<Value>)> {
    let form = form.cleaned()?;
    let name = form.name.clone();

    let artist = ArtistRepository::new(state.db.clone())
        .create(form)
        .await
        .map_err(|e| {
            e.into_persistence(format!("An error occurred. Artist {} could not be listed.", name))
        })?;

    let message = format!("Artist {} was successfully listed!", artist.name);
    tracing::info!(artist_id = artist.id, "{}", message);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": message, "artist": artist })),
    ))
}

/// Current values of an artist, shaped as the edit form expects them
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let artist = ArtistRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    Ok(Json(json!({
        "id": artist.id,
        "form": ArtistForm::from(artist),
    })))
}

pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<Value>> {
    let form = form.cleaned()?;

    let artist = ArtistRepository::new(state.db.clone())
        .update(id, form)
        .await
        .map_err(|e| e.into_persistence("An error occurred while trying to update the artist."))?;

    let message = format!("The Artist {} has been successfully updated!", artist.name);
    tracing::info!(artist_id = artist.id, "{}", message);

    Ok(Json(json!({ "message": message, "artist": artist })))
}

pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let artist = ArtistRepository::new(state.db.clone())
        .delete(id)
        .await
        .map_err(|e| e.into_persistence(format!("Artist {} not deleted.", id)))?;

    let message = format!("Artist {} deleted successfully!", artist.name);
    tracing::info!(artist_id = artist.id, "{}", message);

    Ok(Json(json!({ "message": message })))
}

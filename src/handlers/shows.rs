use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    db::repositories::ShowRepository,
    error::Result,
    forms::ShowForm,
    services::{
        listing::{self, ShowListing},
        partition::format_start_time,
    },
    state::AppState,
};

use super::now;

pub async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<ShowListing>>> {
    Ok(Json(listing::list_shows(&state.db).await?))
}

pub async fn create_show(
    State(state): State<AppState>,
    Json(form): Json<ShowForm>,
) -> Result<(StatusCode, Json<Value>)> {
    let new_show = form.cleaned()?;

    let show = ShowRepository::new(state.db.clone())
        .create(new_show, now())
        .await
        .map_err(|e| e.into_persistence("An error occurred. Show could not be listed."))?;

    tracing::info!(
        show_id = show.id,
        artist_id = show.artist_id,
        venue_id = show.venue_id,
        "Show was successfully listed"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Show was successfully listed!",
            "show": {
                "id": show.id,
                "artist_id": show.artist_id,
                "venue_id": show.venue_id,
                "start_time": format_start_time(show.start_time),
            },
        })),
    ))
}

//! Case-insensitive substring search on venue and artist names.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::Expr,
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;

use crate::{
    db::entities::{artist, show, venue},
    error::Result,
    services::listing::{ArtistSummary, VenueSummary},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

/// Keeps the rows whose name contains `term`, compared after Unicode lowercasing.
/// SQLite's `LOWER` only folds ASCII, so both sides are folded here.
fn filter_by_name(rows: Vec<(i32, String)>, term: &str) -> Vec<(i32, String)> {
    let needle = term.to_lowercase();
    rows.into_iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .collect()
}

/// Counts shows starting after `now`, keyed by the id found in `key`.
async fn upcoming_counts<C: ConnectionTrait>(
    db: &C,
    key: show::Column,
    ids: Vec<i32>,
    now: NaiveDateTime,
) -> Result<HashMap<i32, i64>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let counts: Vec<(i32, i64)> = show::Entity::find()
        .select_only()
        .column(key)
        .column_as(Expr::col((show::Entity, show::Column::Id)).count(), "upcoming")
        .filter(key.is_in(ids))
        .filter(show::Column::StartTime.gt(now))
        .group_by(key)
        .into_tuple()
        .all(db)
        .await?;

    Ok(counts.into_iter().collect())
}

fn into_results(
    matches: Vec<(i32, String)>,
    upcoming: &HashMap<i32, i64>,
) -> SearchResults {
    let data: Vec<SearchMatch> = matches
        .into_iter()
        .map(|(id, name)| SearchMatch {
            id,
            name,
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
        })
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}

/// An empty term matches every venue.
pub async fn search_venues<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let rows = venue::Entity::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .order_by_asc(venue::Column::Id)
        .into_model::<VenueSummary>()
        .all(db)
        .await?
        .into_iter()
        .map(|v| (v.id, v.name))
        .collect();
    let matches = filter_by_name(rows, term);

    let ids = matches.iter().map(|(id, _)| *id).collect();
    let upcoming = upcoming_counts(db, show::Column::VenueId, ids, now).await?;
    tracing::debug!(term, matches = matches.len(), "Venue search");

    Ok(into_results(matches, &upcoming))
}

/// An empty term matches every artist.
pub async fn search_artists<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let rows = artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .into_model::<ArtistSummary>()
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let matches = filter_by_name(rows, term);

    let ids = matches.iter().map(|(id, _)| *id).collect();
    let upcoming = upcoming_counts(db, show::Column::ArtistId, ids, now).await?;
    tracing::debug!(term, matches = matches.len(), "Artist search");

    Ok(into_results(matches, &upcoming))
}

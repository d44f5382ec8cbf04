use chrono::NaiveDateTime;
use sea_orm::{
    ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationTrait,
};
use serde::Serialize;

use crate::{
    db::entities::{artist, show, venue},
    error::Result,
    services::partition::format_start_time,
};

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

/// All venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentListings {
    pub venues: Vec<VenueSummary>,
    pub artists: Vec<ArtistSummary>,
}

#[derive(FromQueryResult)]
struct VenueLocationRow {
    id: i32,
    name: String,
    city: String,
    state: String,
}

#[derive(FromQueryResult)]
struct ShowListingRow {
    venue_id: i32,
    venue_name: String,
    artist_id: i32,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: NaiveDateTime,
}

/// Groups venues by exact (city, state). Areas appear in the order their
/// first venue does, and venues keep their input order inside an area.
fn group_by_location(rows: impl IntoIterator<Item = VenueLocationRow>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();

    for row in rows {
        let summary = VenueSummary {
            id: row.id,
            name: row.name,
        };
        match areas
            .iter_mut()
            .find(|area| area.city == row.city && area.state == row.state)
        {
            Some(area) => area.venues.push(summary),
            None => areas.push(VenueArea {
                city: row.city,
                state: row.state,
                venues: vec![summary],
            }),
        }
    }

    areas
}

pub async fn list_venues_grouped<C: ConnectionTrait>(db: &C) -> Result<Vec<VenueArea>> {
    let rows = venue::Entity::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .column(venue::Column::City)
        .column(venue::Column::State)
        .order_by_asc(venue::Column::Id)
        .into_model::<VenueLocationRow>()
        .all(db)
        .await?;

    Ok(group_by_location(rows))
}

pub async fn list_artists<C: ConnectionTrait>(db: &C) -> Result<Vec<ArtistSummary>> {
    Ok(artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .into_model::<ArtistSummary>()
        .all(db)
        .await?)
}

/// Every show joined with its venue and artist, venue by venue.
pub async fn list_shows<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>> {
    let rows = show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(venue::Column::Name, "venue_name")
        .column(show::Column::ArtistId)
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .order_by_asc(show::Column::VenueId)
        .order_by_asc(show::Column::Id)
        .into_model::<ShowListingRow>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| ShowListing {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: format_start_time(row.start_time),
        })
        .collect())
}

/// The newest venues and artists, `limit` of each.
pub async fn recent_listings<C: ConnectionTrait>(db: &C, limit: u64) -> Result<RecentListings> {
    let venues = venue::Entity::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .order_by_desc(venue::Column::Id)
        .limit(limit)
        .into_model::<VenueSummary>()
        .all(db)
        .await?;

    let artists = artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_desc(artist::Column::Id)
        .limit(limit)
        .into_model::<ArtistSummary>()
        .all(db)
        .await?;

    Ok(RecentListings { venues, artists })
}

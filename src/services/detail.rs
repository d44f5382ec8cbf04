//! Venue and artist detail views with their shows split into past and upcoming.

use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

use crate::{
    db::entities::{artist, show, venue},
    error::{AppError, Result},
    services::partition::{format_start_time, partition_shows, ShowPartition},
};

/// A show seen from the venue's side: who is playing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show seen from the artist's side: where they are playing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
    #[serde(flatten)]
    pub shows: ShowPartition<VenueShow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
    #[serde(flatten)]
    pub shows: ShowPartition<ArtistShow>,
}

#[derive(FromQueryResult)]
struct VenueShowRow {
    artist_id: i32,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: NaiveDateTime,
}

#[derive(FromQueryResult)]
struct ArtistShowRow {
    venue_id: i32,
    venue_name: String,
    venue_image_link: Option<String>,
    start_time: NaiveDateTime,
}

pub async fn venue_detail<C: ConnectionTrait>(
    db: &C,
    venue_id: i32,
    now: NaiveDateTime,
) -> Result<VenueDetail> {
    let venue = venue::Entity::find_by_id(venue_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", venue_id)))?;

    let rows = show::Entity::find()
        .select_only()
        .column(show::Column::ArtistId)
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .filter(show::Column::VenueId.eq(venue_id))
        .order_by_asc(show::Column::Id)
        .into_model::<VenueShowRow>()
        .all(db)
        .await?;

    let shows = partition_shows(rows, now, |row| row.start_time).map(|row| VenueShow {
        artist_id: row.artist_id,
        artist_name: row.artist_name,
        artist_image_link: row.artist_image_link,
        start_time: format_start_time(row.start_time),
    });

    Ok(VenueDetail {
        id: venue.id,
        name: venue.name,
        genres: venue.genres.0,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone,
        website_link: venue.website_link,
        facebook_link: venue.facebook_link,
        image_link: venue.image_link,
        seeking_talent: venue.seeking_artist,
        seeking_description: venue.seeking_description,
        shows,
    })
}

pub async fn artist_detail<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
    now: NaiveDateTime,
) -> Result<ArtistDetail> {
    let artist = artist::Entity::find_by_id(artist_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", artist_id)))?;

    let rows = show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(venue::Column::Name, "venue_name")
        .column_as(venue::Column::ImageLink, "venue_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .filter(show::Column::ArtistId.eq(artist_id))
        .order_by_asc(show::Column::Id)
        .into_model::<ArtistShowRow>()
        .all(db)
        .await?;

    let shows = partition_shows(rows, now, |row| row.start_time).map(|row| ArtistShow {
        venue_id: row.venue_id,
        venue_name: row.venue_name,
        venue_image_link: row.venue_image_link,
        start_time: format_start_time(row.start_time),
    });

    Ok(ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres: artist.genres.0,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website_link: artist.website_link,
        facebook_link: artist.facebook_link,
        image_link: artist.image_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        shows,
    })
}

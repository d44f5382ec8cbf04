//! Submitted-form types and their validation rules.
//!
//! Every mutation goes through one of these forms. Edits are full-record
//! replacements, so a field left out of a submission falls back to the
//! form default instead of keeping whatever was stored before.

pub mod validators;

use chrono::NaiveDateTime;
use sea_orm::{ActiveValue::NotSet, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::db::entities::{artist, show, venue};
use validators::{
    parse_id, validate_genres, validate_phone, validate_required, validate_start_time,
    validate_state,
};

fn normalize_text(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Blank optional fields are treated as absent.
fn normalize_optional(value: &mut Option<String>) {
    if let Some(text) = value.as_mut() {
        normalize_text(text);
        if text.is_empty() {
            *value = None;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VenueForm {
    #[validate(custom(function = "validate_required"))]
    pub name: String,
    #[validate(custom(function = "validate_required"))]
    pub city: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(custom(function = "validate_required"))]
    pub address: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(url)]
    pub image_link: Option<String>,
    #[validate(custom(function = "validate_genres"))]
    pub genres: Vec<String>,
    #[validate(url)]
    pub facebook_link: Option<String>,
    #[validate(url)]
    pub website_link: Option<String>,
    /// Absent means the venue is looking for artists.
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Trims text fields and validates the result.
    pub fn cleaned(mut self) -> Result<Self, ValidationErrors> {
        normalize_text(&mut self.name);
        normalize_text(&mut self.city);
        normalize_text(&mut self.state);
        normalize_text(&mut self.address);
        normalize_text(&mut self.phone);
        normalize_optional(&mut self.image_link);
        normalize_optional(&mut self.facebook_link);
        normalize_optional(&mut self.website_link);
        normalize_optional(&mut self.seeking_description);
        self.validate()?;
        Ok(self)
    }
}

impl IntoActiveModel<venue::ActiveModel> for VenueForm {
    fn into_active_model(self) -> venue::ActiveModel {
        venue::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            address: Set(self.address),
            phone: Set(Some(self.phone)),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website_link: Set(self.website_link),
            genres: Set(self.genres.into()),
            seeking_artist: Set(self.seeking_talent.unwrap_or(true)),
            seeking_description: Set(self
                .seeking_description
                .unwrap_or_else(|| venue::DEFAULT_SEEKING_DESCRIPTION.to_string())),
        }
    }
}

impl From<venue::Model> for VenueForm {
    fn from(venue: venue::Model) -> Self {
        Self {
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone.unwrap_or_default(),
            image_link: venue.image_link,
            genres: venue.genres.0,
            facebook_link: venue.facebook_link,
            website_link: venue.website_link,
            seeking_talent: Some(venue.seeking_artist),
            seeking_description: Some(venue.seeking_description),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ArtistForm {
    #[validate(custom(function = "validate_required"))]
    pub name: String,
    #[validate(custom(function = "validate_required"))]
    pub city: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(url)]
    pub image_link: Option<String>,
    #[validate(custom(function = "validate_genres"))]
    pub genres: Vec<String>,
    #[validate(url)]
    pub facebook_link: Option<String>,
    #[validate(url)]
    pub website_link: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn cleaned(mut self) -> Result<Self, ValidationErrors> {
        normalize_text(&mut self.name);
        normalize_text(&mut self.city);
        normalize_text(&mut self.state);
        normalize_text(&mut self.phone);
        normalize_optional(&mut self.image_link);
        normalize_optional(&mut self.facebook_link);
        normalize_optional(&mut self.website_link);
        normalize_optional(&mut self.seeking_description);
        self.validate()?;
        Ok(self)
    }
}

impl IntoActiveModel<artist::ActiveModel> for ArtistForm {
    fn into_active_model(self) -> artist::ActiveModel {
        artist::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            phone: Set(Some(self.phone)),
            genres: Set(self.genres.into()),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website_link: Set(self.website_link),
            seeking_venue: Set(self.seeking_venue.unwrap_or(false)),
            seeking_description: Set(self
                .seeking_description
                .unwrap_or_else(|| artist::DEFAULT_SEEKING_DESCRIPTION.to_string())),
        }
    }
}

impl From<artist::Model> for ArtistForm {
    fn from(artist: artist::Model) -> Self {
        Self {
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone.unwrap_or_default(),
            image_link: artist.image_link,
            genres: artist.genres.0,
            facebook_link: artist.facebook_link,
            website_link: artist.website_link,
            seeking_venue: Some(artist.seeking_venue),
            seeking_description: Some(artist.seeking_description),
        }
    }
}

/// Search box submission. A missing term searches for everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    /// Accepted as a JSON number or as numeric text.
    pub artist_id: Value,
    pub venue_id: Value,
    /// Defaults to the submission time when absent.
    pub start_time: Option<String>,
}

/// A show submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: Option<NaiveDateTime>,
}

impl ShowForm {
    /// Checks every field, collecting one error per failing field.
    pub fn cleaned(mut self) -> Result<NewShow, ValidationErrors> {
        normalize_optional(&mut self.start_time);
        let mut errors = ValidationErrors::new();

        let artist_id = parse_id(&self.artist_id)
            .map_err(|e| errors.add("artist_id", e))
            .ok();
        let venue_id = parse_id(&self.venue_id)
            .map_err(|e| errors.add("venue_id", e))
            .ok();
        let start_time = match self.start_time.as_deref().map(validate_start_time) {
            Some(Ok(parsed)) => Some(parsed),
            Some(Err(e)) => {
                errors.add("start_time", e);
                None
            }
            None => None,
        };

        match (artist_id, venue_id) {
            (Some(artist_id), Some(venue_id)) if errors.is_empty() => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

impl NewShow {
    pub fn into_active_model(self, now: NaiveDateTime) -> show::ActiveModel {
        show::ActiveModel {
            id: NotSet,
            artist_id: Set(self.artist_id),
            venue_id: Set(self.venue_id),
            start_time: Set(self.start_time.unwrap_or(now)),
        }
    }
}

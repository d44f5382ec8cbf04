pub mod artist;
pub mod show;
pub mod venue;

pub use artist::Entity as Artist;
pub use show::Entity as Show;
pub use venue::Entity as Venue;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Genre tags stored as a JSON array so the same schema works on Postgres and SQLite.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Genres(pub Vec<String>);

impl From<Vec<String>> for Genres {
    fn from(genres: Vec<String>) -> Self {
        Self(genres)
    }
}

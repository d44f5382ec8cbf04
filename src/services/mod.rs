pub mod detail;
pub mod listing;
pub mod partition;
pub mod search;

pub use detail::{artist_detail, venue_detail, ArtistDetail, VenueDetail};
pub use listing::{list_artists, list_shows, list_venues_grouped, recent_listings};
pub use partition::{format_start_time, partition_shows, ShowPartition, START_TIME_FORMAT};
pub use search::{search_artists, search_venues, SearchResults};

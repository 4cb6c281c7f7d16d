mod feed;
mod movie;
mod profile;

pub use feed::{
    FeedItem, PicksFeedRequest, PicksFeedResponse, RatedFeedRequest, RatedFeedResponse,
    SearchHit, SearchQuery, SoulMate,
};
pub use movie::{parse_tags, CatalogRow, MovieRecord};
pub use profile::UserProfile;

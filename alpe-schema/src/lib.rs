pub mod enums;
pub mod graphql;
pub mod media_list;
pub mod oauth;
pub mod viewer;

pub use enums::{MediaEntryStatus, MediaFormat, MediaStatus, Season};
pub use graphql::{GraphqlError, GraphqlRequest, GraphqlResponse};
pub use media_list::{
    DistributionPoint, FuzzyDateDto, MediaDto, MediaListCollection, MediaListCollectionPage,
    MediaListEntryDto, MediaListGroupDto, MediaStatsDto, MediaTagDto, MediaTitleDto,
    StatusDistributionPoint,
};
pub use oauth::{TokenRequest, TokenResponse};
pub use viewer::{TagCollectionPage, TagDto, ViewerDto, ViewerPage};

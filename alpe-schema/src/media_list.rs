use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::{MediaEntryStatus, MediaFormat, MediaStatus, Season};

/// `data` payload of a `MediaListCollection` chunk query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaListCollectionPage {
    #[serde(rename = "MediaListCollection")]
    pub collection: MediaListCollection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListCollection {
    pub lists: Vec<MediaListGroupDto>,
    pub has_next_chunk: bool,
}

/// One list bucket of a chunk, either status-driven or user-defined.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListGroupDto {
    pub name: String,
    #[serde(default)]
    pub is_custom_list: Option<bool>,
    #[serde(default)]
    pub status: Option<MediaEntryStatus>,
    pub entries: Vec<MediaListEntryDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListEntryDto {
    pub id: i64,
    #[serde(default)]
    pub status: Option<MediaEntryStatus>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub progress_volumes: Option<i64>,
    #[serde(default)]
    pub repeat: Option<i64>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub custom_lists: Option<BTreeMap<String, bool>>,
    pub media: MediaDto,
}

/// Media node shared by the anime and manga listing queries.
///
/// Kind-specific fields (episodes/duration vs chapters/volumes) are simply
/// absent from the other kind's responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDto {
    pub id: i64,
    pub title: MediaTitleDto,
    #[serde(default)]
    pub format: Option<MediaFormat>,
    #[serde(default)]
    pub status: Option<MediaStatus>,
    #[serde(default)]
    pub start_date: Option<FuzzyDateDto>,
    #[serde(default)]
    pub end_date: Option<FuzzyDateDto>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub season_year: Option<i32>,
    #[serde(default)]
    pub episodes: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub chapters: Option<i64>,
    #[serde(default)]
    pub volumes: Option<i64>,
    #[serde(default)]
    pub country_of_origin: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub mean_score: Option<f64>,
    #[serde(default)]
    pub tags: Option<Vec<MediaTagDto>>,
    #[serde(default)]
    pub favourites: Option<i64>,
    #[serde(default)]
    pub is_favourite: Option<bool>,
    #[serde(default)]
    pub is_adult: Option<bool>,
    #[serde(default)]
    pub stats: Option<MediaStatsDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTitleDto {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
    #[serde(default)]
    pub user_preferred: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FuzzyDateDto {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTagDto {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub is_media_spoiler: Option<bool>,
    #[serde(default)]
    pub is_adult: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaStatsDto {
    #[serde(default)]
    pub score_distribution: Option<Vec<DistributionPoint>>,
    #[serde(default)]
    pub status_distribution: Option<Vec<StatusDistributionPoint>>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DistributionPoint {
    pub score: i64,
    #[serde(default)]
    pub amount: Option<i64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct StatusDistributionPoint {
    pub status: MediaEntryStatus,
    #[serde(default)]
    pub amount: Option<i64>,
}

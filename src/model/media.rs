use alpe_schema::{
    FuzzyDateDto, MediaDto, MediaEntryStatus, MediaFormat, MediaListEntryDto, MediaStatus,
    MediaTitleDto,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Titles {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
    pub user_preferred: String,
}

impl Titles {
    /// Title the user chose to see on AniList, used as the metric label.
    pub fn display(&self) -> &str {
        &self.user_preferred
    }
}

impl From<MediaTitleDto> for Titles {
    fn from(dto: MediaTitleDto) -> Self {
        let user_preferred = dto
            .user_preferred
            .clone()
            .or_else(|| dto.english.clone())
            .or_else(|| dto.romaji.clone())
            .or_else(|| dto.native.clone())
            .unwrap_or_default();
        Self {
            romaji: dto.romaji,
            english: dto.english,
            native: dto.native,
            user_preferred,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl From<Option<FuzzyDateDto>> for FuzzyDate {
    fn from(dto: Option<FuzzyDateDto>) -> Self {
        let dto = dto.unwrap_or_default();
        Self {
            year: dto.year,
            month: dto.month,
            day: dto.day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaTag {
    pub tag_id: i64,
    pub rank: i64,
    pub spoiler: bool,
}

/// Fields shared by anime and manga.
///
/// Numbers AniList may send as null are stored as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Media {
    pub media_id: i64,
    pub titles: Titles,
    pub format: MediaFormat,
    pub status: MediaStatus,
    pub start_date: FuzzyDate,
    pub end_date: FuzzyDate,
    pub country_of_origin: String,
    pub genres: Vec<String>,
    pub tags: Vec<MediaTag>,
    pub adult: bool,
    pub score_average: f64,
    pub score_mean: f64,
    pub favourites: i64,
    pub status_distribution: BTreeMap<MediaEntryStatus, i64>,
    pub score_distribution: BTreeMap<i64, i64>,
}

impl From<&MediaDto> for Media {
    fn from(dto: &MediaDto) -> Self {
        let stats = dto.stats.clone().unwrap_or_default();
        Self {
            media_id: dto.id,
            titles: dto.title.clone().into(),
            format: dto.format.unwrap_or(MediaFormat::Unknown),
            status: dto.status.unwrap_or(MediaStatus::Unknown),
            start_date: dto.start_date.into(),
            end_date: dto.end_date.into(),
            country_of_origin: dto.country_of_origin.clone().unwrap_or_default(),
            genres: dto.genres.clone().unwrap_or_default(),
            tags: dto
                .tags
                .iter()
                .flatten()
                .map(|t| MediaTag {
                    tag_id: t.id,
                    rank: t.rank.unwrap_or(0),
                    spoiler: t.is_media_spoiler.unwrap_or(false),
                })
                .collect(),
            adult: dto.is_adult.unwrap_or(false),
            score_average: dto.average_score.unwrap_or(0.0),
            score_mean: dto.mean_score.unwrap_or(0.0),
            favourites: dto.favourites.unwrap_or(0),
            status_distribution: stats
                .status_distribution
                .into_iter()
                .flatten()
                .map(|p| (p.status, p.amount.unwrap_or(0)))
                .collect(),
            score_distribution: stats
                .score_distribution
                .into_iter()
                .flatten()
                .map(|p| (p.score, p.amount.unwrap_or(0)))
                .collect(),
        }
    }
}

/// One row of the user's list, pointing at a media by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub entry_id: i64,
    pub media_id: i64,
    pub status: MediaEntryStatus,
    pub score: f64,
    /// Episodes for anime, chapters for manga.
    pub progress: i64,
    /// Manga only.
    pub progress_volumes: i64,
    pub repeat: i64,
    pub private: bool,
    pub favourite: bool,
    pub custom_lists: BTreeMap<String, bool>,
}

impl From<&MediaListEntryDto> for ListEntry {
    fn from(dto: &MediaListEntryDto) -> Self {
        Self {
            entry_id: dto.id,
            media_id: dto.media.id,
            status: dto.status.unwrap_or(MediaEntryStatus::Unknown),
            score: dto.score.unwrap_or(0.0),
            progress: dto.progress.unwrap_or(0),
            progress_volumes: dto.progress_volumes.unwrap_or(0),
            repeat: dto.repeat.unwrap_or(0),
            private: dto.private.unwrap_or(false),
            favourite: dto.media.is_favourite.unwrap_or(false),
            custom_lists: dto.custom_lists.clone().unwrap_or_default(),
        }
    }
}

/// A named list bucket ("Watching", "Completed", ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaList {
    pub name: String,
    pub status: Option<MediaEntryStatus>,
    pub entries: Vec<ListEntry>,
}

/// Deduplicated media plus the user's list buckets for one media type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaCollection<E> {
    pub media: BTreeMap<i64, E>,
    pub lists: BTreeMap<String, MediaList>,
}

impl<E> Default for MediaCollection<E> {
    fn default() -> Self {
        Self {
            media: BTreeMap::new(),
            lists: BTreeMap::new(),
        }
    }
}

impl<E> MediaCollection<E> {
    pub fn entries(&self) -> impl Iterator<Item = (&MediaList, &ListEntry)> {
        self.lists
            .values()
            .flat_map(|list| list.entries.iter().map(move |entry| (list, entry)))
    }
}

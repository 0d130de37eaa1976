use alpe_schema::{MediaDto, Season};
use serde::Serialize;

use super::media::Media;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimeSeason {
    pub season: Season,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anime {
    #[serde(flatten)]
    pub media: Media,
    pub season: Option<AnimeSeason>,
    pub episodes: i64,
    /// Minutes per episode.
    pub duration: i64,
}

impl From<&MediaDto> for Anime {
    fn from(dto: &MediaDto) -> Self {
        let season = match (dto.season, dto.season_year) {
            (Some(season), Some(year)) => Some(AnimeSeason { season, year }),
            _ => None,
        };
        Self {
            media: Media::from(dto),
            season,
            episodes: dto.episodes.unwrap_or(0),
            duration: dto.duration.unwrap_or(0),
        }
    }
}

use alpe_schema::MediaDto;
use serde::Serialize;

use super::media::Media;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manga {
    #[serde(flatten)]
    pub media: Media,
    pub chapters: i64,
    pub volumes: i64,
}

impl From<&MediaDto> for Manga {
    fn from(dto: &MediaDto) -> Self {
        Self {
            media: Media::from(dto),
            chapters: dto.chapters.unwrap_or(0),
            volumes: dto.volumes.unwrap_or(0),
        }
    }
}

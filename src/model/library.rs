use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::anime::Anime;
use super::manga::Manga;
use super::media::MediaCollection;
use super::user::{AuthenticatedUser, Tag};

/// Everything fetched from AniList in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibrarySnapshot {
    pub user: AuthenticatedUser,
    pub tags: BTreeMap<i64, Tag>,
    pub animes: MediaCollection<Anime>,
    pub mangas: MediaCollection<Manga>,
    pub fetched_at: DateTime<Utc>,
}

use alpe_schema::{TagCollectionPage, ViewerPage};
use serde_json::Map;
use tracing::info;

use super::aggregator::{AnimeKind, MangaKind, PageAggregator};
use super::queries::{TAGS_QUERY, VIEWER_QUERY};
use super::requester::Requester;
use crate::error::ApiError;
use crate::model::{Anime, AuthenticatedUser, LibrarySnapshot, Manga, MediaCollection, Tag};

/// The AniList operations the exporter needs, issued sequentially.
pub struct AnilistConnector<'a> {
    requester: &'a mut Requester,
}

impl<'a> AnilistConnector<'a> {
    pub fn new(requester: &'a mut Requester) -> Self {
        Self { requester }
    }

    pub async fn viewer(&mut self) -> Result<AuthenticatedUser, ApiError> {
        let page: ViewerPage = self.requester.query_as(VIEWER_QUERY, &Map::new()).await?;
        Ok(page.viewer.into())
    }

    pub async fn tags(&mut self) -> Result<Vec<Tag>, ApiError> {
        let page: TagCollectionPage = self.requester.query_as(TAGS_QUERY, &Map::new()).await?;
        Ok(page.tags.into_iter().map(Tag::from).collect())
    }

    pub async fn animes(&mut self, user_id: i64) -> Result<MediaCollection<Anime>, ApiError> {
        PageAggregator::new(&mut *self.requester)
            .fetch_all::<AnimeKind>(user_id)
            .await
    }

    pub async fn mangas(&mut self, user_id: i64) -> Result<MediaCollection<Manga>, ApiError> {
        PageAggregator::new(&mut *self.requester)
            .fetch_all::<MangaKind>(user_id)
            .await
    }

    /// Viewer, tags, then both lists. The first failure aborts the pass.
    pub async fn snapshot(&mut self) -> Result<LibrarySnapshot, ApiError> {
        let user = self.viewer().await?;
        info!(user_id = user.user_id, username = %user.username, "fetching AniList library");

        let tags = self
            .tags()
            .await?
            .into_iter()
            .map(|t| (t.tag_id, t))
            .collect();
        let animes = self.animes(user.user_id).await?;
        let mangas = self.mangas(user.user_id).await?;

        Ok(LibrarySnapshot {
            user,
            tags,
            animes,
            mangas,
            fetched_at: self.requester.now(),
        })
    }
}

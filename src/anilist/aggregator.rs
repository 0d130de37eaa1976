use alpe_schema::{MediaDto, MediaListCollection, MediaListCollectionPage};
use serde_json::{Map, Value, json};
use std::collections::btree_map::Entry;
use tracing::{debug, info};

use super::queries::{ANIME_LIST_QUERY, MANGA_LIST_QUERY, PER_CHUNK};
use super::requester::Requester;
use crate::error::ApiError;
use crate::model::{Anime, ListEntry, Manga, MediaCollection, MediaList};

/// A media type that can be listed through `MediaListCollection`.
pub trait MediaKind {
    type Entity: for<'a> From<&'a MediaDto>;

    const MEDIA_TYPE: &'static str;
    const QUERY: &'static str;
}

pub struct AnimeKind;

impl MediaKind for AnimeKind {
    type Entity = Anime;

    const MEDIA_TYPE: &'static str = "ANIME";
    const QUERY: &'static str = ANIME_LIST_QUERY;
}

pub struct MangaKind;

impl MediaKind for MangaKind {
    type Entity = Manga;

    const MEDIA_TYPE: &'static str = "MANGA";
    const QUERY: &'static str = MANGA_LIST_QUERY;
}

/// Walks every chunk of a user's list, strictly one after another.
pub struct PageAggregator<'a> {
    requester: &'a mut Requester,
}

impl<'a> PageAggregator<'a> {
    pub fn new(requester: &'a mut Requester) -> Self {
        Self { requester }
    }

    /// Fetch and merge all chunks. Any failed chunk fails the whole fetch.
    pub async fn fetch_all<K: MediaKind>(
        &mut self,
        user_id: i64,
    ) -> Result<MediaCollection<K::Entity>, ApiError> {
        let mut collection = MediaCollection::default();
        let mut chunk: u32 = 1;
        let mut has_next = true;

        while has_next {
            let variables = chunk_variables(user_id, chunk);
            let page: MediaListCollectionPage =
                self.requester.query_as(K::QUERY, &variables).await?;
            has_next = merge_chunk::<K::Entity>(&mut collection, page.collection);
            debug!(
                media_type = K::MEDIA_TYPE,
                chunk,
                has_next,
                media = collection.media.len(),
                "merged list chunk"
            );
            chunk += 1;
        }

        info!(
            media_type = K::MEDIA_TYPE,
            chunks = chunk - 1,
            media = collection.media.len(),
            lists = collection.lists.len(),
            "list fetch complete"
        );
        Ok(collection)
    }
}

fn chunk_variables(user_id: i64, chunk: u32) -> Map<String, Value> {
    let mut variables = Map::new();
    variables.insert("user_id".to_string(), json!(user_id));
    variables.insert("chunk".to_string(), json!(chunk));
    variables.insert("per_chunk".to_string(), json!(PER_CHUNK));
    variables
}

/// Merge one chunk into `collection` and return its `hasNextChunk` flag.
///
/// Custom lists are skipped. Buckets accumulate by name. The first media seen
/// for an id is kept and later sightings are ignored.
pub fn merge_chunk<E>(collection: &mut MediaCollection<E>, chunk: MediaListCollection) -> bool
where
    E: for<'a> From<&'a MediaDto>,
{
    for group in chunk.lists {
        if group.is_custom_list.unwrap_or(false) {
            continue;
        }

        let list = collection
            .lists
            .entry(group.name.clone())
            .or_insert_with(|| MediaList {
                name: group.name.clone(),
                status: group.status,
                entries: Vec::new(),
            });

        for entry in &group.entries {
            list.entries.push(ListEntry::from(entry));
            if let Entry::Vacant(slot) = collection.media.entry(entry.media.id) {
                slot.insert(E::from(&entry.media));
            }
        }
    }
    chunk.has_next_chunk
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunk(value: Value) -> MediaListCollection {
        serde_json::from_value(value).unwrap()
    }

    fn entry(id: i64, media_id: i64, title: &str) -> Value {
        json!({
            "id": id,
            "status": "CURRENT",
            "score": 7.5,
            "progress": 3,
            "media": {
                "id": media_id,
                "title": { "userPreferred": title },
                "averageScore": null,
                "episodes": null
            }
        })
    }

    #[test]
    fn skips_custom_lists_and_keeps_first_media() {
        let mut collection = MediaCollection::<Anime>::default();
        let has_next = merge_chunk(
            &mut collection,
            chunk(json!({
                "lists": [
                    { "name": "Watching", "isCustomList": false, "status": "CURRENT",
                      "entries": [entry(1, 10, "First")] },
                    { "name": "Favourites", "isCustomList": true, "status": null,
                      "entries": [entry(2, 11, "Custom only")] },
                    { "name": "Rewatching", "isCustomList": false, "status": "REPEATING",
                      "entries": [entry(3, 10, "Second")] }
                ],
                "hasNextChunk": false
            })),
        );

        assert!(!has_next);
        assert!(!collection.lists.contains_key("Favourites"));
        assert!(!collection.media.contains_key(&11));
        assert_eq!(collection.media.len(), 1);
        assert_eq!(collection.media[&10].media.titles.display(), "First");
        assert_eq!(collection.lists["Rewatching"].entries[0].media_id, 10);
    }

    #[test]
    fn null_numbers_become_zero() {
        let mut collection = MediaCollection::<Anime>::default();
        merge_chunk(
            &mut collection,
            chunk(json!({
                "lists": [{ "name": "Watching", "entries": [entry(1, 10, "A")] }],
                "hasNextChunk": true
            })),
        );

        let anime = &collection.media[&10];
        assert_eq!(anime.media.score_average, 0.0);
        assert_eq!(anime.episodes, 0);
    }
}

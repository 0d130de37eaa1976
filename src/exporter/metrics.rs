use alpe_exposition::{ExpositionError, LabelSet, MetricsDocumentBuilder, Sample};
use std::collections::BTreeMap;

use crate::model::{
    Anime, LibrarySnapshot, ListEntry, Manga, Media, MediaCollection, MediaList, Tag,
};

/// Kind-specific parts of the exported metrics.
trait ExportedMedia {
    const MEDIA_TYPE: &'static str;

    fn media(&self) -> &Media;

    fn lengths(&self) -> [(&'static str, i64); 2];

    fn progress(entry: &ListEntry) -> Vec<(&'static str, i64)>;
}

impl ExportedMedia for Anime {
    const MEDIA_TYPE: &'static str = "ANIME";

    fn media(&self) -> &Media {
        &self.media
    }

    fn lengths(&self) -> [(&'static str, i64); 2] {
        [("episodes", self.episodes), ("minutes_per_episode", self.duration)]
    }

    fn progress(entry: &ListEntry) -> Vec<(&'static str, i64)> {
        vec![("episodes", entry.progress)]
    }
}

impl ExportedMedia for Manga {
    const MEDIA_TYPE: &'static str = "MANGA";

    fn media(&self) -> &Media {
        &self.media
    }

    fn lengths(&self) -> [(&'static str, i64); 2] {
        [("chapters", self.chapters), ("volumes", self.volumes)]
    }

    fn progress(entry: &ListEntry) -> Vec<(&'static str, i64)> {
        vec![
            ("chapters", entry.progress),
            ("volumes", entry.progress_volumes),
        ]
    }
}

#[derive(Default)]
struct Groups {
    list_entries: Vec<Sample>,
    entry_score: Vec<Sample>,
    entry_progress: Vec<Sample>,
    entry_repeat: Vec<Sample>,
    average_score: Vec<Sample>,
    mean_score: Vec<Sample>,
    favourites: Vec<Sample>,
    length: Vec<Sample>,
    status_distribution: Vec<Sample>,
    score_distribution: Vec<Sample>,
    genre_entries: Vec<Sample>,
    tag_rank: Vec<Sample>,
}

fn media_labels(media_type: &str, media: &Media) -> LabelSet {
    LabelSet::new()
        .with("media_type", media_type)
        .with("media_id", media.media_id)
        .with("title", media.titles.display())
}

fn title_of<E: ExportedMedia>(collection: &MediaCollection<E>, media_id: i64) -> &str {
    collection
        .media
        .get(&media_id)
        .map(|m| m.media().titles.display())
        .unwrap_or("")
}

impl Groups {
    fn collect<E: ExportedMedia>(
        &mut self,
        collection: &MediaCollection<E>,
        tags: &BTreeMap<i64, Tag>,
    ) {
        let media_type = E::MEDIA_TYPE;

        for list in collection.lists.values() {
            self.list_entries.push(Sample::new(
                list_labels(media_type, list),
                list.entries.len(),
            ));
        }

        let mut genres: BTreeMap<&str, usize> = BTreeMap::new();
        for (list, entry) in collection.entries() {
            if let Some(item) = collection.media.get(&entry.media_id) {
                for genre in &item.media().genres {
                    *genres.entry(genre.as_str()).or_default() += 1;
                }
            }

            let labels = LabelSet::new()
                .with("media_type", media_type)
                .with("media_id", entry.media_id)
                .with("title", title_of(collection, entry.media_id))
                .with("list", &list.name);

            self.entry_score
                .push(Sample::new(labels.clone(), entry.score));
            self.entry_repeat
                .push(Sample::new(labels.clone(), entry.repeat));
            for (unit, value) in E::progress(entry) {
                self.entry_progress
                    .push(Sample::new(labels.clone().with("unit", unit), value));
            }
        }

        for item in collection.media.values() {
            let media = item.media();
            let labels = media_labels(media_type, media);

            self.average_score
                .push(Sample::new(labels.clone(), media.score_average));
            self.mean_score
                .push(Sample::new(labels.clone(), media.score_mean));
            self.favourites
                .push(Sample::new(labels.clone(), media.favourites));
            for (unit, value) in item.lengths() {
                self.length
                    .push(Sample::new(labels.clone().with("unit", unit), value));
            }

            for (status, amount) in &media.status_distribution {
                self.status_distribution.push(Sample::new(
                    LabelSet::new()
                        .with("media_type", media_type)
                        .with("media_id", media.media_id)
                        .with("status", status),
                    *amount,
                ));
            }
            for (score, amount) in &media.score_distribution {
                self.score_distribution.push(Sample::new(
                    LabelSet::new()
                        .with("media_type", media_type)
                        .with("media_id", media.media_id)
                        .with("score", score),
                    *amount,
                ));
            }

            for tag in &media.tags {
                let name = tags
                    .get(&tag.tag_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| tag.tag_id.to_string());
                self.tag_rank.push(Sample::new(
                    LabelSet::new()
                        .with("media_type", media_type)
                        .with("media_id", media.media_id)
                        .with("tag", name)
                        .with("spoiler", tag.spoiler),
                    tag.rank,
                ));
            }

        }

        for (genre, count) in genres {
            self.genre_entries.push(Sample::new(
                LabelSet::new()
                    .with("media_type", media_type)
                    .with("genre", genre),
                count,
            ));
        }
    }
}

fn list_labels(media_type: &str, list: &MediaList) -> LabelSet {
    LabelSet::new()
        .with("media_type", media_type)
        .with("list", &list.name)
        .with(
            "status",
            list.status.map(|s| s.as_str()).unwrap_or_default(),
        )
}

/// Turn a snapshot into the exported metric groups, in a fixed order.
pub fn build_document(
    snapshot: &LibrarySnapshot,
) -> Result<MetricsDocumentBuilder, ExpositionError> {
    let mut groups = Groups::default();
    groups.collect(&snapshot.animes, &snapshot.tags);
    groups.collect(&snapshot.mangas, &snapshot.tags);

    let user = &snapshot.user;
    let mut doc = MetricsDocumentBuilder::new();
    doc.add_group(
        "anilist_user_unread_notifications",
        "Unread AniList notifications",
        vec![Sample::new(
            LabelSet::new()
                .with("user_id", user.user_id)
                .with("username", &user.username),
            user.unread_notifications,
        )],
    )?;
    doc.add_group(
        "anilist_list_entries",
        "Entries in each of the user's lists",
        groups.list_entries,
    )?;
    doc.add_group(
        "anilist_entry_score",
        "Score the user gave to a list entry (0 when unscored)",
        groups.entry_score,
    )?;
    doc.add_group(
        "anilist_entry_progress",
        "User progress on a list entry",
        groups.entry_progress,
    )?;
    doc.add_group(
        "anilist_entry_repeat",
        "Times the user repeated a list entry",
        groups.entry_repeat,
    )?;
    doc.add_group(
        "anilist_media_average_score",
        "AniList weighted average score of a media",
        groups.average_score,
    )?;
    doc.add_group(
        "anilist_media_mean_score",
        "AniList mean score of a media",
        groups.mean_score,
    )?;
    doc.add_group(
        "anilist_media_favourites",
        "Users who favourited a media",
        groups.favourites,
    )?;
    doc.add_group(
        "anilist_media_length",
        "Length of a media in the given unit",
        groups.length,
    )?;
    doc.add_group(
        "anilist_media_status_distribution",
        "AniList users per list status for a media",
        groups.status_distribution,
    )?;
    doc.add_group(
        "anilist_media_score_distribution",
        "AniList users per score bucket for a media",
        groups.score_distribution,
    )?;
    doc.add_group(
        "anilist_genre_entries",
        "List entries per genre in the user's library",
        groups.genre_entries,
    )?;
    doc.add_group(
        "anilist_tag_rank",
        "Relevance rank of a tag on a media",
        groups.tag_rank,
    )?;
    doc.add_group(
        "anilist_exporter_fetch_timestamp_seconds",
        "When the library was fetched from AniList",
        vec![Sample::bare(snapshot.fetched_at.timestamp())],
    )?;
    Ok(doc)
}

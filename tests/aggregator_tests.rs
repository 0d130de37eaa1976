mod support;

use alpe::anilist::{AnimeKind, MangaKind, PageAggregator};
use alpe::error::ApiErrorKind;
use serde_json::json;
use support::*;

#[tokio::test]
async fn chunks_merge_into_buckets_in_page_order() {
    let h = Harness::new("aggregator-pages");
    h.transport
        .push(list_page(
            json!([
                { "name": "Watching", "isCustomList": false, "status": "CURRENT",
                  "entries": [media_entry(1, 10, "Mushishi", json!(88)),
                              media_entry(2, 11, "Monster", json!(null))] },
                { "name": "Favourites", "isCustomList": true, "status": null,
                  "entries": [media_entry(3, 12, "Custom", json!(70))] }
            ]),
            true,
        ))
        .push(list_page(
            json!([
                { "name": "Watching", "isCustomList": false, "status": "CURRENT",
                  "entries": [media_entry(4, 13, "Planetes", json!(80)),
                              media_entry(5, 10, "Mushishi (renamed)", json!(10))] }
            ]),
            false,
        ));

    let mut requester = h.requester();
    let collection = PageAggregator::new(&mut requester)
        .fetch_all::<AnimeKind>(7)
        .await
        .unwrap();

    let watching = &collection.lists["Watching"];
    let entry_ids: Vec<i64> = watching.entries.iter().map(|e| e.entry_id).collect();
    assert_eq!(entry_ids, vec![1, 2, 4, 5]);
    assert!(!collection.lists.contains_key("Favourites"));

    let media_ids: Vec<i64> = collection.media.keys().copied().collect();
    assert_eq!(media_ids, vec![10, 11, 13]);
    assert_eq!(collection.media[&10].media.titles.display(), "Mushishi");
    assert_eq!(collection.media[&10].media.score_average, 88.0);
    assert_eq!(collection.media[&11].media.score_average, 0.0);

    let chunks: Vec<_> = h
        .transport
        .calls()
        .iter()
        .map(|c| c.body["variables"]["chunk"].clone())
        .collect();
    assert_eq!(chunks, vec![json!(1), json!(2)]);
    assert_eq!(h.transport.calls()[0].body["variables"]["user_id"], 7);
}

#[tokio::test]
async fn failing_chunk_aborts_the_whole_fetch() {
    let h = Harness::new("aggregator-abort");
    h.transport
        .push(list_page(
            json!([{ "name": "Reading", "isCustomList": false, "status": "CURRENT",
                     "entries": [media_entry(1, 20, "Berserk", json!(93))] }]),
            true,
        ))
        .push(status(404));

    let mut requester = h.requester();
    let err = PageAggregator::new(&mut requester)
        .fetch_all::<MangaKind>(7)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Http);
    assert_eq!(h.transport.calls().len(), 2);
}

#[tokio::test]
async fn manga_listing_uses_the_manga_query() {
    let h = Harness::new("aggregator-manga");
    h.transport.push(list_page(json!([]), false));

    let mut requester = h.requester();
    let collection = PageAggregator::new(&mut requester)
        .fetch_all::<MangaKind>(7)
        .await
        .unwrap();

    assert!(collection.media.is_empty());
    let query = h.transport.calls()[0].body["query"].as_str().unwrap().to_string();
    assert!(query.contains("type: MANGA"));
}

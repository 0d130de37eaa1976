//! GraphQL documents sent to AniList.

pub const VIEWER_QUERY: &str = r#"
query {
    Viewer {
        id
        name
        unreadNotificationCount
    }
}"#;

pub const TAGS_QUERY: &str = r#"
query {
    MediaTagCollection {
        id
        name
        description
        category
        isAdult
    }
}"#;

/// Entries per `MediaListCollection` chunk; AniList caps this at 500.
pub const PER_CHUNK: u32 = 100;

macro_rules! media_list_query {
    ($media_type:literal, entry: [$($entry:literal),*], media: [$($media:literal),*]) => {
        concat!(
            "query ($user_id: Int, $chunk: Int, $per_chunk: Int) {\n",
            "  MediaListCollection(userId: $user_id, type: ", $media_type,
            ", chunk: $chunk, perChunk: $per_chunk) {\n",
            "    lists {\n",
            "      name\n",
            "      isCustomList\n",
            "      status\n",
            "      entries {\n",
            "        id\n",
            "        status\n",
            "        score\n",
            "        progress\n",
            $("        ", $entry, "\n",)*
            "        repeat\n",
            "        private\n",
            "        customLists\n",
            "        media {\n",
            "          id\n",
            "          title { romaji english native userPreferred }\n",
            "          format\n",
            "          status\n",
            "          startDate { year month day }\n",
            "          endDate { year month day }\n",
            $("          ", $media, "\n",)*
            "          countryOfOrigin\n",
            "          genres\n",
            "          averageScore\n",
            "          meanScore\n",
            "          tags { id name category rank isMediaSpoiler isAdult }\n",
            "          favourites\n",
            "          isFavourite\n",
            "          isAdult\n",
            "          stats {\n",
            "            scoreDistribution { score amount }\n",
            "            statusDistribution { status amount }\n",
            "          }\n",
            "        }\n",
            "      }\n",
            "    }\n",
            "    hasNextChunk\n",
            "  }\n",
            "}\n",
        )
    };
}

pub const ANIME_LIST_QUERY: &str = media_list_query!(
    "ANIME",
    entry: [],
    media: ["season", "seasonYear", "episodes", "duration"]
);

pub const MANGA_LIST_QUERY: &str = media_list_query!(
    "MANGA",
    entry: ["progressVolumes"],
    media: ["chapters", "volumes"]
);

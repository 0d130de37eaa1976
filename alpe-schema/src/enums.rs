use serde::{Deserialize, Serialize};

/// Publication format of a media entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaFormat {
    Tv,
    TvShort,
    Movie,
    Special,
    Ova,
    Ona,
    Music,
    Manga,
    Novel,
    OneShot,
    #[serde(other)]
    Unknown,
}

/// Release status of a media entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Cancelled,
    NotYetReleased,
    Hiatus,
    Releasing,
    Finished,
    #[serde(other)]
    Unknown,
}

/// Status of a media inside the user's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaEntryStatus {
    Dropped,
    Paused,
    Planning,
    Current,
    Completed,
    Repeating,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
    #[serde(other)]
    Unknown,
}

macro_rules! impl_as_str {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Wire spelling of the variant, as AniList sends it.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_as_str!(MediaFormat {
    Tv => "TV",
    TvShort => "TV_SHORT",
    Movie => "MOVIE",
    Special => "SPECIAL",
    Ova => "OVA",
    Ona => "ONA",
    Music => "MUSIC",
    Manga => "MANGA",
    Novel => "NOVEL",
    OneShot => "ONE_SHOT",
    Unknown => "UNKNOWN",
});

impl_as_str!(MediaStatus {
    Cancelled => "CANCELLED",
    NotYetReleased => "NOT_YET_RELEASED",
    Hiatus => "HIATUS",
    Releasing => "RELEASING",
    Finished => "FINISHED",
    Unknown => "UNKNOWN",
});

impl_as_str!(MediaEntryStatus {
    Dropped => "DROPPED",
    Paused => "PAUSED",
    Planning => "PLANNING",
    Current => "CURRENT",
    Completed => "COMPLETED",
    Repeating => "REPEATING",
    Unknown => "UNKNOWN",
});

impl_as_str!(Season {
    Winter => "WINTER",
    Spring => "SPRING",
    Summer => "SUMMER",
    Fall => "FALL",
    Unknown => "UNKNOWN",
});

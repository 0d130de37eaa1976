mod anime;
mod library;
mod manga;
mod media;
mod user;

pub use anime::{Anime, AnimeSeason};
pub use library::LibrarySnapshot;
pub use manga::Manga;
pub use media::{FuzzyDate, ListEntry, Media, MediaCollection, MediaList, MediaTag, Titles};
pub use user::{AuthenticatedUser, Tag};

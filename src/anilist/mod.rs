pub mod aggregator;
pub mod auth;
pub mod clock;
pub mod connector;
pub mod credential;
pub mod oauth;
pub mod quota;
pub mod queries;
pub mod requester;
pub mod token_store;
pub mod transport;

pub use aggregator::{AnimeKind, MangaKind, MediaKind, PageAggregator, merge_chunk};
pub use auth::{AuthSession, AuthState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use connector::AnilistConnector;
pub use credential::Credential;
pub use oauth::OauthClientConfig;
pub use quota::{ANILIST_MAX_QUOTA, QuotaTracker};
pub use requester::{ANILIST_GRAPHQL_URL, Requester, RetryPolicy};
pub use token_store::TokenStore;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse, TransportSettings};

mod alpe;
mod api;
mod oauth;
mod store;

pub use alpe::{AlpeError, ApiErrorBody, ApiErrorObject};
pub use api::{ApiError, ApiErrorKind};
pub use oauth::OauthError;
pub use store::StoreError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

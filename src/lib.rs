pub mod anilist;
pub mod config;
pub mod error;
pub mod exporter;
pub mod model;
pub mod server;

pub use error::{AlpeError, ApiError};

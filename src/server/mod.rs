pub mod guards;
pub mod router;
pub mod routes;

pub use router::{AlpeState, alpe_router};

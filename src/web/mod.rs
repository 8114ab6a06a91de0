//! Web server module
//!
//! Exposes the dispatcher over HTTP as a JSON API.

mod handlers;
mod routes;
mod state;

pub use handlers::TITLE_LANGUAGE_HEADER;
pub use routes::create_router;
pub use state::AppState;

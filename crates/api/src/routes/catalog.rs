//! Route definitions for the static card catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog listing routes mounted at `/cards`, one per card category.
///
/// ```text
/// GET /characters  GET /specials  GET /missions  GET /events
/// GET /locations   GET /powers    GET /aspects   GET /universe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/characters", get(catalog::list_characters))
        .route("/specials", get(catalog::list_specials))
        .route("/missions", get(catalog::list_missions))
        .route("/events", get(catalog::list_events))
        .route("/locations", get(catalog::list_locations))
        .route("/powers", get(catalog::list_powers))
        .route("/aspects", get(catalog::list_aspects))
        .route("/universe", get(catalog::list_universe))
}

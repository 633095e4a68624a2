pub mod admin;
pub mod auth;
pub mod catalog;
pub mod decks;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
///
/// /admin/users                       list, create (admin only)
/// /admin/users/{id}                  get, update, deactivate
/// /admin/users/{id}/reset-password   reset password
///
/// /cards/characters                  catalog listings (public)
/// /cards/specials ... /cards/universe
///
/// /decks                             list, create
/// /decks/validate                    full-deck dry-run validation (POST)
/// /decks/{id}                        get, update, delete
/// /decks/{id}/cards                  list, add, remove
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin routes (user management).
        .nest("/admin", admin::router())
        // Static card catalog listings.
        .nest("/cards", catalog::router())
        // Deck building: CRUD, card mutations, dry-run validation.
        .nest("/decks", decks::router())
}

//! Route definitions for decks and deck cards.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{deck_cards, decks};
use crate::state::AppState;

/// Deck routes mounted at `/decks`.
///
/// `/validate` must be registered before the `{id}` routes would otherwise
/// swallow it; axum matches static segments first, but keeping it separate
/// makes the intent obvious.
///
/// ```text
/// GET    /              -> list_decks
/// POST   /              -> create_deck
/// POST   /validate      -> validate_deck (dry run, non-mutating)
/// GET    /{id}          -> get_deck
/// PUT    /{id}          -> update_deck
/// DELETE /{id}          -> delete_deck
/// GET    /{id}/cards    -> list_cards
/// POST   /{id}/cards    -> add_card
/// DELETE /{id}/cards    -> remove_card
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(decks::list_decks).post(decks::create_deck))
        .route("/validate", post(decks::validate_deck))
        .route(
            "/{id}",
            get(decks::get_deck)
                .put(decks::update_deck)
                .delete(decks::delete_deck),
        )
        .route(
            "/{id}/cards",
            get(deck_cards::list_cards)
                .post(deck_cards::add_card)
                .delete(deck_cards::remove_card),
        )
}

//! Handlers for the `/decks/{id}/cards` resource: single-card add and remove
//! through the legality engine.
//!
//! Each mutation runs inside a transaction holding the deck row `FOR UPDATE`,
//! so concurrent edits of the same deck serialize at the database. Engine
//! rejections (second Assist, fifth character, ...) roll the transaction back
//! and surface as 400 with the engine's verbatim message; nothing is
//! persisted on failure.

use axum::extract::{Path, State};
use axum::Json;
use opdeck_core::cards::CardType;
use opdeck_core::error::CoreError;
use opdeck_core::types::DbId;
use opdeck_core::validation::{validate, ValidationReport};
use opdeck_db::models::deck::DeckCardRow;
use opdeck_db::repositories::{CardRepo, DeckRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::decks::ensure_owner;
use crate::middleware::rbac::{RequireAuth, RequireUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /decks/{id}/cards` and `DELETE /decks/{id}/cards`.
#[derive(Debug, Deserialize, Validate)]
pub struct CardRequest {
    pub card_type: CardType,
    pub card_id: DbId,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// The deck's cards and validation state after a mutation.
#[derive(Debug, Serialize)]
pub struct CardsResponse {
    pub cards: Vec<DeckCardRow>,
    pub validation: ValidationReport,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/decks/{id}/cards
///
/// List a deck's card rows.
pub async fn list_cards(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deck = DeckRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Deck", id }))?;
    let cards = DeckRepo::list_cards(&state.pool, deck.id).await?;
    Ok(Json(serde_json::json!({ "data": cards })))
}

/// POST /api/v1/decks/{id}/cards
///
/// Add copies of a card to an owned deck. The engine's add guards run before
/// anything is written; a rejection leaves the deck untouched.
pub async fn add_card(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
    Json(input): Json<CardRequest>,
) -> AppResult<Json<serde_json::Value>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let response = mutate_composition(&state, id, &user, |composition, catalog| {
        composition.add_card(catalog, input.card_type, input.card_id, input.quantity)
    })
    .await?;
    Ok(Json(serde_json::json!({ "data": response })))
}

/// DELETE /api/v1/decks/{id}/cards
///
/// Remove copies of a card from an owned deck. Removing the reserve
/// character's last copy clears the reserve selection.
pub async fn remove_card(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
    Json(input): Json<CardRequest>,
) -> AppResult<Json<serde_json::Value>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let response = mutate_composition(&state, id, &user, |composition, _catalog| {
        composition.remove_card(input.card_type, input.card_id, input.quantity)
    })
    .await?;
    Ok(Json(serde_json::json!({ "data": response })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run one engine mutation against a deck under the row lock and persist the
/// result, returning the updated cards plus a fresh validation report.
async fn mutate_composition(
    state: &AppState,
    deck_id: DbId,
    user: &crate::middleware::auth::AuthUser,
    apply: impl FnOnce(
        &mut opdeck_core::deck::DeckComposition,
        &opdeck_core::cards::CardCatalog,
    ) -> Result<(), opdeck_core::deck::DeckError>,
) -> AppResult<CardsResponse> {
    let catalog = CardRepo::load_catalog(&state.pool).await?;

    let mut tx = state.pool.begin().await?;
    let deck = DeckRepo::lock(&mut tx, deck_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Deck",
            id: deck_id,
        }))?;
    ensure_owner(&deck, user)?;

    let rows = DeckRepo::list_cards_locked(&mut tx, deck_id).await?;
    let mut composition = DeckRepo::compose(&deck, rows)?;

    // A rejection here drops the transaction, rolling back the lock with
    // nothing written.
    apply(&mut composition, &catalog)?;

    DeckRepo::save_composition(&mut tx, deck_id, &composition).await?;
    tx.commit().await?;

    let cards = DeckRepo::list_cards(&state.pool, deck_id).await?;
    let validation = validate(&composition, &catalog);
    Ok(CardsResponse { cards, validation })
}

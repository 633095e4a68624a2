//! Handlers for the `/decks` resource: deck CRUD, metadata updates (including
//! reserve-character selection), and the full-deck dry-run validator.
//!
//! Derived state (total threat, legality) is recomputed by the engine on
//! every read; nothing is cached or stored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use opdeck_core::cards::CardType;
use opdeck_core::deck::{DeckComposition, DeckEntry};
use opdeck_core::error::CoreError;
use opdeck_core::types::DbId;
use opdeck_core::validation::{validate, ValidationReport};
use opdeck_db::models::deck::{CreateDeck, Deck, DeckCardRow, UpdateDeck};
use opdeck_db::repositories::{CardRepo, DeckRepo};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /decks`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeckRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Request body for `PUT /decks/{id}`.
///
/// `reserve_character` distinguishes "absent" (leave unchanged) from
/// explicit `null` (clear the selection) via the double-`Option`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDeckRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub is_limited: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub reserve_character: Option<Option<DbId>>,
}

/// Deserialize a present-but-possibly-null field into `Some(Option<T>)`,
/// leaving an absent field as `None` via `#[serde(default)]`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DbId>::deserialize(deserializer).map(Some)
}

/// One candidate card in a `POST /decks/validate` request.
#[derive(Debug, Deserialize)]
pub struct CandidateCard {
    pub card_type: CardType,
    pub card_id: DbId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Request body for `POST /decks/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateDeckRequest {
    pub cards: Vec<CandidateCard>,
    #[serde(default)]
    pub reserve_character: Option<DbId>,
    #[serde(default)]
    pub is_limited: bool,
}

/// A deck with its composition and freshly computed validation report.
#[derive(Debug, Serialize)]
pub struct DeckDetail {
    #[serde(flatten)]
    pub deck: Deck,
    pub is_owner: bool,
    pub cards: Vec<DeckCardRow>,
    pub validation: ValidationReport,
}

/// A deck summary row for listings.
#[derive(Debug, Serialize)]
pub struct DeckSummary {
    #[serde(flatten)]
    pub deck: Deck,
    pub card_count: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/decks
///
/// List the authenticated user's decks with card counts.
pub async fn list_decks(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<serde_json::Value>> {
    let decks = DeckRepo::list_by_user(&state.pool, user.user_id).await?;
    let ids: Vec<DbId> = decks.iter().map(|d| d.id).collect();
    let counts = DeckRepo::card_counts(&state.pool, &ids).await?;

    let summaries: Vec<DeckSummary> = decks
        .into_iter()
        .map(|deck| {
            let card_count = counts
                .iter()
                .find(|(id, _)| *id == deck.id)
                .map_or(0, |(_, n)| *n);
            DeckSummary { deck, card_count }
        })
        .collect();

    Ok(Json(serde_json::json!({ "data": summaries })))
}

/// POST /api/v1/decks
///
/// Create a new empty deck owned by the caller. Guests may not create decks.
pub async fn create_deck(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(input): Json<CreateDeckRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let deck = DeckRepo::create(
        &state.pool,
        &CreateDeck {
            user_id: user.user_id,
            name: input.name,
            description: input.description,
        },
    )
    .await?;

    let detail = load_detail(&state, deck, user.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": detail })),
    ))
}

/// GET /api/v1/decks/{id}
///
/// Fetch a deck with its cards and a freshly computed validation report.
/// Any authenticated user may view; `is_owner` tells the UI whether editing
/// controls apply.
pub async fn get_deck(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deck = DeckRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Deck", id }))?;

    let detail = load_detail(&state, deck, user.user_id).await?;
    Ok(Json(serde_json::json!({ "data": detail })))
}

/// PUT /api/v1/decks/{id}
///
/// Update deck metadata: name, description, limited flag, and reserve
/// character. Reserve changes go through the engine so the selection always
/// references a character present in the deck.
pub async fn update_deck(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeckRequest>,
) -> AppResult<Json<serde_json::Value>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let deck = DeckRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Deck", id }))?;
    ensure_owner(&deck, &user)?;

    let mut deck = DeckRepo::update_meta(
        &state.pool,
        id,
        &UpdateDeck {
            name: input.name,
            description: input.description,
            is_limited: input.is_limited,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Deck", id }))?;

    // Reserve selection changes under the same row lock as card mutations.
    if let Some(reserve) = input.reserve_character {
        let mut tx = state.pool.begin().await?;
        let locked = DeckRepo::lock(&mut tx, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Deck", id }))?;
        let rows = DeckRepo::list_cards_locked(&mut tx, id).await?;
        let mut composition = DeckRepo::compose(&locked, rows)?;
        composition.set_reserve_character(reserve)?;
        DeckRepo::save_composition(&mut tx, id, &composition).await?;
        tx.commit().await?;

        deck.reserve_character = composition.reserve_character();
    }

    let detail = load_detail(&state, deck, user.user_id).await?;
    Ok(Json(serde_json::json!({ "data": detail })))
}

/// DELETE /api/v1/decks/{id}
///
/// Delete an owned deck. Returns 204 on success.
pub async fn delete_deck(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deck = DeckRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Deck", id }))?;
    ensure_owner(&deck, &user)?;

    DeckRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/decks/validate
///
/// Run the full validator against a supplied candidate card list without
/// touching any persisted deck. Unknown card references are caller-input
/// errors, rejected before the engine runs; rule violations are data in the
/// returned report.
pub async fn validate_deck(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<ValidateDeckRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let catalog = CardRepo::load_catalog(&state.pool).await?;

    // Entries are unique by (card_type, card_id); repeated candidate rows
    // accumulate their quantities.
    let mut entries: Vec<DeckEntry> = Vec::with_capacity(input.cards.len());
    for card in &input.cards {
        if card.quantity < 1 {
            return Err(AppError::BadRequest(
                "quantity must be a positive integer".to_string(),
            ));
        }
        if !catalog.contains(card.card_type, card.card_id) {
            return Err(AppError::Deck(opdeck_core::deck::DeckError::CardNotFound {
                card_type: card.card_type,
                card_id: card.card_id,
            }));
        }
        match entries
            .iter_mut()
            .find(|e| e.card_type == card.card_type && e.card_id == card.card_id)
        {
            Some(entry) => entry.quantity += card.quantity,
            None => entries.push(DeckEntry {
                card_type: card.card_type,
                card_id: card.card_id,
                quantity: card.quantity,
            }),
        }
    }

    let composition =
        DeckComposition::from_parts(entries, input.reserve_character, input.is_limited);
    let report = validate(&composition, &catalog);

    Ok(Json(serde_json::json!({ "data": report })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject callers who do not own the deck.
pub(crate) fn ensure_owner(deck: &Deck, user: &AuthUser) -> Result<(), AppError> {
    if deck.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Access denied. You do not own this deck.".into(),
        )));
    }
    Ok(())
}

/// Assemble a [`DeckDetail`]: cards plus a freshly computed report.
pub(crate) async fn load_detail(
    state: &AppState,
    deck: Deck,
    viewer_id: DbId,
) -> AppResult<DeckDetail> {
    let rows = DeckRepo::list_cards(&state.pool, deck.id).await?;
    let composition = DeckRepo::compose(&deck, rows.clone())?;
    let catalog = CardRepo::load_catalog(&state.pool).await?;
    let validation = validate(&composition, &catalog);

    Ok(DeckDetail {
        is_owner: deck.user_id == viewer_id,
        deck,
        cards: rows,
        validation,
    })
}

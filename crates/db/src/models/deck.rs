//! Deck entity model and DTOs.

use opdeck_core::cards::CardType;
use opdeck_core::deck::DeckEntry;
use opdeck_core::error::CoreError;
use opdeck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A deck row from the `decks` table.
///
/// Carries only scalar attributes; the card multiset lives in `deck_cards`
/// and derived state (threat, legality) is recomputed on every read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deck {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_limited: bool,
    pub reserve_character: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new deck.
#[derive(Debug, Deserialize)]
pub struct CreateDeck {
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating deck metadata. `None` fields are left unchanged;
/// the reserve character is set separately because clearing it requires an
/// explicit NULL write, not a COALESCE skip.
#[derive(Debug, Deserialize)]
pub struct UpdateDeck {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_limited: Option<bool>,
}

/// A row of the `deck_cards` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeckCardRow {
    pub deck_id: DbId,
    pub card_type: String,
    pub card_id: DbId,
    pub quantity: i32,
}

impl DeckCardRow {
    /// Convert the stored row into a core deck entry.
    ///
    /// Fails only if the persisted `card_type` discriminant is unknown,
    /// which indicates schema/data corruption rather than user input.
    pub fn to_entry(&self) -> Result<DeckEntry, CoreError> {
        let card_type: CardType = self.card_type.parse()?;
        Ok(DeckEntry {
            card_type,
            card_id: self.card_id,
            quantity: self.quantity,
        })
    }
}

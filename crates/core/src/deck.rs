//! Deck composition: the in-memory card multiset under mutation.
//!
//! A [`DeckComposition`] is reconstructed from persisted state at the start
//! of a request, mutated once, validated, and written back or discarded.
//! Every mutation checks its guards before touching any state, so a failed
//! operation leaves the composition exactly as it was.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardType};
use crate::types::DbId;

/// Distinct characters allowed in a deck.
pub const MAX_CHARACTERS: usize = 4;

/// Mission cards allowed in a deck.
pub const MAX_MISSIONS: i32 = 7;

/// Errors produced by deck mutations.
///
/// The display strings are the user-facing rejection messages and are
/// rendered verbatim by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("Card not found: {card_type} {card_id}")]
    CardNotFound { card_type: CardType, card_id: DbId },

    #[error("Quantity must be a positive integer")]
    InvalidQuantity,

    #[error("Cannot add more than 1 Assist to a deck")]
    AssistLimitExceeded,

    #[error("Cannot add more than 1 Cataclysm to a deck")]
    CataclysmLimitExceeded,

    #[error("Cannot add more than 1 Ambush to a deck")]
    AmbushLimitExceeded,

    #[error("Cannot add more than 1 Fortification to a deck")]
    FortificationLimitExceeded,

    #[error("Maximum 4 characters allowed per deck")]
    CharacterLimitExceeded,

    #[error("This character is already in the deck")]
    DuplicateCharacter,

    #[error("Cannot add more than 1 location to a deck")]
    LocationLimitExceeded,

    #[error("Cannot add more than 7 missions to a deck")]
    MissionLimitExceeded,

    #[error("Cannot add more than 1 copy of \"{name}\" - One Per Deck")]
    OnePerDeckViolation { name: String },

    #[error("Reserve character must be a character in the deck")]
    InvalidReserveCharacter,

    #[error("Card is not in the deck")]
    CardNotInDeck,
}

/// One line of a deck: a card reference with its copy count.
///
/// Entries are unique by `(card_type, card_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card_type: CardType,
    pub card_id: DbId,
    pub quantity: i32,
}

/// The aggregate under validation: card entries plus scalar deck attributes.
#[derive(Debug, Clone, Default)]
pub struct DeckComposition {
    entries: Vec<DeckEntry>,
    reserve_character: Option<DbId>,
    is_limited: bool,
}

impl DeckComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassemble a composition from persisted state.
    ///
    /// Persisted decks may be provisionally illegal (the API tolerates
    /// incomplete decks between edits), so no guards run here; the validator
    /// reports on whatever was stored.
    pub fn from_parts(
        entries: Vec<DeckEntry>,
        reserve_character: Option<DbId>,
        is_limited: bool,
    ) -> Self {
        Self {
            entries,
            reserve_character,
            is_limited,
        }
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn reserve_character(&self) -> Option<DbId> {
        self.reserve_character
    }

    pub fn is_limited(&self) -> bool {
        self.is_limited
    }

    /// Copies of a specific card currently in the deck (0 if absent).
    pub fn quantity_of(&self, card_type: CardType, card_id: DbId) -> i32 {
        self.entries
            .iter()
            .find(|e| e.card_type == card_type && e.card_id == card_id)
            .map_or(0, |e| e.quantity)
    }

    /// Number of distinct entries of the given type.
    pub fn distinct_count(&self, card_type: CardType) -> usize {
        self.entries.iter().filter(|e| e.card_type == card_type).count()
    }

    /// Total copies across all entries of the given type.
    pub fn quantity_total(&self, card_type: CardType) -> i32 {
        self.entries
            .iter()
            .filter(|e| e.card_type == card_type)
            .map(|e| e.quantity)
            .sum()
    }

    /// Total copies across the whole deck.
    pub fn total_cards(&self) -> i32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Add `quantity` copies of a card, accumulating onto an existing entry.
    ///
    /// All guards run before any state change; on error the composition is
    /// untouched. A second *distinct* Assist/Cataclysm/Ambush special (or
    /// Fortification aspect) is rejected; incrementing the copy count of the
    /// flagged card already present is not a violation.
    pub fn add_card(
        &mut self,
        catalog: &CardCatalog,
        card_type: CardType,
        card_id: DbId,
        quantity: i32,
    ) -> Result<(), DeckError> {
        if quantity < 1 {
            return Err(DeckError::InvalidQuantity);
        }
        if !catalog.contains(card_type, card_id) {
            return Err(DeckError::CardNotFound { card_type, card_id });
        }

        match card_type {
            CardType::Character => {
                if self.quantity_of(CardType::Character, card_id) > 0 {
                    return Err(DeckError::DuplicateCharacter);
                }
                if self.distinct_count(CardType::Character) >= MAX_CHARACTERS {
                    return Err(DeckError::CharacterLimitExceeded);
                }
            }
            CardType::Special => {
                // The check only triggers when the conflicting card would be
                // a second distinct card carrying the flag.
                if let Some(card) = catalog.special(card_id) {
                    if card.is_assist && self.has_other_special(catalog, card_id, |s| s.is_assist) {
                        return Err(DeckError::AssistLimitExceeded);
                    }
                    if card.is_cataclysm
                        && self.has_other_special(catalog, card_id, |s| s.is_cataclysm)
                    {
                        return Err(DeckError::CataclysmLimitExceeded);
                    }
                    if card.is_ambush && self.has_other_special(catalog, card_id, |s| s.is_ambush) {
                        return Err(DeckError::AmbushLimitExceeded);
                    }
                }
            }
            CardType::Aspect => {
                let is_fortification =
                    catalog.aspect(card_id).is_some_and(|a| a.is_fortification);
                if is_fortification {
                    let other_fortification = self
                        .entries
                        .iter()
                        .filter(|e| e.card_type == CardType::Aspect && e.card_id != card_id)
                        .any(|e| catalog.aspect(e.card_id).is_some_and(|a| a.is_fortification));
                    if other_fortification {
                        return Err(DeckError::FortificationLimitExceeded);
                    }
                }
            }
            CardType::Location => {
                if self.quantity_total(CardType::Location) + quantity > 1 {
                    return Err(DeckError::LocationLimitExceeded);
                }
            }
            CardType::Mission => {
                if self.quantity_total(CardType::Mission) + quantity > MAX_MISSIONS {
                    return Err(DeckError::MissionLimitExceeded);
                }
            }
            _ => {}
        }

        if let Some(name) = catalog.one_per_deck(card_type, card_id) {
            if self.quantity_of(card_type, card_id) + quantity > 1 {
                return Err(DeckError::OnePerDeckViolation {
                    name: name.to_string(),
                });
            }
        }

        match self
            .entries
            .iter_mut()
            .find(|e| e.card_type == card_type && e.card_id == card_id)
        {
            Some(entry) => entry.quantity += quantity,
            None => self.entries.push(DeckEntry {
                card_type,
                card_id,
                quantity,
            }),
        }
        Ok(())
    }

    /// Remove `quantity` copies of a card; the entry disappears once its
    /// count reaches zero. A reserve character leaving the deck clears the
    /// reserve selection.
    pub fn remove_card(
        &mut self,
        card_type: CardType,
        card_id: DbId,
        quantity: i32,
    ) -> Result<(), DeckError> {
        if quantity < 1 {
            return Err(DeckError::InvalidQuantity);
        }
        let index = self
            .entries
            .iter()
            .position(|e| e.card_type == card_type && e.card_id == card_id)
            .ok_or(DeckError::CardNotInDeck)?;

        self.entries[index].quantity -= quantity;
        if self.entries[index].quantity <= 0 {
            self.entries.remove(index);
            if card_type == CardType::Character && self.reserve_character == Some(card_id) {
                self.reserve_character = None;
            }
        }
        Ok(())
    }

    /// Select (or clear) the reserve character.
    ///
    /// A non-null selection must reference a character entry present in the
    /// deck; clearing always succeeds.
    pub fn set_reserve_character(&mut self, card_id: Option<DbId>) -> Result<(), DeckError> {
        if let Some(id) = card_id {
            if self.quantity_of(CardType::Character, id) < 1 {
                return Err(DeckError::InvalidReserveCharacter);
            }
        }
        self.reserve_character = card_id;
        Ok(())
    }

    pub fn set_limited(&mut self, is_limited: bool) {
        self.is_limited = is_limited;
    }

    /// Whether a special card other than `card_id` matching `flag` is in the deck.
    fn has_other_special(
        &self,
        catalog: &CardCatalog,
        card_id: DbId,
        flag: impl Fn(&crate::cards::SpecialCard) -> bool,
    ) -> bool {
        self.entries
            .iter()
            .filter(|e| e.card_type == CardType::Special && e.card_id != card_id)
            .any(|e| catalog.special(e.card_id).is_some_and(&flag))
    }
}

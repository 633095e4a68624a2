//! Card model: card types, per-type catalog records, and the in-memory
//! [`CardCatalog`] the deck engine reads.
//!
//! The catalog is a read-only side table owned by the database layer; the
//! caller resolves it into plain values before invoking any deck operation,
//! so everything in this module is synchronous and I/O-free.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// The twelve card categories a deck entry can reference.
///
/// Wire names (serde and the `deck_cards.card_type` column) are kebab-case:
/// `character`, `mission`, ..., `ally-universe`, `basic-universe`,
/// `advanced-universe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardType {
    Character,
    Mission,
    Power,
    Special,
    Event,
    Location,
    Aspect,
    Teamwork,
    AllyUniverse,
    Training,
    BasicUniverse,
    AdvancedUniverse,
}

impl CardType {
    pub const ALL: [CardType; 12] = [
        CardType::Character,
        CardType::Mission,
        CardType::Power,
        CardType::Special,
        CardType::Event,
        CardType::Location,
        CardType::Aspect,
        CardType::Teamwork,
        CardType::AllyUniverse,
        CardType::Training,
        CardType::BasicUniverse,
        CardType::AdvancedUniverse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Character => "character",
            CardType::Mission => "mission",
            CardType::Power => "power",
            CardType::Special => "special",
            CardType::Event => "event",
            CardType::Location => "location",
            CardType::Aspect => "aspect",
            CardType::Teamwork => "teamwork",
            CardType::AllyUniverse => "ally-universe",
            CardType::Training => "training",
            CardType::BasicUniverse => "basic-universe",
            CardType::AdvancedUniverse => "advanced-universe",
        }
    }

    /// Whether this type is one of the five universe-card categories
    /// (teamwork, ally, training, basic, advanced).
    pub fn is_universe(&self) -> bool {
        matches!(
            self,
            CardType::Teamwork
                | CardType::AllyUniverse
                | CardType::Training
                | CardType::BasicUniverse
                | CardType::AdvancedUniverse
        )
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown card type: {s}")))
    }
}

/// The power grid a power or universe card draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerType {
    Energy,
    Combat,
    #[serde(rename = "Brute Force")]
    BruteForce,
    Intelligence,
    /// Usable against any grid; the character's best stat applies.
    #[serde(rename = "Any-Power")]
    AnyPower,
}

impl PowerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerType::Energy => "Energy",
            PowerType::Combat => "Combat",
            PowerType::BruteForce => "Brute Force",
            PowerType::Intelligence => "Intelligence",
            PowerType::AnyPower => "Any-Power",
        }
    }
}

impl fmt::Display for PowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Energy" => Ok(PowerType::Energy),
            "Combat" => Ok(PowerType::Combat),
            "Brute Force" => Ok(PowerType::BruteForce),
            "Intelligence" => Ok(PowerType::Intelligence),
            // Legacy card data uses several spellings for the wildcard grid.
            "Any-Power" | "Multi-Power" | "Multi Power" => Ok(PowerType::AnyPower),
            other => Err(CoreError::Validation(format!("Unknown power type: {other}"))),
        }
    }
}

/// A character card with its power grid and threat profile.
///
/// `reserve_threat_bonus` is the character-specific adjustment applied when
/// the character is the deck's reserve; 0 for characters without a special
/// reserve rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCard {
    pub id: DbId,
    pub name: String,
    pub energy: i32,
    pub combat: i32,
    pub brute_force: i32,
    pub intelligence: i32,
    pub threat_level: i32,
    pub reserve_threat_bonus: i32,
}

impl CharacterCard {
    /// The character's stat on the given grid; `AnyPower` is the best stat.
    pub fn stat(&self, power_type: PowerType) -> i32 {
        match power_type {
            PowerType::Energy => self.energy,
            PowerType::Combat => self.combat,
            PowerType::BruteForce => self.brute_force,
            PowerType::Intelligence => self.intelligence,
            PowerType::AnyPower => self
                .energy
                .max(self.combat)
                .max(self.brute_force)
                .max(self.intelligence),
        }
    }
}

/// A special card. `character_name` of `None` means "Any Character".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialCard {
    pub id: DbId,
    pub name: String,
    pub character_name: Option<String>,
    pub is_assist: bool,
    pub is_cataclysm: bool,
    pub is_ambush: bool,
    pub one_per_deck: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionCard {
    pub id: DbId,
    pub name: String,
    pub mission_set: String,
}

/// An event card. `mission_set` of `None` plays with any mission set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCard {
    pub id: DbId,
    pub name: String,
    pub mission_set: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCard {
    pub id: DbId,
    pub name: String,
    pub threat_level: i32,
    pub one_per_deck: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerCard {
    pub id: DbId,
    pub name: String,
    pub power_type: PowerType,
    pub value: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectCard {
    pub id: DbId,
    pub name: String,
    pub is_fortification: bool,
    pub one_per_deck: bool,
}

/// A universe card of any of the five universe kinds.
///
/// `to_use` carries the printed usability requirement as free text
/// (e.g. `"5 Energy"`); the validator parses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseCard {
    pub id: DbId,
    pub name: String,
    pub kind: CardType,
    pub to_use: Option<String>,
    pub one_per_deck: bool,
}

/// In-memory lookup over the full card catalog, keyed by card type + id.
///
/// Built once per request by the persistence layer; the engine only ever
/// reads it.
#[derive(Debug, Default, Clone)]
pub struct CardCatalog {
    characters: HashMap<DbId, CharacterCard>,
    specials: HashMap<DbId, SpecialCard>,
    missions: HashMap<DbId, MissionCard>,
    events: HashMap<DbId, EventCard>,
    locations: HashMap<DbId, LocationCard>,
    powers: HashMap<DbId, PowerCard>,
    aspects: HashMap<DbId, AspectCard>,
    universe: HashMap<(CardType, DbId), UniverseCard>,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_character(&mut self, card: CharacterCard) {
        self.characters.insert(card.id, card);
    }

    pub fn insert_special(&mut self, card: SpecialCard) {
        self.specials.insert(card.id, card);
    }

    pub fn insert_mission(&mut self, card: MissionCard) {
        self.missions.insert(card.id, card);
    }

    pub fn insert_event(&mut self, card: EventCard) {
        self.events.insert(card.id, card);
    }

    pub fn insert_location(&mut self, card: LocationCard) {
        self.locations.insert(card.id, card);
    }

    pub fn insert_power(&mut self, card: PowerCard) {
        self.powers.insert(card.id, card);
    }

    pub fn insert_aspect(&mut self, card: AspectCard) {
        self.aspects.insert(card.id, card);
    }

    /// Insert a universe card under its own kind.
    pub fn insert_universe(&mut self, card: UniverseCard) {
        self.universe.insert((card.kind, card.id), card);
    }

    /// Whether a card of the given type and id exists in the catalog.
    pub fn contains(&self, card_type: CardType, card_id: DbId) -> bool {
        match card_type {
            CardType::Character => self.characters.contains_key(&card_id),
            CardType::Mission => self.missions.contains_key(&card_id),
            CardType::Power => self.powers.contains_key(&card_id),
            CardType::Special => self.specials.contains_key(&card_id),
            CardType::Event => self.events.contains_key(&card_id),
            CardType::Location => self.locations.contains_key(&card_id),
            CardType::Aspect => self.aspects.contains_key(&card_id),
            kind => self.universe.contains_key(&(kind, card_id)),
        }
    }

    pub fn character(&self, card_id: DbId) -> Option<&CharacterCard> {
        self.characters.get(&card_id)
    }

    pub fn special(&self, card_id: DbId) -> Option<&SpecialCard> {
        self.specials.get(&card_id)
    }

    pub fn mission(&self, card_id: DbId) -> Option<&MissionCard> {
        self.missions.get(&card_id)
    }

    pub fn event(&self, card_id: DbId) -> Option<&EventCard> {
        self.events.get(&card_id)
    }

    pub fn location(&self, card_id: DbId) -> Option<&LocationCard> {
        self.locations.get(&card_id)
    }

    pub fn power(&self, card_id: DbId) -> Option<&PowerCard> {
        self.powers.get(&card_id)
    }

    pub fn aspect(&self, card_id: DbId) -> Option<&AspectCard> {
        self.aspects.get(&card_id)
    }

    pub fn universe_card(&self, kind: CardType, card_id: DbId) -> Option<&UniverseCard> {
        self.universe.get(&(kind, card_id))
    }

    /// The display name of a card, if it resolves.
    pub fn name_of(&self, card_type: CardType, card_id: DbId) -> Option<&str> {
        match card_type {
            CardType::Character => self.character(card_id).map(|c| c.name.as_str()),
            CardType::Mission => self.mission(card_id).map(|c| c.name.as_str()),
            CardType::Power => self.power(card_id).map(|c| c.name.as_str()),
            CardType::Special => self.special(card_id).map(|c| c.name.as_str()),
            CardType::Event => self.event(card_id).map(|c| c.name.as_str()),
            CardType::Location => self.location(card_id).map(|c| c.name.as_str()),
            CardType::Aspect => self.aspect(card_id).map(|c| c.name.as_str()),
            kind => self.universe_card(kind, card_id).map(|c| c.name.as_str()),
        }
    }

    /// Whether the card is flagged one-per-deck, with its display name.
    ///
    /// Characters and missions are governed by their own count rules and are
    /// never one-per-deck.
    pub fn one_per_deck(&self, card_type: CardType, card_id: DbId) -> Option<&str> {
        let (flagged, name) = match card_type {
            CardType::Special => {
                let card = self.special(card_id)?;
                (card.one_per_deck, card.name.as_str())
            }
            CardType::Location => {
                let card = self.location(card_id)?;
                (card.one_per_deck, card.name.as_str())
            }
            CardType::Aspect => {
                let card = self.aspect(card_id)?;
                (card.one_per_deck, card.name.as_str())
            }
            kind if kind.is_universe() => {
                let card = self.universe_card(kind, card_id)?;
                (card.one_per_deck, card.name.as_str())
            }
            _ => return None,
        };
        flagged.then_some(name)
    }
}

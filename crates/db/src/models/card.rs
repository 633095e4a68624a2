//! Card-catalog row models and their conversions into core card types.
//!
//! The rows mirror the catalog tables one-to-one and serialize directly in
//! the catalog listing endpoints; `into_core` conversions feed the engine's
//! in-memory [`opdeck_core::cards::CardCatalog`].

use opdeck_core::cards::{
    AspectCard, CardType, CharacterCard, EventCard, LocationCard, MissionCard, PowerCard,
    PowerType, SpecialCard, UniverseCard,
};
use opdeck_core::error::CoreError;
use opdeck_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterRow {
    pub id: DbId,
    pub name: String,
    pub energy: i32,
    pub combat: i32,
    pub brute_force: i32,
    pub intelligence: i32,
    pub threat_level: i32,
    pub reserve_threat_bonus: i32,
}

impl CharacterRow {
    pub fn into_core(self) -> CharacterCard {
        CharacterCard {
            id: self.id,
            name: self.name,
            energy: self.energy,
            combat: self.combat,
            brute_force: self.brute_force,
            intelligence: self.intelligence,
            threat_level: self.threat_level,
            reserve_threat_bonus: self.reserve_threat_bonus,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpecialCardRow {
    pub id: DbId,
    pub name: String,
    pub character_name: Option<String>,
    pub is_assist: bool,
    pub is_cataclysm: bool,
    pub is_ambush: bool,
    pub one_per_deck: bool,
}

impl SpecialCardRow {
    pub fn into_core(self) -> SpecialCard {
        SpecialCard {
            id: self.id,
            name: self.name,
            character_name: self.character_name,
            is_assist: self.is_assist,
            is_cataclysm: self.is_cataclysm,
            is_ambush: self.is_ambush,
            one_per_deck: self.one_per_deck,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MissionCardRow {
    pub id: DbId,
    pub name: String,
    pub mission_set: String,
}

impl MissionCardRow {
    pub fn into_core(self) -> MissionCard {
        MissionCard {
            id: self.id,
            name: self.name,
            mission_set: self.mission_set,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventCardRow {
    pub id: DbId,
    pub name: String,
    pub mission_set: Option<String>,
}

impl EventCardRow {
    pub fn into_core(self) -> EventCard {
        EventCard {
            id: self.id,
            name: self.name,
            mission_set: self.mission_set,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocationCardRow {
    pub id: DbId,
    pub name: String,
    pub threat_level: i32,
    pub one_per_deck: bool,
}

impl LocationCardRow {
    pub fn into_core(self) -> LocationCard {
        LocationCard {
            id: self.id,
            name: self.name,
            threat_level: self.threat_level,
            one_per_deck: self.one_per_deck,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PowerCardRow {
    pub id: DbId,
    pub name: String,
    pub power_type: String,
    pub value: i32,
}

impl PowerCardRow {
    /// Fails if the stored `power_type` discriminant is unknown.
    pub fn into_core(self) -> Result<PowerCard, CoreError> {
        let power_type: PowerType = self.power_type.parse()?;
        Ok(PowerCard {
            id: self.id,
            name: self.name,
            power_type,
            value: self.value,
        })
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AspectCardRow {
    pub id: DbId,
    pub name: String,
    pub is_fortification: bool,
    pub one_per_deck: bool,
}

impl AspectCardRow {
    pub fn into_core(self) -> AspectCard {
        AspectCard {
            id: self.id,
            name: self.name,
            is_fortification: self.is_fortification,
            one_per_deck: self.one_per_deck,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UniverseCardRow {
    pub id: DbId,
    pub name: String,
    pub kind: String,
    pub to_use: Option<String>,
    pub one_per_deck: bool,
}

impl UniverseCardRow {
    /// Fails if the stored `kind` is not one of the five universe types.
    pub fn into_core(self) -> Result<UniverseCard, CoreError> {
        let kind: CardType = self.kind.parse()?;
        if !kind.is_universe() {
            return Err(CoreError::Validation(format!(
                "Not a universe card type: {kind}"
            )));
        }
        Ok(UniverseCard {
            id: self.id,
            name: self.name,
            kind,
            to_use: self.to_use,
            one_per_deck: self.one_per_deck,
        })
    }
}

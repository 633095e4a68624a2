//! Repository for the static card-catalog tables.
//!
//! Listing methods back the catalog endpoints; [`CardRepo::load_catalog`]
//! resolves the whole catalog into the engine's in-memory lookup, the way
//! every deck operation expects its metadata pre-resolved.

use opdeck_core::cards::CardCatalog;
use opdeck_core::error::CoreError;
use sqlx::PgPool;

use crate::models::card::{
    AspectCardRow, CharacterRow, EventCardRow, LocationCardRow, MissionCardRow, PowerCardRow,
    SpecialCardRow, UniverseCardRow,
};

/// Errors from catalog loading: a query failure or corrupt stored discriminant.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Corrupt(#[from] CoreError),
}

pub struct CardRepo;

impl CardRepo {
    pub async fn list_characters(pool: &PgPool) -> Result<Vec<CharacterRow>, sqlx::Error> {
        sqlx::query_as::<_, CharacterRow>(
            "SELECT id, name, energy, combat, brute_force, intelligence, threat_level, \
             reserve_threat_bonus FROM characters ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_specials(pool: &PgPool) -> Result<Vec<SpecialCardRow>, sqlx::Error> {
        sqlx::query_as::<_, SpecialCardRow>(
            "SELECT id, name, character_name, is_assist, is_cataclysm, is_ambush, one_per_deck \
             FROM special_cards ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_missions(pool: &PgPool) -> Result<Vec<MissionCardRow>, sqlx::Error> {
        sqlx::query_as::<_, MissionCardRow>(
            "SELECT id, name, mission_set FROM mission_cards ORDER BY mission_set, name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_events(pool: &PgPool) -> Result<Vec<EventCardRow>, sqlx::Error> {
        sqlx::query_as::<_, EventCardRow>(
            "SELECT id, name, mission_set FROM event_cards ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_locations(pool: &PgPool) -> Result<Vec<LocationCardRow>, sqlx::Error> {
        sqlx::query_as::<_, LocationCardRow>(
            "SELECT id, name, threat_level, one_per_deck FROM location_cards ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_powers(pool: &PgPool) -> Result<Vec<PowerCardRow>, sqlx::Error> {
        sqlx::query_as::<_, PowerCardRow>(
            "SELECT id, name, power_type, value FROM power_cards ORDER BY power_type, value",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_aspects(pool: &PgPool) -> Result<Vec<AspectCardRow>, sqlx::Error> {
        sqlx::query_as::<_, AspectCardRow>(
            "SELECT id, name, is_fortification, one_per_deck FROM aspect_cards ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn list_universe(pool: &PgPool) -> Result<Vec<UniverseCardRow>, sqlx::Error> {
        sqlx::query_as::<_, UniverseCardRow>(
            "SELECT id, name, kind, to_use, one_per_deck FROM universe_cards ORDER BY kind, name",
        )
        .fetch_all(pool)
        .await
    }

    /// Load the entire catalog into the engine's in-memory lookup.
    ///
    /// The catalog tables are small, static reference data; a fresh load per
    /// request keeps the engine free of caching concerns.
    pub async fn load_catalog(pool: &PgPool) -> Result<CardCatalog, CatalogError> {
        let mut catalog = CardCatalog::new();

        for row in Self::list_characters(pool).await? {
            catalog.insert_character(row.into_core());
        }
        for row in Self::list_specials(pool).await? {
            catalog.insert_special(row.into_core());
        }
        for row in Self::list_missions(pool).await? {
            catalog.insert_mission(row.into_core());
        }
        for row in Self::list_events(pool).await? {
            catalog.insert_event(row.into_core());
        }
        for row in Self::list_locations(pool).await? {
            catalog.insert_location(row.into_core());
        }
        for row in Self::list_powers(pool).await? {
            catalog.insert_power(row.into_core()?);
        }
        for row in Self::list_aspects(pool).await? {
            catalog.insert_aspect(row.into_core());
        }
        for row in Self::list_universe(pool).await? {
            catalog.insert_universe(row.into_core()?);
        }

        tracing::debug!("Card catalog loaded");
        Ok(catalog)
    }
}

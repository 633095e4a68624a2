//! Repository for the `decks` and `deck_cards` tables.
//!
//! Mutations of a deck's composition follow a read-modify-write cycle, so
//! concurrent requests against the same deck are serialized with a row lock:
//! callers open a transaction, take the deck row `FOR UPDATE` via
//! [`DeckRepo::lock`], apply the engine, then [`DeckRepo::save_composition`]
//! and commit. Parallel writers queue on the lock and both apply, giving a
//! deterministic final state.

use opdeck_core::deck::DeckComposition;
use opdeck_core::error::CoreError;
use opdeck_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::deck::{CreateDeck, Deck, DeckCardRow, UpdateDeck};

const COLUMNS: &str =
    "id, user_id, name, description, is_limited, reserve_character, created_at, updated_at";

const CARD_COLUMNS: &str = "deck_id, card_type, card_id, quantity";

pub struct DeckRepo;

impl DeckRepo {
    /// Insert a new (empty) deck, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDeck) -> Result<Deck, sqlx::Error> {
        let query = format!(
            "INSERT INTO decks (user_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a deck by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM decks WHERE id = $1");
        sqlx::query_as::<_, Deck>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's decks, most recently updated first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Deck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM decks WHERE user_id = $1 ORDER BY updated_at DESC");
        sqlx::query_as::<_, Deck>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update scalar deck metadata. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The reserve
    /// character is not touched here; it changes through the engine and
    /// [`DeckRepo::save_composition`].
    pub async fn update_meta(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDeck,
    ) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!(
            "UPDATE decks SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_limited = COALESCE($4, is_limited)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_limited)
            .fetch_optional(pool)
            .await
    }

    /// Delete a deck (cards cascade). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM decks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the card rows of a deck.
    pub async fn list_cards(pool: &PgPool, deck_id: DbId) -> Result<Vec<DeckCardRow>, sqlx::Error> {
        let query = format!(
            "SELECT {CARD_COLUMNS} FROM deck_cards WHERE deck_id = $1 ORDER BY card_type, card_id"
        );
        sqlx::query_as::<_, DeckCardRow>(&query)
            .bind(deck_id)
            .fetch_all(pool)
            .await
    }

    /// Total card counts (sum of quantities) for a set of decks.
    ///
    /// Decks with no cards are absent from the result; callers default to 0.
    pub async fn card_counts(
        pool: &PgPool,
        deck_ids: &[DbId],
    ) -> Result<Vec<(DbId, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, i64)>(
            "SELECT deck_id, COALESCE(SUM(quantity), 0)::BIGINT
             FROM deck_cards WHERE deck_id = ANY($1) GROUP BY deck_id",
        )
        .bind(deck_ids)
        .fetch_all(pool)
        .await
    }

    /// Take the deck row `FOR UPDATE`, serializing composition mutations.
    ///
    /// Must run inside a transaction; the lock is held until commit/rollback.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM decks WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Deck>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List the card rows of a locked deck inside the owning transaction.
    pub async fn list_cards_locked(
        conn: &mut PgConnection,
        deck_id: DbId,
    ) -> Result<Vec<DeckCardRow>, sqlx::Error> {
        let query = format!(
            "SELECT {CARD_COLUMNS} FROM deck_cards WHERE deck_id = $1 ORDER BY card_type, card_id"
        );
        sqlx::query_as::<_, DeckCardRow>(&query)
            .bind(deck_id)
            .fetch_all(conn)
            .await
    }

    /// Reassemble the in-memory composition from a deck row and its cards.
    pub fn compose(deck: &Deck, rows: Vec<DeckCardRow>) -> Result<DeckComposition, CoreError> {
        let entries = rows
            .iter()
            .map(DeckCardRow::to_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DeckComposition::from_parts(
            entries,
            deck.reserve_character,
            deck.is_limited,
        ))
    }

    /// Persist a mutated composition: rewrite the card rows and the scalar
    /// attributes the engine owns (reserve selection, limited flag).
    ///
    /// Must run in the same transaction as [`DeckRepo::lock`].
    pub async fn save_composition(
        conn: &mut PgConnection,
        deck_id: DbId,
        composition: &DeckComposition,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM deck_cards WHERE deck_id = $1")
            .bind(deck_id)
            .execute(&mut *conn)
            .await?;

        for entry in composition.entries() {
            sqlx::query(
                "INSERT INTO deck_cards (deck_id, card_type, card_id, quantity)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(deck_id)
            .bind(entry.card_type.as_str())
            .bind(entry.card_id)
            .bind(entry.quantity)
            .execute(&mut *conn)
            .await?;
        }

        sqlx::query("UPDATE decks SET reserve_character = $2, is_limited = $3 WHERE id = $1")
            .bind(deck_id)
            .bind(composition.reserve_character())
            .bind(composition.is_limited())
            .execute(conn)
            .await?;

        Ok(())
    }
}

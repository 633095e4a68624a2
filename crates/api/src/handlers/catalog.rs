//! Handlers for the `/cards` resource: plain listings of the static card
//! catalog, one endpoint per card category.

use axum::extract::State;
use axum::Json;
use opdeck_db::models::card::{
    AspectCardRow, CharacterRow, EventCardRow, LocationCardRow, MissionCardRow, PowerCardRow,
    SpecialCardRow, UniverseCardRow,
};
use opdeck_db::repositories::CardRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/cards/characters
pub async fn list_characters(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CharacterRow>>>> {
    let cards = CardRepo::list_characters(&state.pool).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/cards/specials
pub async fn list_specials(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SpecialCardRow>>>> {
    let cards = CardRepo::list_specials(&state.pool).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/cards/missions
pub async fn list_missions(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MissionCardRow>>>> {
    let cards = CardRepo::list_missions(&state.pool).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/cards/events
pub async fn list_events(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventCardRow>>>> {
    let cards = CardRepo::list_events(&state.pool).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/cards/locations
pub async fn list_locations(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<LocationCardRow>>>> {
    let cards = CardRepo::list_locations(&state.pool).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/cards/powers
pub async fn list_powers(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PowerCardRow>>>> {
    let cards = CardRepo::list_powers(&state.pool).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/cards/aspects
pub async fn list_aspects(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AspectCardRow>>>> {
    let cards = CardRepo::list_aspects(&state.pool).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/cards/universe
pub async fn list_universe(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UniverseCardRow>>>> {
    let cards = CardRepo::list_universe(&state.pool).await?;
    Ok(Json(DataResponse { data: cards }))
}

//! Handlers for the `/api/v1/people` JSON resource.
//!
//! Same validation and persistence as the form endpoints, with REST-style
//! verbs and the standard `{ "data": ... }` envelope.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rolodex_core::person::PersonInput;
use rolodex_core::types::DbId;
use rolodex_db::repositories::PersonRepo;

use crate::error::AppResult;
use crate::handlers::person::{create_person, delete_person, load_person};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/people
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let people = PersonRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: people }))
}

/// POST /api/v1/people
///
/// Create a person with one phone number. Missing fields count as blank and
/// are reported together with any other field errors.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<PersonInput>,
) -> AppResult<impl IntoResponse> {
    let person = input.into_validated()?;
    let detail = create_person(&state.pool, person).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/people/{id}
///
/// The person with its phone numbers.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let person = load_person(&state.pool, id).await?;
    Ok(Json(DataResponse { data: person }))
}

/// DELETE /api/v1/people/{id}
///
/// Refused with 409 while phone numbers still reference the person.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_person(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

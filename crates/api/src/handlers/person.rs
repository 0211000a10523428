//! Handlers for the form-style `/person` endpoints.
//!
//! These mirror a classic create / list / details page flow: the create
//! endpoint reports one of three form states, and the details endpoint
//! doubles as the delete action when a `delete` flag is present.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use rolodex_core::error::CoreError;
use rolodex_core::matching::single_match;
use rolodex_core::person::{FieldError, FormState, PersonInput, ValidatedPerson, PERSON_CREATED};
use rolodex_core::types::DbId;
use rolodex_db::models::person::{CreatePerson, Person, PersonDetail};
use rolodex_db::repositories::{DeletePersonOutcome, PersonRepo};
use rolodex_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{DetailsParams, FormParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Entity name used in not-found and ambiguous-match errors.
pub const PERSON_ENTITY: &str = "Person";

/// Where the list view lives; index and delete redirect here.
pub const LIST_PATH: &str = "/person/list";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Which of the three create-form states a request ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateState {
    Initial,
    Error,
    Success,
}

/// Explicit result of a create-form request.
#[derive(Debug, Serialize)]
pub struct CreatePersonResponse {
    pub state: CreateState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    /// Raw submitted values, echoed back so the form can be redisplayed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<PersonInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<PersonDetail>,
}

impl CreatePersonResponse {
    fn initial() -> Self {
        Self {
            state: CreateState::Initial,
            message: None,
            errors: Vec::new(),
            values: None,
            person: None,
        }
    }

    fn invalid(errors: Vec<FieldError>, values: PersonInput) -> Self {
        Self {
            state: CreateState::Error,
            errors,
            values: Some(values),
            ..Self::initial()
        }
    }

    fn created(person: PersonDetail) -> Self {
        Self {
            state: CreateState::Success,
            message: Some(PERSON_CREATED),
            person: Some(person),
            ..Self::initial()
        }
    }
}

// ---------------------------------------------------------------------------
// Operations shared with the JSON API
// ---------------------------------------------------------------------------

/// Persist a validated person together with its phone number.
pub async fn create_person(pool: &DbPool, person: ValidatedPerson) -> AppResult<PersonDetail> {
    let detail = PersonRepo::create_with_phone(pool, &CreatePerson::from(person)).await?;
    tracing::info!(person_id = detail.person.id, "Person created");
    Ok(detail)
}

/// Load exactly one person with its phone numbers.
pub async fn load_person(pool: &DbPool, id: DbId) -> AppResult<PersonDetail> {
    let matches = PersonRepo::find_with_phones(pool, id).await?;
    Ok(single_match(matches, PERSON_ENTITY, id)?)
}

/// Delete exactly one person, refusing while phone numbers reference it.
pub async fn delete_person(pool: &DbPool, id: DbId) -> AppResult<Person> {
    match PersonRepo::delete_restricted(pool, id).await? {
        DeletePersonOutcome::Deleted(person) => {
            tracing::info!(person_id = id, "Person deleted");
            Ok(person)
        }
        DeletePersonOutcome::NotFound => Err(CoreError::NotFound {
            entity: PERSON_ENTITY,
            id,
        }
        .into()),
        DeletePersonOutcome::Ambiguous(count) => Err(CoreError::Ambiguous {
            entity: PERSON_ENTITY,
            id,
            count,
        }
        .into()),
        DeletePersonOutcome::HasPhoneNumbers(count) => {
            tracing::info!(person_id = id, count, "Delete refused, phone numbers exist");
            Err(CoreError::Conflict(format!(
                "Cannot delete {PERSON_ENTITY} {id}: {count} dependent phone number(s) exist"
            ))
            .into())
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /person
///
/// Redirect to the list view.
pub async fn index() -> Redirect {
    Redirect::to(LIST_PATH)
}

/// GET|POST /person/create?firstName=&lastName=&phone=
///
/// No parameters: empty form (200). Invalid input: errors plus echoed values
/// (400). Valid input: person and phone number stored (201).
pub async fn create(
    State(state): State<AppState>,
    FormParams(params): FormParams,
) -> AppResult<Response> {
    let response = match FormState::evaluate(PersonInput::from_form_params(&params)) {
        FormState::Initial => (StatusCode::OK, CreatePersonResponse::initial()),
        FormState::Invalid { errors, values } => {
            tracing::debug!(error_count = errors.len(), "Create form rejected");
            (StatusCode::BAD_REQUEST, CreatePersonResponse::invalid(errors, values))
        }
        FormState::Valid(person) => {
            let detail = create_person(&state.pool, person).await?;
            (StatusCode::CREATED, CreatePersonResponse::created(detail))
        }
    };
    let (status, data) = response;
    Ok((status, Json(DataResponse { data })).into_response())
}

/// GET /person/list
///
/// Every person, without phone numbers.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let people = PersonRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: people }))
}

/// GET /person/details?id=<int>[&delete=<any>]
///
/// Without `delete`: the person and its phone numbers. With `delete`: remove
/// the person, then redirect to the list view.
pub async fn details(
    State(state): State<AppState>,
    Query(params): Query<DetailsParams>,
) -> AppResult<Response> {
    let id = params.parse_id()?;

    if params.wants_delete() {
        delete_person(&state.pool, id).await?;
        return Ok(Redirect::to(LIST_PATH).into_response());
    }

    let person = load_person(&state.pool, id).await?;
    Ok(Json(DataResponse { data: person }).into_response())
}

//! Route definitions for the form-style person pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::person;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET       /person, /person/ -> redirect to /person/list
/// GET|POST  /person/create    -> create
/// GET       /person/list      -> list
/// GET       /person/details   -> details, or delete with ?delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/person", get(person::index))
        .route("/person/", get(person::index))
        .route("/person/create", get(person::create).post(person::create))
        .route("/person/list", get(person::list))
        .route("/person/details", get(person::details))
}

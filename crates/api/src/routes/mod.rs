pub mod health;
pub mod people;
pub mod person;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /people                                          list, create
/// /people/{id}                                     get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/people", people::router())
}

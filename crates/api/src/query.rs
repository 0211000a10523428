//! Shared query parameter types and extractors for API handlers.

use std::collections::HashMap;

use axum::extract::{FromRequest, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::Form;
use serde::Deserialize;

use crate::error::AppError;

/// All query-string and urlencoded-body parameters of a request, merged.
///
/// The create form is submitted either as `GET ?firstName=..` or as a `POST`
/// carrying the same fields in the query string and/or an
/// `application/x-www-form-urlencoded` body. Body values win over query
/// values with the same name.
#[derive(Debug, Default)]
pub struct FormParams(pub HashMap<String, String>);

impl<S> FromRequest<S> for FormParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let has_form_body = req.method() != Method::GET
            && req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if has_form_body {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            params.extend(body);
        }

        Ok(Self(params))
    }
}

/// Query parameters for `/person/details?id=<int>[&delete=<any>]`.
///
/// `id` is kept as text so a malformed value yields a readable 400 instead of
/// an extractor rejection. Any value of `delete`, including an empty one,
/// selects the delete intent.
#[derive(Debug, Deserialize)]
pub struct DetailsParams {
    pub id: Option<String>,
    pub delete: Option<String>,
}

impl DetailsParams {
    /// Whether the request asks for the person to be deleted.
    pub fn wants_delete(&self) -> bool {
        self.delete.is_some()
    }

    /// Parse the required integer `id`.
    pub fn parse_id(&self) -> Result<rolodex_core::types::DbId, AppError> {
        let raw = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("Query parameter 'id' is required".into()))?;
        raw.parse().map_err(|_| {
            AppError::BadRequest(format!(
                "Query parameter 'id' must be an integer, got '{raw}'"
            ))
        })
    }
}

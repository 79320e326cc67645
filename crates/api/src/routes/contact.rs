//! Contact request routes.

use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use hotelres_core::contact::{ContactForm, ContactKind};
use hotelres_db::entities::contact_requests;
use hotelres_db::services::ContactService;
use serde::Deserialize;

use super::upload::MultipartForm;
use crate::{ApiError, AppState};

/// Contact request list filter.
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    /// Request kind, e.g. `Complaint`.
    pub kind: Option<String>,
}

/// Anyone may submit a request.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact_request))
}

/// Admins read them.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/contact-requests", get(list_contact_requests))
}

/// POST /contact - multipart form with an optional `image` part.
async fn submit_contact_request(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<contact_requests::Model>), ApiError> {
    let form = MultipartForm::read(multipart, "image").await?;
    let kind: ContactKind = form
        .text("kind")
        .parse()
        .map_err(|e: hotelres_core::contact::UnknownContactKind| {
            ApiError::bad_request(e.to_string())
        })?;
    let input = ContactForm {
        name: form.text("name"),
        kind,
        body: form.text("body"),
        phone_number: form.optional("phone_number"),
    };

    let uow = state.unit_of_work();
    let request =
        ContactService::submit_contact_request(&uow, &state.storage, input, form.image).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /contact-requests?kind=
async fn list_contact_requests(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> Result<Json<Vec<contact_requests::Model>>, ApiError> {
    let kind = match query.kind.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(kind) => Some(kind.parse::<ContactKind>().map_err(|e| {
            ApiError::bad_request(e.to_string())
        })?),
    };

    let uow = state.unit_of_work();
    Ok(Json(ContactService::list_contact_requests(&uow, kind).await?))
}

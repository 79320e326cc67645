//! Company management routes (admin).

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, put},
};
use hotelres_core::company::{CreateCompanyForm, EditCompanyForm};
use hotelres_db::entities::companies;
use uuid::Uuid;

use super::upload::MultipartForm;
use crate::{ApiError, AppState, middleware::AuthUser};

/// Creates the company routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{id}",
            get(get_company).put(edit_company).delete(delete_company),
        )
        .route("/companies/{id}/profile-image", put(replace_profile_image))
}

/// GET /companies
async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<companies::Model>>, ApiError> {
    let uow = state.unit_of_work();
    Ok(Json(state.companies().list_companies(&uow).await?))
}

/// GET /companies/{id}
async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<companies::Model>, ApiError> {
    let uow = state.unit_of_work();
    Ok(Json(state.companies().company(&uow, id).await?))
}

/// POST /companies - multipart form with an optional `image` part.
async fn create_company(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<companies::Model>), ApiError> {
    let form = MultipartForm::read(multipart, "image").await?;
    let input = CreateCompanyForm {
        name: form.text("name"),
        email: form.text("email").trim().to_string(),
        phone_number: form.optional("phone_number"),
        address: form.optional("address"),
        password: form.text("password"),
        confirm_password: form.text("confirm_password"),
    };

    let uow = state.unit_of_work();
    let company = state
        .companies()
        .create_company(&uow, &user.actor(), input, form.image)
        .await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// PUT /companies/{id}
async fn edit_company(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(form): Json<EditCompanyForm>,
) -> Result<Json<companies::Model>, ApiError> {
    let uow = state.unit_of_work();
    let company = state
        .companies()
        .edit_company(&uow, &user.actor(), id, form, None)
        .await?;
    Ok(Json(company))
}

/// PUT /companies/{id}/profile-image - multipart form with an `image` part.
async fn replace_profile_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<companies::Model>, ApiError> {
    let form = MultipartForm::read(multipart, "image").await?;
    let Some(image) = form.image else {
        return Err(ApiError::bad_request("an image is required"));
    };

    let uow = state.unit_of_work();
    let company = state
        .companies()
        .replace_profile_image(&uow, &user.actor(), id, image)
        .await?;
    Ok(Json(company))
}

/// DELETE /companies/{id}
async fn delete_company(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let uow = state.unit_of_work();
    state
        .companies()
        .delete_company(&uow, &user.actor(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

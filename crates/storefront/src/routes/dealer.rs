//! Dealer application route handlers.

use agrimart_core::DealerApplicationId;
use agrimart_core::dealer::{DealerApplication, DealerApplicationForm};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Submit a dealer application.
///
/// POST /dealer/applications
#[instrument(skip(state, form), fields(business = %form.business_name))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<DealerApplicationForm>,
) -> Result<impl IntoResponse> {
    let application = form.validate()?;
    let application = state.dealers().submit(application)?;

    let application_id = application.id.to_string();
    add_breadcrumb(
        "dealer",
        "Dealer application submitted",
        Some(&[("application_id", application_id.as_str())]),
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// Look up a dealer application.
///
/// GET /dealer/applications/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DealerApplication>> {
    let id: DealerApplicationId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid application id: {id}")))?;

    state
        .dealers()
        .get(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("application {id}")))
}

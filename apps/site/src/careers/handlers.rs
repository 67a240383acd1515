use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::careers::models::CareerRecord;
use crate::errors::AppError;
use crate::render::{render_detail_page, render_list_page, render_not_found_page};
use crate::state::AppState;

/// GET /
pub async fn handle_list_page(State(state): State<AppState>) -> Html<String> {
    let records = state.loader.load_all().await;
    Html(render_list_page(&records))
}

/// GET /careers/:id
pub async fn handle_detail_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.loader.load_one(&id).await {
        Ok(record) => Html(render_detail_page(&record)).into_response(),
        Err(e) if e.is_missing_record() => {
            tracing::debug!("No page for '{id}': {e}");
            (StatusCode::NOT_FOUND, Html(render_not_found_page())).into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<Vec<CareerRecord>> {
    Json(state.loader.load_all().await)
}

/// GET /api/v1/careers/:id
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CareerRecord>, AppError> {
    let record = state.loader.load_one(&id).await?;
    Ok(Json(record))
}

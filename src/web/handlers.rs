use crate::model::{DealView, ExtractionSummary, ServiceError};
use crate::web::AppState;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of the company name.
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub search_company: String,
    pub deals: Vec<DealView>,
}

/// GET /?company=...
pub async fn list_deals(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ServiceError> {
    let search_company = query.company.trim().to_string();
    let deals = state.service.list(Some(search_company.as_str())).await?;
    info!("Listing {} deals (filter '{}')", deals.len(), search_company);

    Ok(Json(ListResponse {
        search_company,
        deals,
    }))
}

/// GET /company/:name
pub async fn company_details(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ServiceError> {
    match state.service.get_by_key(&name).await? {
        Some(deal) => Ok(Json(deal).into_response()),
        None => Ok((StatusCode::NOT_FOUND, "Company not found").into_response()),
    }
}

/// POST /refresh
pub async fn refresh(
    State(state): State<AppState>,
) -> Result<Json<ExtractionSummary>, ServiceError> {
    info!("Manual refresh requested");
    Ok(Json(state.service.refresh().await?))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        let body = Json(json!({
            "error": self.to_string(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

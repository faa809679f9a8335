//! Published categories and locations, for filling post forms.

use actix_web::{HttpResponse, web};

use super::present;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.find_published().await?;
    let body: Vec<_> = categories.into_iter().map(present::category).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/locations
pub async fn locations(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let locations = state.locations.find_published().await?;
    let body: Vec<_> = locations.into_iter().map(present::location).collect();

    Ok(HttpResponse::Ok().json(body))
}

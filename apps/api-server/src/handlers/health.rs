//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct StoreHealth {
    pub backend: &'static str,
    pub reachable: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: StoreHealth,
    pub timestamp: String,
}

/// GET /api/health
///
/// `503` when the entity store cannot answer a trivial read.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let reachable = match state.categories.find_published().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(backend = state.backend, error = %e, "Entity store unreachable");
            false
        }
    };

    let response = HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store: StoreHealth {
            backend: state.backend,
            reachable,
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if reachable {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

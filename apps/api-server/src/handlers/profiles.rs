//! Profile pages and profile editing.

use actix_web::{HttpResponse, web};

use blogicum_core::forms::UserForm;
use blogicum_shared::dto::{ProfilePageResponse, ProfileRequest};

use super::posts::PageQuery;
use super::present;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profile/{username}
pub async fn show(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let viewer_id = viewer.0.map(|identity| identity.user_id);
    let listing = state
        .profiles
        .profile(&path, viewer_id, query.number())
        .await?;

    Ok(HttpResponse::Ok().json(ProfilePageResponse {
        profile: present::user(listing.profile),
        page_obj: present::page(listing.page, present::post),
    }))
}

/// PUT /api/profile
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let form = UserForm {
        username: req.username,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
    };
    let user = state.profiles.update(identity.user_id, form).await?;
    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(HttpResponse::Ok()
        .insert_header(("Location", format!("/api/profile/{}", user.username)))
        .json(present::user(user)))
}

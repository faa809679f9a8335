//! Comment authoring.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::domain::{Comment, CommentView};
use blogicum_core::ports::UserRepository;
use blogicum_core::forms::CommentForm;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{CommentRequest, CommentResponse};

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Tokens outlive renames, so the author's name is read from the store.
async fn written_by(users: &dyn UserRepository, comment: Comment) -> AppResult<CommentResponse> {
    let author = users
        .find_by_id(comment.author_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(present::comment(CommentView {
        comment,
        author_username: author.username,
    }))
}

/// POST /api/posts/{post_id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let form = CommentForm {
        text: body.into_inner().text,
    };
    let comment = state
        .comments
        .add(identity.user_id, path.into_inner(), form)
        .await?;
    tracing::debug!(comment_id = %comment.id, post_id = %comment.post_id, "Comment added");

    Ok(HttpResponse::Created().json(written_by(state.users.as_ref(), comment).await?))
}

/// PUT /api/posts/{post_id}/comments/{comment_id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let form = CommentForm {
        text: body.into_inner().text,
    };
    let comment = state
        .comments
        .update(identity.user_id, post_id, comment_id, form)
        .await?;

    Ok(HttpResponse::Ok().json(written_by(state.users.as_ref(), comment).await?))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .comments
        .delete(identity.user_id, post_id, comment_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(comment_id, "Comment deleted")))
}

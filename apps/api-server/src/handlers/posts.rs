//! Feed, post detail, category listing and post authoring.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use blogicum_core::forms::PostForm;
use blogicum_core::pagination::parse_page_number;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{CategoryPageResponse, FeedResponse, PostDetailResponse, PostRequest};

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// `?page=N`; anything unparsable means the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn number(&self) -> i64 {
        parse_page_number(self.page.as_deref())
    }
}

fn post_form(req: PostRequest) -> PostForm {
    PostForm {
        title: req.title,
        text: req.text,
        pub_date: req.pub_date,
        category_id: req.category,
        location_id: req.location,
        image: req.image,
        is_published: req.is_published,
    }
}

/// GET /api/posts
pub async fn feed(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.feed(query.number()).await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        page_obj: present::page(page, present::post),
    }))
}

/// GET /api/posts/{post_id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let detail = state.posts.detail(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: present::post(detail.post),
        comments: detail.comments.into_iter().map(present::comment).collect(),
    }))
}

/// GET /api/category/{slug}
pub async fn category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let listing = state.posts.category_posts(&path, query.number()).await?;

    Ok(HttpResponse::Ok().json(CategoryPageResponse {
        category: present::category(listing.category),
        page_obj: present::page(listing.page, present::post),
    }))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create(identity.user_id, post_form(body.into_inner()))
        .await?;
    tracing::info!(post_id = %post.id, author_id = %identity.user_id, "Post created");

    let view = state.posts.authored(identity.user_id, post.id).await?;
    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/api/profile/{}", view.author_username)))
        .json(present::post(view)))
}

/// PUT /api/posts/{post_id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(identity.user_id, path.into_inner(), post_form(body.into_inner()))
        .await?;

    let view = state.posts.authored(identity.user_id, post.id).await?;
    Ok(HttpResponse::Ok().json(present::post(view)))
}

/// DELETE /api/posts/{post_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    state.posts.delete(identity.user_id, post_id).await?;
    tracing::info!(%post_id, author_id = %identity.user_id, "Post deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post_id, "Post deleted")))
}

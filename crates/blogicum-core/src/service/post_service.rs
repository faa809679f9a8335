//! Post feed, detail, category listing and post authoring.

use std::sync::Arc;

use uuid::Uuid;

use super::Repositories;
use crate::access::AccessGuard;
use crate::domain::{Category, CommentView, Post, PostView};
use crate::error::DomainError;
use crate::forms::{PostDraft, PostForm};
use crate::pagination::{Page, Paginator};
use crate::ports::Clock;
use crate::visibility::PostQuery;

/// A publicly visible post with its comments, oldest first.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone)]
pub struct CategoryListing {
    pub category: Category,
    pub page: Page<PostView>,
}

pub struct PostService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
    paginator: Paginator,
}

impl PostService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self {
            repos,
            clock,
            paginator: Paginator::default(),
        }
    }

    fn public(&self) -> PostQuery {
        PostQuery::public(self.clock.now())
    }

    /// Publicly visible posts, newest first.
    pub async fn feed(&self, page: i64) -> Result<Page<PostView>, DomainError> {
        let posts = self.repos.posts.find_views(&self.public()).await?;
        Ok(self.paginator.paginate(posts, page))
    }

    pub async fn detail(&self, post_id: Uuid) -> Result<PostDetail, DomainError> {
        let post = self
            .repos
            .posts
            .find_views(&self.public().with_id(post_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("post", post_id))?;
        let comments = self.repos.comments.find_by_post(post_id).await?;

        Ok(PostDetail { post, comments })
    }

    /// Visible posts of a published category.
    pub async fn category_posts(
        &self,
        slug: &str,
        page: i64,
    ) -> Result<CategoryListing, DomainError> {
        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let posts = self
            .repos
            .posts
            .find_views(&self.public().in_category(category.id))
            .await?;

        Ok(CategoryListing {
            category,
            page: self.paginator.paginate(posts, page),
        })
    }

    /// A post as its author sees it, whatever its visibility.
    pub async fn authored(&self, author_id: Uuid, post_id: Uuid) -> Result<PostView, DomainError> {
        self.repos
            .posts
            .find_views(&PostQuery::all().by_author(author_id).with_id(post_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    pub async fn create(&self, author_id: Uuid, form: PostForm) -> Result<Post, DomainError> {
        let draft = self.clean(form).await?;

        let mut post = Post::new(author_id, draft.title, draft.text, draft.pub_date);
        post.category_id = draft.category_id;
        post.location_id = draft.location_id;
        post.image = draft.image;
        post.is_published = draft.is_published;

        Ok(self.repos.posts.save(post).await?)
    }

    pub async fn update(
        &self,
        actor: Uuid,
        post_id: Uuid,
        form: PostForm,
    ) -> Result<Post, DomainError> {
        let mut post = self.find(post_id).await?;
        AccessGuard::ensure_author(actor, &post)?;
        let draft = self.clean(form).await?;

        post.title = draft.title;
        post.text = draft.text;
        post.pub_date = draft.pub_date;
        post.category_id = draft.category_id;
        post.location_id = draft.location_id;
        post.image = draft.image;
        post.is_published = draft.is_published;

        Ok(self.repos.posts.save(post).await?)
    }

    /// Delete a post and, through the store, its comments.
    pub async fn delete(&self, actor: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        let post = self.find(post_id).await?;
        AccessGuard::ensure_author(actor, &post)?;

        Ok(self.repos.posts.delete(post.id).await?)
    }

    async fn find(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    /// Field validation plus checks that referenced rows exist.
    async fn clean(&self, form: PostForm) -> Result<PostDraft, DomainError> {
        let (category_id, location_id) = (form.category_id, form.location_id);
        let mut errors = Vec::new();

        let draft = match form.clean() {
            Ok(draft) => Some(draft),
            Err(field_errors) => {
                errors.extend(field_errors);
                None
            }
        };

        if let Some(id) = category_id {
            if self.repos.categories.find_by_id(id).await?.is_none() {
                errors.push("category: select a valid choice".to_string());
            }
        }
        if let Some(id) = location_id {
            if self.repos.locations.find_by_id(id).await?.is_none() {
                errors.push("location: select a valid choice".to_string());
            }
        }

        match draft {
            Some(draft) if errors.is_empty() => Ok(draft),
            _ => Err(DomainError::Validation(errors)),
        }
    }
}

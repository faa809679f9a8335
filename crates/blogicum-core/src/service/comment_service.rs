//! Comment authoring.

use std::sync::Arc;

use uuid::Uuid;

use super::Repositories;
use crate::access::AccessGuard;
use crate::domain::{Comment, Post};
use crate::error::DomainError;
use crate::forms::CommentForm;
use crate::ports::Clock;
use crate::visibility::PostQuery;

pub struct CommentService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
}

impl CommentService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Attach a comment by `author_id` to a post the author can see.
    pub async fn add(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        form: CommentForm,
    ) -> Result<Comment, DomainError> {
        let post = self.commentable_post(author_id, post_id).await?;
        let text = form.clean().map_err(DomainError::Validation)?;

        let comment = Comment::new(post.id, author_id, text);
        Ok(self.repos.comments.save(comment).await?)
    }

    pub async fn update(
        &self,
        actor: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
        form: CommentForm,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.find(post_id, comment_id).await?;
        AccessGuard::ensure_author(actor, &comment)?;

        comment.text = form.clean().map_err(DomainError::Validation)?;
        Ok(self.repos.comments.save(comment).await?)
    }

    pub async fn delete(
        &self,
        actor: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), DomainError> {
        let comment = self.find(post_id, comment_id).await?;
        AccessGuard::ensure_author(actor, &comment)?;

        Ok(self.repos.comments.delete(comment.id).await?)
    }

    /// A comment addressed through a different post does not exist there.
    async fn find(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, DomainError> {
        self.repos
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    /// Publicly visible posts accept comments from anyone; hidden ones only
    /// from their author.
    async fn commentable_post(&self, actor: Uuid, post_id: Uuid) -> Result<Post, DomainError> {
        let post = self
            .repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;
        if post.author_id == actor {
            return Ok(post);
        }

        let query = PostQuery::public(self.clock.now()).with_id(post_id);
        if self.repos.posts.find_views(&query).await?.is_empty() {
            return Err(DomainError::not_found("post", post_id));
        }
        Ok(post)
    }
}

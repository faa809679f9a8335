use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, CommentView, Location, Post, PostView, User};
use crate::error::RepoError;
use crate::visibility::PostQuery;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, applying the schema's delete rules.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
///
/// Deleting a user also deletes their posts and comments.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Deleting a category clears it from posts filed under it.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// Published categories ordered by title.
    async fn find_published(&self) -> Result<Vec<Category>, RepoError>;
}

/// Deleting a location clears it from posts tagged with it.
#[async_trait]
pub trait LocationRepository: BaseRepository<Location, Uuid> {
    /// Published locations ordered by name.
    async fn find_published(&self) -> Result<Vec<Location>, RepoError>;
}

/// Deleting a post also deletes its comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `query`, newest publication date first, with related rows.
    async fn find_views(&self, query: &PostQuery) -> Result<Vec<PostView>, RepoError>;
}

#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<CommentView>, RepoError>;
}

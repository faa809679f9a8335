//! Blog use-case services.
//!
//! Services combine the repositories with the visibility rules, the
//! paginator and the author guard. Read paths always go through
//! [`PostQuery`](crate::visibility::PostQuery); write paths always go through
//! [`AccessGuard`](crate::access::AccessGuard).

mod comment_service;
mod post_service;
mod profile_service;

use std::sync::Arc;

use crate::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

pub use comment_service::CommentService;
pub use post_service::{CategoryListing, PostDetail, PostService};
pub use profile_service::{ProfileListing, ProfileService};

/// Handles to every entity store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

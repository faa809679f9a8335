//! Author guard for edit and delete operations.

use uuid::Uuid;

use crate::domain::{Comment, Post};
use crate::error::DomainError;

/// A resource owned by a single author and shown on a post's page.
pub trait Authored {
    fn author_id(&self) -> Uuid;

    /// Post whose detail page a denied request is sent back to.
    fn post_id(&self) -> Uuid;
}

impl Authored for Post {
    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn post_id(&self) -> Uuid {
        self.id
    }
}

impl Authored for Comment {
    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn post_id(&self) -> Uuid {
        self.post_id
    }
}

/// Permits mutation only when the acting user is the recorded author.
pub struct AccessGuard;

impl AccessGuard {
    pub fn ensure_author<R: Authored>(actor: Uuid, resource: &R) -> Result<(), DomainError> {
        if resource.author_id() == actor {
            Ok(())
        } else {
            Err(DomainError::NotAuthor {
                post_id: resource.post_id(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_author_may_mutate_post() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "t".into(), "b".into(), Utc::now());

        assert!(AccessGuard::ensure_author(author, &post).is_ok());
    }

    #[test]
    fn test_stranger_is_sent_back_to_post() {
        let post = Post::new(Uuid::new_v4(), "t".into(), "b".into(), Utc::now());

        let err = AccessGuard::ensure_author(Uuid::new_v4(), &post).unwrap_err();
        assert!(matches!(err, DomainError::NotAuthor { post_id } if post_id == post.id));
    }

    #[test]
    fn test_comment_denial_points_at_parent_post() {
        let post_id = Uuid::new_v4();
        let comment = Comment::new(post_id, Uuid::new_v4(), "hi".into());

        let err = AccessGuard::ensure_author(Uuid::new_v4(), &comment).unwrap_err();
        assert!(matches!(err, DomainError::NotAuthor { post_id: p } if p == post_id));
    }
}

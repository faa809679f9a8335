//! Post visibility rules.
//!
//! Every read path describes the posts it wants with a [`PostQuery`]. Stores
//! either evaluate [`PostQuery::matches`] directly or translate the query into
//! their own filter language, so the public rules are stated once here.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post};

/// Public visibility at a reference instant.
///
/// A post is publicly visible iff its publication date is not after `now`,
/// it is published, and its category (if any) is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    now: DateTime<Utc>,
}

impl Visibility {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// `category` is the row referenced by `post.category_id`, if any.
    pub fn admits(&self, post: &Post, category: Option<&Category>) -> bool {
        post.pub_date <= self.now
            && post.is_published
            && category.is_none_or(|c| c.is_published)
    }
}

/// Selection of posts for a listing or lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// `None` disables the public rules (author's own profile).
    pub visibility: Option<Visibility>,
    pub category_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
}

impl PostQuery {
    /// Every post, regardless of publication state.
    pub fn all() -> Self {
        Self::default()
    }

    /// Posts publicly visible at `now`.
    pub fn public(now: DateTime<Utc>) -> Self {
        Self {
            visibility: Some(Visibility::at(now)),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn by_author(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn with_id(mut self, post_id: Uuid) -> Self {
        self.post_id = Some(post_id);
        self
    }

    pub fn matches(&self, post: &Post, category: Option<&Category>) -> bool {
        if self.post_id.is_some_and(|id| id != post.id) {
            return false;
        }
        if self.author_id.is_some_and(|id| id != post.author_id) {
            return false;
        }
        if self.category_id.is_some() && self.category_id != post.category_id {
            return false;
        }
        self.visibility.is_none_or(|v| v.admits(post, category))
    }
}

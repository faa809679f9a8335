//! User profile pages and profile editing.

use std::sync::Arc;

use uuid::Uuid;

use super::Repositories;
use crate::domain::{PostView, User};
use crate::error::DomainError;
use crate::forms::UserForm;
use crate::pagination::{Page, Paginator};
use crate::ports::Clock;
use crate::visibility::PostQuery;

#[derive(Debug, Clone)]
pub struct ProfileListing {
    pub profile: User,
    pub page: Page<PostView>,
}

pub struct ProfileService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
    paginator: Paginator,
}

impl ProfileService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self {
            repos,
            clock,
            paginator: Paginator::default(),
        }
    }

    /// Posts of `username`.
    ///
    /// The owner sees everything they wrote, scheduled and hidden posts
    /// included; everybody else sees the publicly visible subset.
    pub async fn profile(
        &self,
        username: &str,
        viewer: Option<Uuid>,
        page: i64,
    ) -> Result<ProfileListing, DomainError> {
        let profile = self
            .repos
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let query = if viewer == Some(profile.id) {
            PostQuery::all()
        } else {
            PostQuery::public(self.clock.now())
        };
        let posts = self.repos.posts.find_views(&query.by_author(profile.id)).await?;

        Ok(ProfileListing {
            profile,
            page: self.paginator.paginate(posts, page),
        })
    }

    pub async fn update(&self, user_id: Uuid, form: UserForm) -> Result<User, DomainError> {
        let mut user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", user_id))?;
        let form = form.clean().map_err(DomainError::Validation)?;

        if form.username != user.username {
            if let Some(other) = self.repos.users.find_by_username(&form.username).await? {
                if other.id != user.id {
                    return Err(DomainError::Validation(vec![
                        "username: a user with that username already exists".to_string(),
                    ]));
                }
            }
        }

        user.username = form.username;
        user.first_name = form.first_name;
        user.last_name = form.last_name;
        user.email = form.email;

        Ok(self.repos.users.save(user).await?)
    }
}

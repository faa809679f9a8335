//! PostgreSQL repository implementations.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

use blogicum_core::domain::{Category, CommentView, Location, PostView, User};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use blogicum_core::visibility::PostQuery;

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// SQL form of [`PostQuery`]. Expects `categories` to be LEFT JOINed.
pub(crate) fn post_condition(query: &PostQuery) -> Condition {
    let mut condition = Condition::all();

    if let Some(visibility) = query.visibility {
        condition = condition
            .add(post::Column::PubDate.lte(visibility.now()))
            .add(post::Column::IsPublished.eq(true))
            .add(
                Condition::any()
                    .add(post::Column::CategoryId.is_null())
                    .add(category::Column::IsPublished.eq(true)),
            );
    }
    if let Some(category_id) = query.category_id {
        condition = condition.add(post::Column::CategoryId.eq(category_id));
    }
    if let Some(author_id) = query.author_id {
        condition = condition.add(post::Column::AuthorId.eq(author_id));
    }
    if let Some(post_id) = query.post_id {
        condition = condition.add(post::Column::Id.eq(post_id));
    }

    condition
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_published(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::IsPublished.eq(true))
            .order_by_asc(category::Column::Title)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn find_published(&self) -> Result<Vec<Location>, RepoError> {
        let result = LocationEntity::find()
            .filter(location::Column::IsPublished.eq(true))
            .order_by_asc(location::Column::Name)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_views(&self, query: &PostQuery) -> Result<Vec<PostView>, RepoError> {
        let posts = PostEntity::find()
            .join(JoinType::LeftJoin, post::Relation::Category.def())
            .filter(post_condition(query))
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::CreatedAt)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        if posts.is_empty() {
            return Ok(Vec::new());
        }

        // Related rows are fetched in one query per table.
        let author_ids: BTreeSet<Uuid> = posts.iter().map(|p| p.author_id).collect();
        let category_ids: BTreeSet<Uuid> = posts.iter().filter_map(|p| p.category_id).collect();
        let location_ids: BTreeSet<Uuid> = posts.iter().filter_map(|p| p.location_id).collect();
        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let usernames: HashMap<Uuid, String> = UserEntity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(self.conn())
            .await
            .map_err(repo_error)?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let categories: HashMap<Uuid, Category> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            CategoryEntity::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(self.conn())
                .await
                .map_err(repo_error)?
                .into_iter()
                .map(|c| (c.id, c.into()))
                .collect()
        };

        let locations: HashMap<Uuid, Location> = if location_ids.is_empty() {
            HashMap::new()
        } else {
            LocationEntity::find()
                .filter(location::Column::Id.is_in(location_ids))
                .all(self.conn())
                .await
                .map_err(repo_error)?
                .into_iter()
                .map(|l| (l.id, l.into()))
                .collect()
        };

        let comment_counts: HashMap<Uuid, i64> = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(comment::Column::Id.count(), "comment_count")
            .filter(comment::Column::PostId.is_in(post_ids))
            .group_by(comment::Column::PostId)
            .into_tuple::<(Uuid, i64)>()
            .all(self.conn())
            .await
            .map_err(repo_error)?
            .into_iter()
            .collect();

        Ok(posts
            .into_iter()
            .map(|model| {
                let author_username = usernames.get(&model.author_id).cloned().unwrap_or_default();
                let category = model.category_id.and_then(|id| categories.get(&id).cloned());
                let location = model.location_id.and_then(|id| locations.get(&id).cloned());
                let comment_count = comment_counts.get(&model.id).copied().unwrap_or(0) as u64;

                PostView {
                    post: model.into(),
                    author_username,
                    category,
                    location,
                    comment_count,
                }
            })
            .collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<CommentView>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .find_also_related(UserEntity)
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentView {
                comment: comment.into(),
                author_username: author.map(|u| u.username).unwrap_or_default(),
            })
            .collect())
    }
}

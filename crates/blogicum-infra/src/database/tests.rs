use chrono::Utc;
use sea_orm::{DatabaseBackend, EntityTrait, JoinType, MockDatabase, QueryFilter, QuerySelect};
use sea_orm::{QueryTrait, RelationTrait};
use uuid::Uuid;

use blogicum_core::domain::{Category, Post};
use blogicum_core::ports::{BaseRepository, CategoryRepository};
use blogicum_core::visibility::PostQuery;

use crate::database::connections::DatabaseConnections;
use crate::database::entity::{category, post};
use crate::database::postgres_repo::{
    PostgresCategoryRepository, PostgresPostRepository, post_condition,
};

fn post_model(id: Uuid, author_id: Uuid) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        author_id,
        title: "Test Post".to_owned(),
        text: "Content".to_owned(),
        pub_date: now.into(),
        location_id: None,
        category_id: None,
        image: None,
        is_published: true,
        created_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, author_id)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_save_inserts_when_no_row_was_updated() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .append_query_results(vec![vec![post_model(post_id, author_id)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post {
        id: post_id,
        ..Post::new(author_id, "Test Post".into(), "Content".into(), Utc::now())
    };

    let saved: Post = repo.save(post).await.unwrap();
    assert_eq!(saved.id, post_id);
}

#[tokio::test]
async fn test_find_category_by_slug() {
    let category = Category::new("Travel", "Trips and routes", "travel");
    let model = category::Model {
        id: category.id,
        title: category.title.clone(),
        description: category.description.clone(),
        slug: category.slug.clone(),
        is_published: true,
        created_at: category.created_at.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let found = repo.find_by_slug("travel").await.unwrap().unwrap();

    assert_eq!(found, category);
}

#[tokio::test]
async fn test_repositories_share_one_pool() {
    let post_id = Uuid::new_v4();
    let category = Category::new("Travel", "Trips and routes", "travel");
    let category_model = category::Model {
        id: category.id,
        title: category.title.clone(),
        description: category.description.clone(),
        slug: category.slug.clone(),
        is_published: true,
        created_at: category.created_at.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, Uuid::new_v4())]])
        .append_query_results(vec![vec![category_model]])
        .into_connection();
    let connections = DatabaseConnections::from_connection(db);
    let repos = connections.repositories();

    let post = repos.posts.find_by_id(post_id).await.unwrap().unwrap();
    let found = repos.categories.find_by_slug("travel").await.unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(found, Some(category));
}

#[test]
fn test_public_condition_sql() {
    let sql = post::Entity::find()
        .join(JoinType::LeftJoin, post::Relation::Category.def())
        .filter(post_condition(&PostQuery::public(Utc::now())))
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#"LEFT JOIN "categories""#));
    assert!(sql.contains(r#""posts"."pub_date" <="#));
    assert!(sql.contains(r#""posts"."is_published" = TRUE"#));
    assert!(sql.contains(r#""posts"."category_id" IS NULL"#));
    assert!(sql.contains(r#""categories"."is_published" = TRUE"#));
}

#[test]
fn test_unrestricted_author_condition_sql() {
    let author_id = Uuid::new_v4();
    let sql = post::Entity::find()
        .filter(post_condition(&PostQuery::all().by_author(author_id)))
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""posts"."author_id" = "#));
    assert!(!sql.contains("is_published"));
}

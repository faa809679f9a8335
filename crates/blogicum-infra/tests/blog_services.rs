use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, Location, Post, User};
use blogicum_core::error::DomainError;
use blogicum_core::forms::{CommentForm, PostForm, UserForm};
use blogicum_core::ports::FixedClock;
use blogicum_core::service::{CommentService, PostService, ProfileService, Repositories};
use blogicum_infra::InMemoryStore;

struct Blog {
    now: DateTime<Utc>,
    repos: Repositories,
    posts: PostService,
    comments: CommentService,
    profiles: ProfileService,
}

impl Blog {
    fn new() -> Self {
        let now = Utc::now();
        let clock = Arc::new(FixedClock(now));
        let repos = InMemoryStore::new().repositories();

        Self {
            now,
            posts: PostService::new(repos.clone(), clock.clone()),
            comments: CommentService::new(repos.clone(), clock.clone()),
            profiles: ProfileService::new(repos.clone(), clock),
            repos,
        }
    }

    async fn user(&self, username: &str) -> User {
        let user = User::new(username.into(), format!("{username}@example.com"), "hash".into());
        self.repos.users.save(user).await.unwrap()
    }

    async fn category(&self, slug: &str, published: bool) -> Category {
        let mut category = Category::new(slug.to_uppercase(), "About things", slug);
        category.is_published = published;
        self.repos.categories.save(category).await.unwrap()
    }

    async fn post(&self, author: &User, title: &str, offset: TimeDelta) -> Post {
        let post = Post::new(author.id, title.into(), "Body".into(), self.now + offset);
        self.repos.posts.save(post).await.unwrap()
    }

    async fn post_in(&self, author: &User, category: &Category, offset: TimeDelta) -> Post {
        let mut post = Post::new(author.id, "Filed".into(), "Body".into(), self.now + offset);
        post.category_id = Some(category.id);
        self.repos.posts.save(post).await.unwrap()
    }
}

fn ago(hours: i64) -> TimeDelta {
    TimeDelta::hours(-hours)
}

fn form(title: &str) -> PostForm {
    PostForm {
        title: title.into(),
        text: "Some text".into(),
        pub_date: "2020-01-01T10:00:00Z".into(),
        ..PostForm::default()
    }
}

#[tokio::test]
async fn future_post_only_shows_on_authors_own_profile() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let reader = blog.user("reader").await;
    let travel = blog.category("travel", true).await;
    let scheduled = blog.post_in(&author, &travel, TimeDelta::days(2)).await;

    let feed = blog.posts.feed(1).await.unwrap();
    assert!(feed.items.iter().all(|v| v.post.id != scheduled.id));

    let listing = blog.posts.category_posts("travel", 1).await.unwrap();
    assert!(listing.page.items.is_empty());

    let own = blog
        .profiles
        .profile("author", Some(author.id), 1)
        .await
        .unwrap();
    assert_eq!(own.page.items.len(), 1);
    assert_eq!(own.page.items[0].post.id, scheduled.id);

    let seen_by_reader = blog
        .profiles
        .profile("author", Some(reader.id), 1)
        .await
        .unwrap();
    assert!(seen_by_reader.page.items.is_empty());
}

#[tokio::test]
async fn unpublished_category_hides_its_posts() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let hidden = blog.category("hidden", false).await;
    let open = blog.category("open", true).await;
    let hidden_post = blog.post_in(&author, &hidden, ago(1)).await;
    let open_post = blog.post_in(&author, &open, ago(1)).await;
    let plain_post = blog.post(&author, "no category", ago(1)).await;

    let feed = blog.posts.feed(1).await.unwrap();
    let ids: Vec<Uuid> = feed.items.iter().map(|v| v.post.id).collect();
    assert!(!ids.contains(&hidden_post.id));
    assert!(ids.contains(&open_post.id));
    assert!(ids.contains(&plain_post.id));

    let err = blog.posts.category_posts("hidden", 1).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = blog.posts.detail(hidden_post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn feed_paginates_by_ten_newest_first() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    for hour in 1..=25 {
        blog.post(&author, &format!("post {hour}"), ago(hour)).await;
    }

    let first = blog.posts.feed(1).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert!(first.has_next);
    assert_eq!(first.items[0].post.title, "post 1");

    let third = blog.posts.feed(3).await.unwrap();
    assert_eq!(third.items.len(), 5);
    assert!(!third.has_next);
    assert!(third.has_previous);

    let clamped = blog.posts.feed(42).await.unwrap();
    assert_eq!(clamped.number, 3);
}

#[tokio::test]
async fn stranger_cannot_delete_or_edit_post() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let stranger = blog.user("stranger").await;
    let post = blog.post(&author, "mine", ago(1)).await;

    let err = blog.posts.delete(stranger.id, post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotAuthor { post_id } if post_id == post.id));
    assert!(blog.repos.posts.find_by_id(post.id).await.unwrap().is_some());

    let err = blog
        .posts
        .update(stranger.id, post.id, form("hijacked"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotAuthor { .. }));
    let stored = blog.repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "mine");
}

#[tokio::test]
async fn author_edits_and_deletes_own_post() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let created = blog.posts.create(author.id, form("draft")).await.unwrap();
    assert_eq!(created.author_id, author.id);

    let updated = blog
        .posts
        .update(author.id, created.id, form("final"))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "final");

    blog.posts.delete(author.id, created.id).await.unwrap();
    assert!(blog.repos.posts.find_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn invalid_post_form_writes_nothing() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let bad = PostForm {
        category_id: Some(Uuid::new_v4()),
        ..PostForm::default()
    };

    let err = blog.posts.create(author.id, bad).await.unwrap_err();
    let DomainError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.len(), 4);

    let own = blog
        .profiles
        .profile("author", Some(author.id), 1)
        .await
        .unwrap();
    assert_eq!(own.page.total_items, 0);
}

#[tokio::test]
async fn comments_come_back_oldest_first() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let post = blog.post(&author, "talk", ago(1)).await;

    for (minutes, text) in [(5, "third"), (1, "first"), (3, "second")] {
        let mut comment = Comment::new(post.id, author.id, text.into());
        comment.created_at = blog.now - TimeDelta::minutes(10 - minutes);
        blog.repos.comments.save(comment).await.unwrap();
    }

    let detail = blog.posts.detail(post.id).await.unwrap();
    let texts: Vec<&str> = detail
        .comments
        .iter()
        .map(|c| c.comment.text.as_str())
        .collect();
    assert_eq!(texts, ["first", "second", "third"]);
    assert_eq!(detail.post.comment_count, 3);
}

#[tokio::test]
async fn comment_is_attached_to_post_and_current_user() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let reader = blog.user("reader").await;
    let post = blog.post(&author, "talk", ago(1)).await;

    let comment = blog
        .comments
        .add(reader.id, post.id, CommentForm { text: "Hi!".into() })
        .await
        .unwrap();

    assert_eq!(comment.post_id, post.id);
    assert_eq!(comment.author_id, reader.id);
}

#[tokio::test]
async fn hidden_post_rejects_comments_from_others() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let reader = blog.user("reader").await;
    let scheduled = blog.post(&author, "soon", TimeDelta::days(1)).await;

    let err = blog
        .comments
        .add(reader.id, scheduled.id, CommentForm { text: "early".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    assert!(
        blog.comments
            .add(author.id, scheduled.id, CommentForm { text: "note".into() })
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn comment_guard_and_post_scoping() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let stranger = blog.user("stranger").await;
    let post = blog.post(&author, "talk", ago(1)).await;
    let other = blog.post(&author, "other", ago(2)).await;
    let comment = blog
        .comments
        .add(author.id, post.id, CommentForm { text: "mine".into() })
        .await
        .unwrap();

    let err = blog
        .comments
        .delete(stranger.id, post.id, comment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotAuthor { post_id } if post_id == post.id));

    let err = blog
        .comments
        .update(author.id, other.id, comment.id, CommentForm { text: "moved".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let edited = blog
        .comments
        .update(author.id, post.id, comment.id, CommentForm { text: "edited".into() })
        .await
        .unwrap();
    assert_eq!(edited.text, "edited");

    blog.comments.delete(author.id, post.id, comment.id).await.unwrap();
    assert!(blog.repos.comments.find_by_id(comment.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_post_removes_its_comments() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let post = blog.post(&author, "talk", ago(1)).await;
    let comment = Comment::new(post.id, author.id, "bye".into());
    let comment = blog.repos.comments.save(comment).await.unwrap();

    blog.posts.delete(author.id, post.id).await.unwrap();

    assert!(blog.repos.comments.find_by_id(comment.id).await.unwrap().is_none());
    assert!(blog.repos.comments.find_by_post(post.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_location_or_category_keeps_posts() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let location = blog.repos.locations.save(Location::new("Lisbon")).await.unwrap();
    let category = blog.category("travel", true).await;

    let mut post = Post::new(author.id, "trip".into(), "Body".into(), blog.now + ago(1));
    post.location_id = Some(location.id);
    post.category_id = Some(category.id);
    let post = blog.repos.posts.save(post).await.unwrap();

    blog.repos.locations.delete(location.id).await.unwrap();
    blog.repos.categories.delete(category.id).await.unwrap();

    let stored = blog.repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.location_id, None);
    assert_eq!(stored.category_id, None);
    assert!(blog.posts.detail(post.id).await.is_ok());
}

#[tokio::test]
async fn deleting_user_removes_their_posts_and_comments() {
    let blog = Blog::new();
    let author = blog.user("author").await;
    let reader = blog.user("reader").await;
    let authors_post = blog.post(&author, "a", ago(1)).await;
    let readers_post = blog.post(&reader, "r", ago(1)).await;
    let on_readers_post = Comment::new(readers_post.id, author.id, "x".into());
    let on_authors_post = Comment::new(authors_post.id, reader.id, "y".into());
    let on_readers_post = blog.repos.comments.save(on_readers_post).await.unwrap();
    let on_authors_post = blog.repos.comments.save(on_authors_post).await.unwrap();

    blog.repos.users.delete(author.id).await.unwrap();

    assert!(blog.repos.posts.find_by_id(authors_post.id).await.unwrap().is_none());
    assert!(blog.repos.posts.find_by_id(readers_post.id).await.unwrap().is_some());
    assert!(blog.repos.comments.find_by_id(on_readers_post.id).await.unwrap().is_none());
    assert!(blog.repos.comments.find_by_id(on_authors_post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn profile_edit_keeps_usernames_unique() {
    let blog = Blog::new();
    let alice = blog.user("alice").await;
    blog.user("bob").await;

    let err = blog
        .profiles
        .update(
            alice.id,
            UserForm {
                username: "bob".into(),
                ..UserForm::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let updated = blog
        .profiles
        .update(
            alice.id,
            UserForm {
                username: "alice".into(),
                first_name: "Alice".into(),
                last_name: "Liddell".into(),
                email: "alice@wonder.land".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Alice");
    assert_eq!(updated.email, "alice@wonder.land");
}

#[tokio::test]
async fn unknown_profile_is_not_found() {
    let blog = Blog::new();

    let err = blog.profiles.profile("ghost", None, 1).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

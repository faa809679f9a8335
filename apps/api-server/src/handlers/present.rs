//! Core types to response DTOs.

use blogicum_core::Page;
use blogicum_core::domain::{Category, CommentView, Location, PostView, User};
use blogicum_shared::dto::{
    CategoryResponse, CommentResponse, LocationResponse, PageResponse, PostResponse, UserResponse,
};

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        date_joined: user.created_at,
    }
}

pub fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title,
        description: category.description,
        slug: category.slug,
    }
}

pub fn location(location: Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name,
    }
}

pub fn post(view: PostView) -> PostResponse {
    let PostView {
        post,
        author_username,
        category: post_category,
        location: post_location,
        comment_count,
    } = view;

    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        author: author_username,
        category: post_category.map(category),
        location: post_location.map(location),
        image: post.image,
        is_published: post.is_published,
        created_at: post.created_at,
        comment_count,
    }
}

pub fn comment(view: CommentView) -> CommentResponse {
    CommentResponse {
        id: view.comment.id,
        post_id: view.comment.post_id,
        author: view.author_username,
        text: view.comment.text,
        created_at: view.comment.created_at,
    }
}

pub fn page<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageResponse<U> {
    let page = page.map(f);
    PageResponse {
        object_list: page.items,
        number: page.number,
        num_pages: page.total_pages,
        count: page.total_items,
        has_next: page.has_next,
        has_previous: page.has_previous,
    }
}

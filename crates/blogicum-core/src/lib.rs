//! # Blogicum Core
//!
//! The domain layer of Blogicum.
//! Entities, the post visibility rules, pagination, the author guard and the
//! blog services live here, with zero infrastructure dependencies.

pub mod access;
pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod service;
pub mod visibility;

pub use access::{AccessGuard, Authored};
pub use error::{DomainError, RepoError};
pub use pagination::{POSTS_PER_PAGE, Page, Paginator};
pub use visibility::{PostQuery, Visibility};

//! SeaORM entities mirroring the schema in the `migration` crate.

pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod user;

//! Persistence operations, one module per entity.
//!
//! Every function takes any [`sea_orm::ConnectionTrait`] so callers can run
//! it on the pool or inside a transaction. Stores hold no state between
//! calls; mutations always re-read the row first.

pub mod blog_post;
pub mod category;
pub mod image;

pub mod blog_post;
pub mod category;
pub mod image;
pub mod shared;

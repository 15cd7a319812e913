pub mod blog_image;
pub mod blog_post;
pub mod blog_post_category;
pub mod category;

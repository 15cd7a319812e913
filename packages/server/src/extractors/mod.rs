pub mod json;
pub mod origin;
pub mod path;

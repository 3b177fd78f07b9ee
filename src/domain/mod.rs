pub mod comment;
pub mod product;
pub mod user;

pub mod comment;
pub mod movie;

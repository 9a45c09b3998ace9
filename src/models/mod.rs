pub mod comment;
pub mod manager;
pub mod task;
pub mod user;

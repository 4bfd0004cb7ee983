pub mod admin;
pub mod attachment;
pub mod auth;
pub mod category;
pub mod choices;
pub mod comment;
pub mod logs;
pub mod project;

//! Row models and DTOs, one module per table.

pub mod application_log;
pub mod attachment;
pub mod category;
pub mod project;
pub mod project_comment;
pub mod user;

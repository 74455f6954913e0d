//! Todo items, their authors and the workspace that owns them.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::TodoItemService;

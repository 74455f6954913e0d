//! Workspaces and the todo items they own.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::WorkspaceService;

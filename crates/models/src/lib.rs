//! sea-orm entities for the todo schema plus model-level validation.
//!
//! Tables: `workspaces`, `authors`, `todo_items` (nullable `workspace_id`) and the
//! `author_todoitem` join table. Every mutable row carries a `version` token used
//! for optimistic concurrency by the service layer.

pub mod errors;
pub mod db;
pub mod workspace;
pub mod author;
pub mod todo_item;
pub mod author_todo_item;

#[cfg(test)]
mod tests;

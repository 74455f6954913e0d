//! Service layer: generic FindMany querying, versioned CRUD and relation management
//! for authors, todo items and workspaces.
//! - Entity definitions and field validation live in the `models` crate.
//! - Every operation takes an explicit store handle; mutations run in one transaction.

pub mod errors;
mod patch;
pub mod query;
pub mod repository;
pub mod relation;
pub mod author;
pub mod todo_item;
pub mod workspace;
#[cfg(test)]
pub mod test_support;

pub use author::AuthorService;
pub use todo_item::TodoItemService;
pub use workspace::WorkspaceService;

//! Authors and the todo items they contribute to.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::AuthorService;

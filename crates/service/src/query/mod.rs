//! Declarative FindMany specifications and their translation into sea-orm selects.
//!
//! A [`FindMany`] bundles a `where` predicate tree, an ordered `sortBy` list and
//! `skip`/`take` pagination. [`translate`] turns it into a `Select<E>` for any entity
//! implementing [`Filterable`], which is where each entity names its filterable
//! fields and relation scopes.

mod find_many;
mod translate;

pub use find_many::{Comparison, FilterValue, FindMany, SortBy, SortDirection, Where};
pub use translate::{condition, translate, Field, FieldKind, Filterable};

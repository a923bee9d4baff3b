//! Core abstractions shared by the seeding and migration layers.
//!
//! - [`traits`]: the [`Connection`](traits::Connection) and
//!   [`SchemaInfo`](traits::SchemaInfo) collaborator traits
//! - [`value`]: database-agnostic row and value types
//! - [`identifier`]: identifier validation and quoting

pub mod identifier;
pub mod traits;
pub mod value;

pub use traits::{BoundColumn, Connection, SchemaInfo};
pub use value::{Row, SqlNullType, SqlValue};

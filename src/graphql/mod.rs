//! GraphQL API for the Postboard backend
//!
//! This module provides the GraphQL API using async-graphql: queries and
//! mutations over the Post entity. This is the single API surface of the
//! backend.

mod helpers;
mod schema;
pub mod types;

pub use schema::{PostboardSchema, build_schema};

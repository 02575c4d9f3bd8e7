//! REST endpoints that live outside the GraphQL schema

pub mod health;

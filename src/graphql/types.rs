//! GraphQL type definitions
//!
//! These types mirror the domain records but are decorated with async-graphql attributes.

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

/// A post authored by a user
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Post {
    /// Unique post ID
    pub id: String,
    /// Post title
    pub title: Option<String>,
    /// Author username
    pub username: Option<String>,
}

/// Input for editing an existing post
#[derive(Debug, Clone, InputObject)]
pub struct EditPostInput {
    /// ID of the post to edit
    pub id: String,
    /// New title; an empty or omitted title keeps the stored one
    pub title: Option<String>,
    /// New username; an empty or omitted username keeps the stored one
    pub username: Option<String>,
}

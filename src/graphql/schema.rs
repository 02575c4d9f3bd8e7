//! GraphQL schema definition with queries and mutations
//!
//! This is the single API surface for the Postboard backend.

use async_graphql::{Context, EmptySubscription, Object, Result, Schema};
use uuid::Uuid;

use crate::db::{CreatePost, Database, UpdatePost};

use super::helpers::{non_empty, post_record_to_graphql};
use super::types::{EditPostInput, Post};

/// The GraphQL schema type
pub type PostboardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database) -> PostboardSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .finish()
}

// ============================================================================
// Query Root
// ============================================================================

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get all posts
    async fn get_all_posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let db = ctx.data_unchecked::<Database>();

        let records = db
            .posts()
            .list()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(records.into_iter().map(post_record_to_graphql).collect())
    }

    /// Get a specific post by ID
    async fn get_post_by_id(&self, ctx: &Context<'_>, id: String) -> Result<Post> {
        let db = ctx.data_unchecked::<Database>();
        let post_id = Uuid::parse_str(&id)
            .map_err(|e| async_graphql::Error::new(format!("Invalid post ID: {}", e)))?;

        let record = db
            .posts()
            .get_by_id(post_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| async_graphql::Error::new(format!("Post with id {} not found", id)))?;

        Ok(post_record_to_graphql(record))
    }
}

// ============================================================================
// Mutation Root
// ============================================================================

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new post
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: Option<String>,
        username: Option<String>,
    ) -> Result<Post> {
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .posts()
            .create(CreatePost { title, username })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        tracing::debug!(post_id = %record.id, "Post created");

        Ok(post_record_to_graphql(record))
    }

    /// Delete a post by ID
    async fn delete_post(&self, ctx: &Context<'_>, id: String) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        let post_id = Uuid::parse_str(&id)
            .map_err(|e| async_graphql::Error::new(format!("Invalid post ID: {}", e)))?;

        let deleted = db
            .posts()
            .delete(post_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        if !deleted {
            return Err(async_graphql::Error::new(format!(
                "Post with id {} not found",
                id
            )));
        }

        tracing::debug!(post_id = %id, "Post deleted");

        Ok(true)
    }

    /// Edit a post. Empty or omitted fields keep their stored values.
    async fn edit_post(&self, ctx: &Context<'_>, post: EditPostInput) -> Result<Post> {
        let db = ctx.data_unchecked::<Database>();
        let post_id = Uuid::parse_str(&post.id)
            .map_err(|e| async_graphql::Error::new(format!("Invalid post ID: {}", e)))?;

        let record = db
            .posts()
            .update(
                post_id,
                UpdatePost {
                    title: non_empty(post.title),
                    username: non_empty(post.username),
                },
            )
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| {
                async_graphql::Error::new(format!("Post with id {} not found", post.id))
            })?;

        Ok(post_record_to_graphql(record))
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use serde_json::Value;

    use super::*;

    // A single connection keeps the in-memory database alive and shared.
    async fn test_schema() -> PostboardSchema {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let db = Database::new(pool);
        db.migrate().await.unwrap();
        build_schema(db)
    }

    async fn exec(schema: &PostboardSchema, query: &str) -> Value {
        let resp = schema.execute(query).await;
        assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
        resp.data.into_json().unwrap()
    }

    async fn exec_err(schema: &PostboardSchema, query: &str) -> String {
        let resp = schema.execute(query).await;
        assert!(!resp.errors.is_empty(), "expected an error");
        resp.errors[0].message.clone()
    }

    async fn create_post(schema: &PostboardSchema, title: &str, username: &str) -> String {
        let data = exec(
            schema,
            &format!(
                r#"mutation {{ createPost(title: "{title}", username: "{username}") {{ id }} }}"#
            ),
        )
        .await;
        data["createPost"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_schema_exposes_the_crud_contract() {
        let schema = test_schema().await;
        let sdl = schema.sdl();

        assert!(sdl.contains("getAllPosts"));
        assert!(sdl.contains("getPostById(id: String!)"));
        assert!(sdl.contains("createPost(title: String, username: String)"));
        assert!(sdl.contains("deletePost(id: String!)"));
        assert!(sdl.contains("input EditPostInput"));
    }

    #[tokio::test]
    async fn test_create_then_fetch_by_id() {
        let schema = test_schema().await;
        let id = create_post(&schema, "Hello", "alice").await;
        assert!(!id.is_empty());

        let data = exec(
            &schema,
            &format!(r#"{{ getPostById(id: "{id}") {{ id title username }} }}"#),
        )
        .await;

        assert_eq!(data["getPostById"]["id"], id);
        assert_eq!(data["getPostById"]["title"], "Hello");
        assert_eq!(data["getPostById"]["username"], "alice");
    }

    #[tokio::test]
    async fn test_create_without_fields() {
        let schema = test_schema().await;

        let data = exec(&schema, "mutation { createPost { id title username } }").await;
        assert!(data["createPost"]["id"].as_str().is_some());
        assert_eq!(data["createPost"]["title"], Value::Null);
        assert_eq!(data["createPost"]["username"], Value::Null);
    }

    #[tokio::test]
    async fn test_delete_then_fetch_fails() {
        let schema = test_schema().await;
        let id = create_post(&schema, "Hello", "alice").await;

        let data = exec(&schema, &format!(r#"mutation {{ deletePost(id: "{id}") }}"#)).await;
        assert_eq!(data["deletePost"], true);

        let message = exec_err(&schema, &format!(r#"{{ getPostById(id: "{id}") {{ id }} }}"#)).await;
        assert!(message.contains("not found"), "{message}");
    }

    #[tokio::test]
    async fn test_edit_merges_by_truthiness() {
        let schema = test_schema().await;
        let id = create_post(&schema, "Hello", "alice").await;

        // Only title supplied: username is retained
        let data = exec(
            &schema,
            &format!(
                r#"mutation {{ editPost(post: {{id: "{id}", title: "World"}}) {{ title username }} }}"#
            ),
        )
        .await;
        assert_eq!(data["editPost"]["title"], "World");
        assert_eq!(data["editPost"]["username"], "alice");

        // Only username supplied: title is retained
        let data = exec(
            &schema,
            &format!(
                r#"mutation {{ editPost(post: {{id: "{id}", username: "bob"}}) {{ title username }} }}"#
            ),
        )
        .await;
        assert_eq!(data["editPost"]["title"], "World");
        assert_eq!(data["editPost"]["username"], "bob");

        // Empty string counts as "not supplied"
        let data = exec(
            &schema,
            &format!(
                r#"mutation {{ editPost(post: {{id: "{id}", title: ""}}) {{ title username }} }}"#
            ),
        )
        .await;
        assert_eq!(data["editPost"]["title"], "World");
        assert_eq!(data["editPost"]["username"], "bob");
    }

    #[tokio::test]
    async fn test_edit_missing_post_fails_without_side_effects() {
        let schema = test_schema().await;
        let id = create_post(&schema, "Hello", "alice").await;

        let message = exec_err(
            &schema,
            &format!(
                r#"mutation {{ editPost(post: {{id: "{}", title: "Hijacked"}}) {{ id }} }}"#,
                Uuid::new_v4()
            ),
        )
        .await;
        assert!(message.contains("not found"), "{message}");

        // The existing post is untouched
        let data = exec(
            &schema,
            &format!(r#"{{ getPostById(id: "{id}") {{ title }} }}"#),
        )
        .await;
        assert_eq!(data["getPostById"]["title"], "Hello");
    }

    #[tokio::test]
    async fn test_delete_missing_post_fails() {
        let schema = test_schema().await;

        let message = exec_err(
            &schema,
            &format!(r#"mutation {{ deletePost(id: "{}") }}"#, Uuid::new_v4()),
        )
        .await;
        assert!(message.contains("not found"), "{message}");
    }

    #[tokio::test]
    async fn test_invalid_id_is_rejected() {
        let schema = test_schema().await;

        let message = exec_err(&schema, r#"{ getPostById(id: "not-a-uuid") { id } }"#).await;
        assert!(message.contains("Invalid post ID"), "{message}");
    }

    #[tokio::test]
    async fn test_get_all_posts_tracks_creates_and_deletes() {
        let schema = test_schema().await;

        let data = exec(&schema, "{ getAllPosts { id } }").await;
        assert_eq!(data["getAllPosts"].as_array().unwrap().len(), 0);

        let a = create_post(&schema, "first", "alice").await;
        let _b = create_post(&schema, "second", "bob").await;
        let _c = create_post(&schema, "third", "carol").await;

        let data = exec(&schema, "{ getAllPosts { id } }").await;
        assert_eq!(data["getAllPosts"].as_array().unwrap().len(), 3);

        exec(&schema, &format!(r#"mutation {{ deletePost(id: "{a}") }}"#)).await;

        let data = exec(&schema, "{ getAllPosts { id } }").await;
        assert_eq!(data["getAllPosts"].as_array().unwrap().len(), 2);
    }
}

// Helper functions shared across GraphQL resolvers.

use crate::db::PostRecord;
use crate::graphql::types::Post;

/// Convert a PostRecord from the database to a GraphQL Post type
pub(crate) fn post_record_to_graphql(r: PostRecord) -> Post {
    Post {
        id: r.id.to_string(),
        title: r.title,
        username: r.username,
    }
}

/// Treat an empty string as "not supplied".
///
/// `editPost` merges by truthiness: a client cannot set a field to the empty
/// string, it can only replace the stored value with a non-empty one.
pub(crate) fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(
            non_empty(Some("World".to_string())),
            Some("World".to_string())
        );
    }
}

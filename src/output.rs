//! Rendering of stored author records for stdout.

use crate::model::StoredAuthor;

/// Renders `author` as pretty-printed JSON with `_id` as a string.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
pub fn render_author(author: &StoredAuthor) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(author)
}

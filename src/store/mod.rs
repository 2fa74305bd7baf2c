//! Record store for author profile documents.
//!
//! Author records are stored as JSON documents in the `authors` table, keyed
//! by a store-minted id and indexed by name. Documents are validated at this
//! boundary: a row that does not deserialize into an [`AuthorProfile`] is
//! reported as [`StoreError::Corrupt`] rather than handed to callers.
//!
//! # Example
//!
//! ```no_run
//! use author_profiler::store::{RecordStore, SqliteRecordStore};
//! use author_profiler::Database;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(Path::new("author-profiler.db")).await?;
//! let store = SqliteRecordStore::new(db);
//! if let Some(author) = store.find_by_name("Jane Doe").await? {
//!     println!("{}", author.id);
//! }
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::{StoreDbErrorKind, StoreError};

use async_trait::async_trait;
use sqlx::Row;
use tracing::{debug, instrument};

use crate::db::Database;
use crate::model::{AuthorProfile, StoreId, StoredAuthor};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Data-access contract for author records.
///
/// Lookups are exact-match on name. Names are not unique; when several rows
/// share a name the oldest one wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the record stored under `name`, if any.
    async fn find_by_name(&self, name: &str) -> Result<Option<StoredAuthor>>;

    /// Stores a new record and returns its minted id.
    async fn insert(&self, profile: &AuthorProfile) -> Result<StoreId>;

    /// Replaces the whole record with `id`, keeping the id.
    async fn update_by_id(&self, id: StoreId, profile: &AuthorProfile) -> Result<()>;
}

/// `SQLite`-backed [`RecordStore`].
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    db: Database,
}

impl SqliteRecordStore {
    /// Creates a store over the given database connection.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn encode_document(profile: &AuthorProfile) -> Result<String> {
    serde_json::to_string(profile).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode_document(id: i64, document: &str) -> Result<StoredAuthor> {
    let profile: AuthorProfile =
        serde_json::from_str(document).map_err(|e| StoreError::Corrupt {
            id,
            reason: e.to_string(),
        })?;
    Ok(StoredAuthor {
        id: StoreId::new(id),
        profile,
    })
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<StoredAuthor>> {
        let row = sqlx::query(r"SELECT id, document FROM authors WHERE name = ? ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(self.db.pool())
            .await?;

        let Some(row) = row else {
            debug!("no stored record");
            return Ok(None);
        };

        let id: i64 = row.get("id");
        let document: String = row.get("document");
        decode_document(id, &document).map(Some)
    }

    #[instrument(skip(self, profile), fields(name = %profile.name))]
    async fn insert(&self, profile: &AuthorProfile) -> Result<StoreId> {
        let document = encode_document(profile)?;

        let row = sqlx::query(r"INSERT INTO authors (name, document) VALUES (?, ?) RETURNING id")
            .bind(&profile.name)
            .bind(document)
            .fetch_one(self.db.pool())
            .await?;

        let id = StoreId::new(row.get("id"));
        debug!(%id, "record inserted");
        Ok(id)
    }

    #[instrument(skip(self, profile), fields(name = %profile.name))]
    async fn update_by_id(&self, id: StoreId, profile: &AuthorProfile) -> Result<()> {
        let document = encode_document(profile)?;

        let result = sqlx::query(
            r"UPDATE authors
              SET name = ?, document = ?, updated_at = datetime('now')
              WHERE id = ?",
        )
        .bind(&profile.name)
        .bind(document)
        .bind(id.get())
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.get()));
        }
        debug!(%id, "record replaced");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Publication, PublicationSource};

    async fn setup_store() -> SqliteRecordStore {
        let db = Database::new_in_memory().await.unwrap();
        SqliteRecordStore::new(db)
    }

    fn sample_profile(name: &str) -> AuthorProfile {
        let mut profile = AuthorProfile::new(name);
        profile.affiliation = Some("Example University".to_string());
        profile.interests = vec!["privacy".to_string()];
        profile.citations = Some(42);
        profile.publications = vec![
            Publication::new("Graph Neural Networks", PublicationSource::Profile)
                .with_year("2021")
                .with_citations(12),
        ];
        profile
    }

    #[tokio::test]
    async fn test_find_by_name_missing_returns_none() {
        let store = setup_store().await;
        assert!(store.find_by_name("Nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trips_profile() {
        let store = setup_store().await;
        let profile = sample_profile("Jane Doe");

        let id = store.insert(&profile).await.unwrap();
        let found = store.find_by_name("Jane Doe").await.unwrap().unwrap();

        assert_eq!(found.id, id);
        assert_eq!(found.profile, profile);
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact_match() {
        let store = setup_store().await;
        store.insert(&sample_profile("Jane Doe")).await.unwrap();

        assert!(store.find_by_name("jane doe").await.unwrap().is_none());
        assert!(store.find_by_name("Jane").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_mints_distinct_ids() {
        let store = setup_store().await;
        let first = store.insert(&sample_profile("A")).await.unwrap();
        let second = store.insert(&sample_profile("B")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_update_by_id_replaces_document_and_keeps_id() {
        let store = setup_store().await;
        let id = store.insert(&sample_profile("Jane Doe")).await.unwrap();

        let mut replacement = AuthorProfile::new("Jane Doe");
        replacement.interests = vec!["databases".to_string()];
        store.update_by_id(id, &replacement).await.unwrap();

        let found = store.find_by_name("Jane Doe").await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.profile, replacement);
        assert_eq!(found.profile.affiliation, None);
        assert!(found.profile.publications.is_empty());
    }

    #[tokio::test]
    async fn test_update_by_id_can_rename_record() {
        let store = setup_store().await;
        let id = store.insert(&sample_profile("J. Doe")).await.unwrap();

        store
            .update_by_id(id, &sample_profile("Jane Doe"))
            .await
            .unwrap();

        assert!(store.find_by_name("J. Doe").await.unwrap().is_none());
        assert_eq!(
            store.find_by_name("Jane Doe").await.unwrap().unwrap().id,
            id
        );
    }

    #[tokio::test]
    async fn test_update_by_id_missing_is_not_found() {
        let store = setup_store().await;
        let err = store
            .update_by_id(StoreId::new(999), &sample_profile("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_find_by_name_duplicate_names_returns_oldest() {
        let store = setup_store().await;
        let first = store.insert(&sample_profile("Jane Doe")).await.unwrap();
        store.insert(&sample_profile("Jane Doe")).await.unwrap();

        let found = store.find_by_name("Jane Doe").await.unwrap().unwrap();
        assert_eq!(found.id, first);
    }

    #[tokio::test]
    async fn test_find_by_name_corrupt_document() {
        let store = setup_store().await;
        sqlx::query("INSERT INTO authors (name, document) VALUES ('Broken', '{not json')")
            .execute(store.db.pool())
            .await
            .unwrap();

        let err = store.find_by_name("Broken").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_find_by_name_reads_sentinel_document() {
        let store = setup_store().await;
        let document = serde_json::json!({
            "Name": "Legacy Author",
            "Affiliation": "N/A",
            "Interests": ["privacy"],
            "Citations": "N/A",
            "H-index": 3,
            "i10-index": "N/A",
            "Publications": [
                {"Title": "Old Paper", "Year": "N/A", "Journal": "N/A", "Citations": "N/A", "Source": "DBLP"}
            ]
        })
        .to_string();
        sqlx::query("INSERT INTO authors (name, document) VALUES ('Legacy Author', ?)")
            .bind(document)
            .execute(store.db.pool())
            .await
            .unwrap();

        let found = store.find_by_name("Legacy Author").await.unwrap().unwrap();
        assert_eq!(found.profile.affiliation, None);
        assert_eq!(found.profile.h_index, Some(3));
        assert_eq!(
            found.profile.publications[0].source,
            PublicationSource::Index
        );
    }
}

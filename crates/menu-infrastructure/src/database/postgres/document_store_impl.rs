// ============================================================================
// Menu Infrastructure - PostgreSQL Document Store
// File: crates/menu-infrastructure/src/database/postgres/document_store_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info};

use menu_core::error::StoreError;
use menu_core::repositories::{Document, DocumentStore, Fields};
use menu_shared::types::{new_document_id, DocumentId};

/// Every document kind lives in one JSONB table. `seq` keeps insertion order
/// so `list` returns documents in store order.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `documents` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq BIGSERIAL,
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                fields JSONB NOT NULL DEFAULT '{}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ,
                PRIMARY KEY (kind, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("creating documents table", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_kind_seq ON documents (kind, seq)")
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("creating documents index", e))?;

        info!("Document store schema ready");
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    fields: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id, row.fields.0)
    }
}

fn db_error(action: &str, e: sqlx::Error) -> StoreError {
    error!("Database error {}: {}", action, e);
    StoreError::Transport(e.to_string())
}

fn not_found(kind: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        kind: kind.to_string(),
        id: id.to_string(),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, kind: &str) -> Result<Vec<Document>, StoreError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, fields
            FROM documents
            WHERE kind = $1
            ORDER BY seq
            "#,
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing documents", e))?;

        debug!("Listed {} documents of kind {}", rows.len(), kind);
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn create(&self, kind: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        let id = new_document_id();

        sqlx::query("INSERT INTO documents (kind, id, fields) VALUES ($1, $2, $3)")
            .bind(kind)
            .bind(&id)
            .bind(Json(&fields))
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("creating document", e))?;

        Ok(id)
    }

    async fn update(&self, kind: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET fields = fields || $3, updated_at = NOW()
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(kind)
        .bind(id)
        .bind(Json(&fields))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("updating document", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(kind, id));
        }
        Ok(())
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE kind = $1 AND id = $2")
            .bind(kind)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting document", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(kind, id));
        }
        Ok(())
    }

    async fn batch_update(
        &self,
        kind: &str,
        updates: Vec<(DocumentId, Fields)>,
    ) -> Result<(), StoreError> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting batch", e))?;

        for (id, fields) in &updates {
            let result = sqlx::query(
                r#"
                UPDATE documents
                SET fields = fields || $3, updated_at = NOW()
                WHERE kind = $1 AND id = $2
                "#,
            )
            .bind(kind)
            .bind(id)
            .bind(Json(fields))
            .execute(&mut *transaction)
            .await
            .map_err(|e| db_error("updating document in batch", e))?;

            if result.rows_affected() == 0 {
                transaction
                    .rollback()
                    .await
                    .map_err(|e| db_error("rolling back batch", e))?;
                return Err(not_found(kind, id));
            }
        }

        transaction
            .commit()
            .await
            .map_err(|e| db_error("committing batch", e))?;

        debug!("Batch updated {} documents of kind {}", updates.len(), kind);
        Ok(())
    }
}

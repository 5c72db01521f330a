//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use notekeep_core::{Error, Folder, FolderRepository, Result};

/// PostgreSQL implementation of FolderRepository.
pub struct PgFolderRepository {
    pool: Pool<Postgres>,
}

impl PgFolderRepository {
    /// Create a new PgFolderRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn list(&self) -> Result<Vec<Folder>> {
        let rows = sqlx::query("SELECT id, name FROM folders ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| Folder {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Folder>> {
        let row = sqlx::query("SELECT id, name FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(|r| Folder {
            id: r.get("id"),
            name: r.get("name"),
        }))
    }

    async fn create(&self, name: &str) -> Result<Folder> {
        let row = sqlx::query("INSERT INTO folders (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(Folder {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    async fn update(&self, id: i64, name: &str) -> Result<Folder> {
        let row = sqlx::query("UPDATE folders SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(|r| Folder {
            id: r.get("id"),
            name: r.get("name"),
        })
        .ok_or_else(|| Error::NotFound(format!("folder {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // Notes in the folder are kept; folder_id falls back to NULL via
        // ON DELETE SET NULL. Deleting an absent id is a no-op.
        sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

//! # notekeep-db
//!
//! PostgreSQL database layer for notekeep.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for notes, folders, and tags
//! - Hydration of flat join rows into nested note objects
//!
//! ## Example
//!
//! ```rust,ignore
//! use notekeep_db::{CreateNoteRequest, Database, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/notekeep").await?;
//!
//!     let note = db.notes.create(CreateNoteRequest {
//!         title: "Hello, world!".to_string(),
//!         content: None,
//!         folder_id: None,
//!         tags: vec![],
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```
pub mod folders;
pub mod hydration;
pub mod notes;
pub mod pool;
pub mod tags;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use notekeep_core::*;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// Re-export repository implementations
pub use folders::PgFolderRepository;
pub use hydration::{hydrate_notes, NoteRow};
pub use notes::PgNoteRepository;
pub use pool::{
    create_pool, create_pool_lazy, create_pool_with_config, log_pool_metrics, PoolConfig,
};
pub use tags::PgTagRepository;

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository for CRUD operations.
    pub notes: PgNoteRepository,
    /// Folder repository.
    pub folders: PgFolderRepository,
    /// Tag repository.
    pub tags: PgTagRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            folders: PgFolderRepository::new(pool.clone()),
            tags: PgTagRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Create without connecting; the pool dials on first use.
    pub fn connect_lazy(url: &str) -> Result<Self> {
        let pool = create_pool_lazy(url)?;
        Ok(Self::new(pool))
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passthrough() {
        assert_eq!(escape_like("cats"), "cats");
    }

    #[test]
    fn test_escape_like_percent() {
        assert_eq!(escape_like("100%"), "100\\%");
    }

    #[test]
    fn test_escape_like_underscore() {
        assert_eq!(escape_like("snake_case"), "snake\\_case");
    }

    #[test]
    fn test_escape_like_backslash_first() {
        // The backslash escape runs first so escapes are not double-escaped.
        assert_eq!(escape_like("\\%"), "\\\\\\%");
    }
}

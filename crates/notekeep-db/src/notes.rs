//! Note repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Transaction};
use tracing::debug;

use notekeep_core::{
    CreateNoteRequest, Error, ListNotesRequest, Note, NoteRepository, Result, UpdateNoteRequest,
};

use crate::escape_like;
use crate::hydration::{hydrate_notes, NoteRow};

/// Columns and joins shared by every note read.
///
/// One row per note and tag pairing; [`hydrate_notes`] folds them back up.
const NOTE_JOIN: &str = r#"
    SELECT n.id, n.title, n.content,
           f.id AS folder_id, f.name AS folder_name,
           t.id AS tag_id, t.name AS tag_name
    FROM notes n
    LEFT JOIN folders f ON f.id = n.folder_id
    LEFT JOIN notes_tags nt ON nt.note_id = n.id
    LEFT JOIN tags t ON t.id = nt.tag_id
"#;

/// A search term filters only when non-empty, matching query-string semantics
/// where `?searchTerm=` means "no filter".
fn effective_search_term(req: &ListNotesRequest) -> Option<&str> {
    req.search_term.as_deref().filter(|s| !s.is_empty())
}

/// Build the list SQL for the given filters.
///
/// Clause order fixes bind order: search term, then folder id, then tag id.
/// Note-id ordering is load-bearing (hydration groups rows by first
/// appearance); tag-id ordering makes each tag list deterministic.
fn build_list_query(req: &ListNotesRequest) -> String {
    let mut query = String::from(NOTE_JOIN);
    query.push_str("WHERE 1=1");
    let mut param_idx = 1;

    if effective_search_term(req).is_some() {
        query.push_str(&format!(" AND n.title LIKE ${} ESCAPE '\\'", param_idx));
        param_idx += 1;
    }
    if req.folder_id.is_some() {
        query.push_str(&format!(" AND n.folder_id = ${}", param_idx));
        param_idx += 1;
    }
    if req.tag_id.is_some() {
        query.push_str(&format!(" AND t.id = ${}", param_idx));
    }

    query.push_str(" ORDER BY n.id ASC, t.id ASC");
    query
}

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fetch a hydrated note within an existing transaction.
    ///
    /// Create and update re-read through this so the returned note reflects
    /// the statements of the same transaction, with folder and tag names
    /// resolved from one source of truth.
    pub async fn fetch_tx(&self, tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<Note> {
        let query = format!("{} WHERE n.id = $1 ORDER BY t.id ASC", NOTE_JOIN);
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_all(&mut **tx)
            .await
            .map_err(Error::Database)?;

        hydrate_notes(rows)
            .into_iter()
            .next()
            .ok_or(Error::NoteNotFound(id))
    }
}

/// Attach the given tag ids to a note.
///
/// Nonexistent tag ids surface as foreign key violations from the store.
async fn insert_note_tags(
    tx: &mut Transaction<'_, Postgres>,
    note_id: i64,
    tag_ids: &[i64],
) -> Result<()> {
    for tag_id in tag_ids {
        sqlx::query("INSERT INTO notes_tags (note_id, tag_id) VALUES ($1, $2)")
            .bind(note_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;
    }
    Ok(())
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self, req: ListNotesRequest) -> Result<Vec<Note>> {
        let start = Instant::now();
        let query = build_list_query(&req);

        let mut q = sqlx::query_as::<_, NoteRow>(&query);
        if let Some(term) = effective_search_term(&req) {
            q = q.bind(format!("%{}%", escape_like(term)));
        }
        if let Some(folder_id) = req.folder_id {
            q = q.bind(folder_id);
        }
        if let Some(tag_id) = req.tag_id {
            q = q.bind(tag_id);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(Error::Database)?;
        let notes = hydrate_notes(rows);

        debug!(
            subsystem = "database",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );

        Ok(notes)
    }

    async fn fetch(&self, id: i64) -> Result<Note> {
        let query = format!("{} WHERE n.id = $1 ORDER BY t.id ASC", NOTE_JOIN);
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        hydrate_notes(rows)
            .into_iter()
            .next()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO notes (title, content, folder_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.folder_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        insert_note_tags(&mut tx, id, &req.tags).await?;

        let note = self.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "create",
            note_id = id,
            "Created note"
        );
        Ok(note)
    }

    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<Note> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM notes WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?;
        if !exists {
            return Err(Error::NoteNotFound(id));
        }

        sqlx::query("UPDATE notes SET title = $1, content = $2, folder_id = $3 WHERE id = $4")
            .bind(&req.title)
            .bind(&req.content)
            .bind(req.folder_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        // Replace the tag set wholesale; concurrent readers see the old set
        // or the new one, never a partial state.
        sqlx::query("DELETE FROM notes_tags WHERE note_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        insert_note_tags(&mut tx, id, &req.tags).await?;

        let note = self.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(note)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // Junction rows go with the note via ON DELETE CASCADE. Deleting an
        // absent id is a no-op, not an error.
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_query_has_no_clauses() {
        let query = build_list_query(&ListNotesRequest::default());
        assert!(query.contains("WHERE 1=1 ORDER BY"));
        assert!(!query.contains("$1"));
    }

    #[test]
    fn test_query_always_orders_by_note_then_tag_id() {
        let query = build_list_query(&ListNotesRequest::default());
        assert!(query.ends_with("ORDER BY n.id ASC, t.id ASC"));
    }

    #[test]
    fn test_search_term_clause() {
        let req = ListNotesRequest {
            search_term: Some("cats".to_string()),
            ..Default::default()
        };
        let query = build_list_query(&req);
        assert!(query.contains("n.title LIKE $1 ESCAPE '\\'"));
    }

    #[test]
    fn test_empty_search_term_is_no_filter() {
        let req = ListNotesRequest {
            search_term: Some(String::new()),
            ..Default::default()
        };
        let query = build_list_query(&req);
        assert!(!query.contains("LIKE"));
    }

    #[test]
    fn test_folder_filter_clause() {
        let req = ListNotesRequest {
            folder_id: Some(2),
            ..Default::default()
        };
        let query = build_list_query(&req);
        assert!(query.contains("n.folder_id = $1"));
    }

    #[test]
    fn test_tag_filter_clause() {
        let req = ListNotesRequest {
            tag_id: Some(3),
            ..Default::default()
        };
        let query = build_list_query(&req);
        assert!(query.contains("t.id = $1"));
    }

    #[test]
    fn test_combined_filters_number_params_in_order() {
        let req = ListNotesRequest {
            search_term: Some("a".to_string()),
            folder_id: Some(1),
            tag_id: Some(2),
        };
        let query = build_list_query(&req);
        assert!(query.contains("n.title LIKE $1"));
        assert!(query.contains("n.folder_id = $2"));
        assert!(query.contains("t.id = $3"));
    }

    #[test]
    fn test_effective_search_term_filters_empty() {
        let req = ListNotesRequest {
            search_term: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(effective_search_term(&req), None);

        let req = ListNotesRequest {
            search_term: Some("x".to_string()),
            ..Default::default()
        };
        assert_eq!(effective_search_term(&req), Some("x"));
    }
}

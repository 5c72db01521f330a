//! Core traits for notekeep abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Request for listing notes.
#[derive(Debug, Clone, Default)]
pub struct ListNotesRequest {
    /// Substring to match against note titles (store-default case rules).
    pub search_term: Option<String>,
    /// Filter by exact folder id.
    pub folder_id: Option<i64>,
    /// Filter by exact tag id.
    pub tag_id: Option<i64>,
}

/// Request for creating a note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    /// Validated non-empty title.
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    /// Tag ids to attach; may be empty.
    pub tags: Vec<i64>,
}

/// Request for replacing a note's scalar fields and tag set.
///
/// Carries the full new state: a missing `folder_id` clears the folder and
/// the tag set is replaced wholesale, not diffed.
#[derive(Debug, Clone)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub tags: Vec<i64>,
}

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List notes with optional filters, hydrated.
    async fn list(&self, req: ListNotesRequest) -> Result<Vec<Note>>;

    /// Fetch one hydrated note by id.
    async fn fetch(&self, id: i64) -> Result<Note>;

    /// Insert a note and its tag attachments, returning the hydrated result.
    async fn create(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Overwrite a note's fields and replace its tag set.
    async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<Note>;

    /// Delete a note. Succeeds whether or not the id existed.
    async fn delete(&self, id: i64) -> Result<()>;
}

// =============================================================================
// FOLDER REPOSITORY
// =============================================================================

/// Repository for folder operations.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// List all folders.
    async fn list(&self) -> Result<Vec<Folder>>;

    /// Get a folder by id.
    async fn get(&self, id: i64) -> Result<Option<Folder>>;

    /// Create a folder.
    async fn create(&self, name: &str) -> Result<Folder>;

    /// Rename a folder.
    async fn update(&self, id: i64, name: &str) -> Result<Folder>;

    /// Delete a folder. Notes in it are left folder-less.
    async fn delete(&self, id: i64) -> Result<()>;
}

// =============================================================================
// TAG REPOSITORY
// =============================================================================

/// Repository for tag operations.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// List all tags.
    async fn list(&self) -> Result<Vec<Tag>>;

    /// Get a tag by id.
    async fn get(&self, id: i64) -> Result<Option<Tag>>;

    /// Create a tag.
    async fn create(&self, name: &str) -> Result<Tag>;

    /// Rename a tag.
    async fn update(&self, id: i64, name: &str) -> Result<Tag>;

    /// Delete a tag and its note attachments.
    async fn delete(&self, id: i64) -> Result<()>;
}

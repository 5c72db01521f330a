//! Core data models for notekeep.
//!
//! These types are shared across all notekeep crates and represent
//! the core domain entities.

use serde::{Deserialize, Serialize};

// =============================================================================
// FOLDER / TAG TYPES
// =============================================================================

/// A folder grouping zero or more notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

/// A tag attachable to any number of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A fully hydrated note: scalar fields plus its folder and tag set.
///
/// On the wire the folder is flattened to top-level `folderId`/`folderName`
/// keys (both null when the note has no folder); internally it stays a
/// single nullable reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "NoteWire", from = "NoteWire")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub folder: Option<Folder>,
    pub tags: Vec<Tag>,
}

/// JSON representation of a [`Note`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteWire {
    id: i64,
    title: String,
    content: Option<String>,
    folder_id: Option<i64>,
    folder_name: Option<String>,
    #[serde(default)]
    tags: Vec<Tag>,
}

impl From<Note> for NoteWire {
    fn from(note: Note) -> Self {
        let (folder_id, folder_name) = match note.folder {
            Some(folder) => (Some(folder.id), Some(folder.name)),
            None => (None, None),
        };
        NoteWire {
            id: note.id,
            title: note.title,
            content: note.content,
            folder_id,
            folder_name,
            tags: note.tags,
        }
    }
}

impl From<NoteWire> for Note {
    fn from(wire: NoteWire) -> Self {
        // A folder reference needs both halves; a dangling id is dropped.
        let folder = match (wire.folder_id, wire.folder_name) {
            (Some(id), Some(name)) => Some(Folder { id, name }),
            _ => None,
        };
        Note {
            id: wire.id,
            title: wire.title,
            content: wire.content,
            folder,
            tags: wire.tags,
        }
    }
}

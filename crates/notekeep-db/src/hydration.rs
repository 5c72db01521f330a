//! Hydration of flat join rows into nested note objects.
//!
//! Every note read goes through one wide join across notes, folders, the
//! notes_tags junction, and tags, which yields one row per note and tag
//! pairing. This module folds those rows back into one [`Note`] per distinct
//! note id, with the folder promoted to a nullable reference and the tags
//! aggregated into a list.

use std::collections::HashMap;

use sqlx::FromRow;

use notekeep_core::{Folder, Note, Tag};

/// One flat row from the note join.
///
/// The folder fields are null when the note has no folder. A note with no
/// tags still produces exactly one row, with null tag fields.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub folder_name: Option<String>,
    pub tag_id: Option<i64>,
    pub tag_name: Option<String>,
}

/// Fold flat join rows into one note per distinct note id.
///
/// Rules:
/// - Rows sharing a note id merge into a single output note.
/// - Scalar fields come from the first row seen for that id. The join
///   guarantees they repeat identically across the group, so later rows
///   are not re-checked.
/// - A folder is attached only when a row carries both folder fields.
/// - Each row with a non-null tag contributes a `Tag`, skipping exact
///   duplicates. The junction primary key should make duplicates
///   impossible; the skip guards against a misbuilt query.
/// - Output order follows first appearance of each note id, and each tag
///   list follows first appearance of its tags.
///
/// Pure and deterministic for a given input order.
pub fn hydrate_notes(rows: Vec<NoteRow>) -> Vec<Note> {
    let mut notes: Vec<Note> = Vec::new();
    let mut index_by_id: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let NoteRow {
            id,
            title,
            content,
            folder_id,
            folder_name,
            tag_id,
            tag_name,
        } = row;

        let idx = match index_by_id.get(&id) {
            Some(&idx) => idx,
            None => {
                let folder = match (folder_id, folder_name) {
                    (Some(id), Some(name)) => Some(Folder { id, name }),
                    _ => None,
                };
                notes.push(Note {
                    id,
                    title,
                    content,
                    folder,
                    tags: Vec::new(),
                });
                index_by_id.insert(id, notes.len() - 1);
                notes.len() - 1
            }
        };

        if let (Some(id), Some(name)) = (tag_id, tag_name) {
            let tag = Tag { id, name };
            let tags = &mut notes[idx].tags;
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        id: i64,
        title: &str,
        folder: Option<(i64, &str)>,
        tag: Option<(i64, &str)>,
    ) -> NoteRow {
        NoteRow {
            id,
            title: title.to_string(),
            content: Some(format!("content of {}", id)),
            folder_id: folder.map(|(id, _)| id),
            folder_name: folder.map(|(_, name)| name.to_string()),
            tag_id: tag.map(|(id, _)| id),
            tag_name: tag.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(hydrate_notes(vec![]).is_empty());
    }

    #[test]
    fn test_single_row_without_tags() {
        let notes = hydrate_notes(vec![row(1, "solo", Some((1, "Archive")), None)]);

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, 1);
        assert_eq!(notes[0].title, "solo");
        assert_eq!(
            notes[0].folder,
            Some(Folder {
                id: 1,
                name: "Archive".to_string()
            })
        );
        assert!(notes[0].tags.is_empty());
    }

    #[test]
    fn test_null_folder_yields_no_folder_reference() {
        let notes = hydrate_notes(vec![row(1, "loose", None, None)]);
        assert_eq!(notes[0].folder, None);
    }

    #[test]
    fn test_tags_aggregate_onto_one_note() {
        let notes = hydrate_notes(vec![
            row(1, "cats", Some((1, "Archive")), Some((1, "stuff"))),
            row(1, "cats", Some((1, "Archive")), Some((2, "yay"))),
        ]);

        assert_eq!(notes.len(), 1);
        assert_eq!(
            notes[0].tags,
            vec![
                Tag {
                    id: 1,
                    name: "stuff".to_string()
                },
                Tag {
                    id: 2,
                    name: "yay".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_tag_order_follows_first_appearance() {
        let notes = hydrate_notes(vec![
            row(1, "n", None, Some((9, "last-created"))),
            row(1, "n", None, Some((2, "older"))),
        ]);

        let names: Vec<&str> = notes[0].tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["last-created", "older"]);
    }

    #[test]
    fn test_duplicate_tag_rows_are_skipped() {
        let notes = hydrate_notes(vec![
            row(1, "n", None, Some((1, "stuff"))),
            row(1, "n", None, Some((1, "stuff"))),
        ]);

        assert_eq!(notes[0].tags.len(), 1);
    }

    #[test]
    fn test_same_tag_id_different_name_is_kept() {
        // Only exact {id, name} pairs are treated as duplicates.
        let notes = hydrate_notes(vec![
            row(1, "n", None, Some((1, "stuff"))),
            row(1, "n", None, Some((1, "renamed"))),
        ]);

        assert_eq!(notes[0].tags.len(), 2);
    }

    #[test]
    fn test_half_null_tag_fields_contribute_nothing() {
        let mut partial = row(1, "n", None, None);
        partial.tag_id = Some(5);

        let notes = hydrate_notes(vec![partial]);
        assert!(notes[0].tags.is_empty());
    }

    #[test]
    fn test_note_order_follows_first_appearance() {
        let notes = hydrate_notes(vec![
            row(3, "third", None, None),
            row(1, "first", None, None),
            row(2, "second", None, None),
        ]);

        let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_interleaved_rows_group_by_id_not_adjacency() {
        let notes = hydrate_notes(vec![
            row(1, "a", None, Some((1, "x"))),
            row(2, "b", None, Some((2, "y"))),
            row(1, "a", None, Some((3, "z"))),
        ]);

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].tags.len(), 2);
        assert_eq!(notes[1].tags.len(), 1);
    }

    #[test]
    fn test_scalar_fields_come_from_first_row() {
        let mut later = row(1, "changed", Some((2, "Other")), Some((1, "t")));
        later.content = Some("changed".to_string());

        let notes = hydrate_notes(vec![row(1, "original", Some((1, "Archive")), None), later]);

        assert_eq!(notes[0].title, "original");
        assert_eq!(notes[0].content, Some("content of 1".to_string()));
        assert_eq!(
            notes[0].folder,
            Some(Folder {
                id: 1,
                name: "Archive".to_string()
            })
        );
    }

    #[test]
    fn test_mixed_notes_with_and_without_tags() {
        let notes = hydrate_notes(vec![
            row(1, "tagged", None, Some((1, "stuff"))),
            row(2, "untagged", None, None),
            row(1, "tagged", None, Some((2, "yay"))),
        ]);

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].tags.len(), 2);
        assert!(notes[1].tags.is_empty());
    }
}

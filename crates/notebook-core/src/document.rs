//! Positional updates on notebook documents.
//!
//! Every mutation the service performs is expressed as an [`Update`] and
//! applied to one notebook at a time by [`Update::apply`]. Storage backends
//! load the document, apply the update and write it back inside a single
//! atomic step, so the same rules hold whichever backend is in use.
//!
//! Updates that name a note (`notes.$` style addressing) only match when
//! the note exists in the notebook. A miss is reported as
//! [`Applied::NoMatch`] and leaves the document untouched, the same way a
//! compound `{_id, notes._id}` filter would match nothing.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::object_id::ObjectId;
use crate::types::{Data, NewNotebook, Note, Notebook, NotebookPatch};

/// Errors raised while building or updating a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// Two notes in one notebook would share an id.
    #[error("duplicate note id {0} in notebook")]
    DuplicateNoteId(ObjectId),
}

/// Result of applying an update to a notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The document was changed.
    Modified,
    /// The addressed note does not exist; nothing was changed.
    NoMatch,
}

/// A single-document mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Refresh `lastAccess`.
    Touch,
    /// Append a note to `notes`.
    PushNote(Note),
    /// Remove the note with this id from `notes` (no-op if absent).
    PullNote(ObjectId),
    /// Sparse merge of notebook fields.
    Merge(NotebookPatch),
    /// Set `notes.$.title` on the addressed note.
    SetNoteTitle { note: ObjectId, title: String },
    /// Set `notes.$.text` on the addressed note.
    SetNoteText { note: ObjectId, text: String },
    /// Replace `notes.$.data` on the addressed note.
    SetNoteData { note: ObjectId, data: Data },
    /// Reset `notes.$.data` on the addressed note.
    ClearNoteData { note: ObjectId },
    /// Reset `notes.$[].data` on every note.
    ClearAllNoteData,
}

impl Update {
    /// Note addressed by this update, if it uses compound-key matching.
    pub fn target_note(&self) -> Option<ObjectId> {
        match self {
            Self::SetNoteTitle { note, .. }
            | Self::SetNoteText { note, .. }
            | Self::SetNoteData { note, .. }
            | Self::ClearNoteData { note } => Some(*note),
            _ => None,
        }
    }

    /// Short operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Touch => "touch",
            Self::PushNote(_) => "push_note",
            Self::PullNote(_) => "pull_note",
            Self::Merge(_) => "merge",
            Self::SetNoteTitle { .. } => "set_note_title",
            Self::SetNoteText { .. } => "set_note_text",
            Self::SetNoteData { .. } => "set_note_data",
            Self::ClearNoteData { .. } => "clear_note_data",
            Self::ClearAllNoteData => "clear_all_note_data",
        }
    }

    /// Apply the update to `notebook` at time `now`.
    ///
    /// On [`Applied::NoMatch`] or an error the notebook is left unchanged.
    pub fn apply(&self, notebook: &mut Notebook, now: DateTime<Utc>) -> Result<Applied, DocumentError> {
        if let Some(note_id) = self.target_note()
            && notebook.note(note_id).is_none()
        {
            return Ok(Applied::NoMatch);
        }

        match self {
            Self::Touch => {}
            Self::PushNote(note) => {
                if notebook.note(note.id).is_some() {
                    return Err(DocumentError::DuplicateNoteId(note.id));
                }
                notebook.notes.push(note.clone());
            }
            Self::PullNote(id) => notebook.notes.retain(|n| n.id != *id),
            Self::Merge(patch) => merge(notebook, patch)?,
            Self::SetNoteTitle { note, title } => {
                if let Some(target) = notebook.note_mut(*note) {
                    target.title = title.clone();
                    target.last_access = Some(advance(target.last_access, now));
                }
            }
            Self::SetNoteText { note, text } => {
                if let Some(target) = notebook.note_mut(*note) {
                    target.text = text.clone();
                    target.last_access = Some(advance(target.last_access, now));
                }
            }
            Self::SetNoteData { note, data } => {
                if let Some(target) = notebook.note_mut(*note) {
                    target.data = data.clone();
                }
            }
            Self::ClearNoteData { note } => {
                if let Some(target) = notebook.note_mut(*note) {
                    target.data = Data::default();
                }
            }
            Self::ClearAllNoteData => {
                for note in &mut notebook.notes {
                    note.data = Data::default();
                }
            }
        }

        notebook.last_access = advance(Some(notebook.last_access), now);
        Ok(Applied::Modified)
    }
}

fn merge(notebook: &mut Notebook, patch: &NotebookPatch) -> Result<(), DocumentError> {
    // Validate before touching anything so a rejected patch writes nothing.
    let notes = match &patch.notes {
        Some(new_notes) => Some(assign_note_ids(new_notes.iter().cloned().map(|n| n.into_note()))?),
        None => None,
    };

    if let Some(title) = &patch.title {
        notebook.title = title.clone();
    }
    if let Some(notes) = notes {
        notebook.notes = notes;
    }
    if let Some(created) = patch.created {
        notebook.created = created;
    }
    if let Some(data) = &patch.data {
        notebook.data = data.clone();
    }
    Ok(())
}

fn assign_note_ids(notes: impl Iterator<Item = Note>) -> Result<Vec<Note>, DocumentError> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for note in notes {
        if !seen.insert(note.id) {
            return Err(DocumentError::DuplicateNoteId(note.id));
        }
        out.push(note);
    }
    Ok(out)
}

/// Next value of an access marker: `now`, or one microsecond past the
/// previous value when the clock has not moved forward.
///
/// Microseconds are the finest resolution every backend keeps, so two
/// consecutive refreshes always compare strictly greater.
pub fn advance(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}

/// Build a new notebook document from a create request.
///
/// Assigns the notebook id and ids for notes that came without one. The
/// creation and access times are both `now` and the data payload is empty.
pub fn new_notebook(request: NewNotebook, now: DateTime<Utc>) -> Result<Notebook, DocumentError> {
    let notes = assign_note_ids(request.notes.into_iter().map(|n| n.into_note()))?;
    Ok(Notebook {
        id: ObjectId::new(),
        title: request.title,
        notes,
        created: now,
        last_access: now,
        data: Data::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewNote, Query};

    fn notebook_with_notes(titles: &[&str]) -> Notebook {
        let request = NewNotebook {
            title: "Physics".to_string(),
            notes: titles.iter().map(|t| NewNote::new(*t, "body")).collect(),
        };
        new_notebook(request, Utc::now()).unwrap()
    }

    fn data(info: &str, queries: &[(&str, &str)]) -> Data {
        Data {
            info: info.to_string(),
            queries: queries.iter().map(|(q, r)| Query::new(*q, *r)).collect(),
        }
    }

    #[test]
    fn new_notebook_sets_timestamps_and_empty_data() {
        let now = Utc::now();
        let nb = new_notebook(
            NewNotebook {
                title: "Physics".into(),
                notes: vec![],
            },
            now,
        )
        .unwrap();

        assert_eq!(nb.created, now);
        assert_eq!(nb.last_access, now);
        assert!(nb.notes.is_empty());
        assert!(nb.data.is_empty());
    }

    #[test]
    fn new_notebook_rejects_duplicate_client_ids() {
        let id = ObjectId::new();
        let note = NewNote {
            id: Some(id),
            ..NewNote::new("a", "b")
        };
        let result = new_notebook(
            NewNotebook {
                title: "dup".into(),
                notes: vec![note.clone(), note],
            },
            Utc::now(),
        );
        assert_eq!(result, Err(DocumentError::DuplicateNoteId(id)));
    }

    #[test]
    fn touch_is_strictly_increasing() {
        let mut nb = notebook_with_notes(&[]);
        let frozen = nb.last_access;

        Update::Touch.apply(&mut nb, frozen).unwrap();
        assert!(nb.last_access > frozen);

        let second = nb.last_access;
        Update::Touch.apply(&mut nb, frozen).unwrap();
        assert!(nb.last_access > second);
    }

    #[test]
    fn advance_keeps_later_clock() {
        let prev = Utc::now();
        let later = prev + Duration::seconds(5);
        assert_eq!(advance(Some(prev), later), later);
        assert_eq!(advance(None, later), later);
        assert_eq!(advance(Some(later), prev), later + Duration::microseconds(1));
    }

    #[test]
    fn push_note_appends_and_keeps_prior_notes() {
        let mut nb = notebook_with_notes(&["a", "b"]);
        let before = nb.notes.clone();

        let note = NewNote::new("c", "third").into_note();
        let applied = Update::PushNote(note.clone()).apply(&mut nb, Utc::now()).unwrap();

        assert_eq!(applied, Applied::Modified);
        assert_eq!(nb.notes.len(), before.len() + 1);
        assert_eq!(&nb.notes[..2], &before[..]);
        assert_eq!(nb.notes[2], note);
    }

    #[test]
    fn push_note_rejects_existing_id() {
        let mut nb = notebook_with_notes(&["a"]);
        let existing = nb.notes[0].clone();

        let result = Update::PushNote(existing.clone()).apply(&mut nb, Utc::now());
        assert_eq!(result, Err(DocumentError::DuplicateNoteId(existing.id)));
        assert_eq!(nb.notes.len(), 1);
    }

    #[test]
    fn pull_missing_note_still_modifies_access_time() {
        let mut nb = notebook_with_notes(&["a"]);
        let before = nb.last_access;

        let applied = Update::PullNote(ObjectId::new()).apply(&mut nb, Utc::now()).unwrap();
        assert_eq!(applied, Applied::Modified);
        assert_eq!(nb.notes.len(), 1);
        assert!(nb.last_access > before);
    }

    #[test]
    fn pull_removes_only_matching_note() {
        let mut nb = notebook_with_notes(&["a", "b", "c"]);
        let target = nb.notes[1].id;

        Update::PullNote(target).apply(&mut nb, Utc::now()).unwrap();
        let titles: Vec<_> = nb.notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);
    }

    #[test]
    fn set_title_touches_only_matched_note() {
        let mut nb = notebook_with_notes(&["a", "b"]);
        let target = nb.notes[1].id;
        let before = nb.last_access;

        let applied = Update::SetNoteTitle {
            note: target,
            title: "Chapter 1".into(),
        }
        .apply(&mut nb, Utc::now())
        .unwrap();

        assert_eq!(applied, Applied::Modified);
        assert_eq!(nb.notes[1].title, "Chapter 1");
        assert!(nb.notes[1].last_access.is_some());
        assert_eq!(nb.notes[0].title, "a");
        assert!(nb.notes[0].last_access.is_none());
        assert!(nb.last_access > before);
    }

    #[test]
    fn set_text_touches_note_and_notebook() {
        let mut nb = notebook_with_notes(&["a"]);
        let target = nb.notes[0].id;
        let before = nb.last_access;

        Update::SetNoteText {
            note: target,
            text: "rewritten".into(),
        }
        .apply(&mut nb, before)
        .unwrap();

        let note_access = nb.notes[0].last_access.unwrap();
        assert_eq!(nb.notes[0].text, "rewritten");
        assert!(nb.last_access > before);

        Update::SetNoteText {
            note: target,
            text: "again".into(),
        }
        .apply(&mut nb, before)
        .unwrap();

        assert!(nb.notes[0].last_access.unwrap() > note_access);
    }

    #[test]
    fn note_update_on_missing_note_is_no_match() {
        let mut nb = notebook_with_notes(&["a"]);
        let snapshot = nb.clone();

        let applied = Update::SetNoteText {
            note: ObjectId::new(),
            text: "x".into(),
        }
        .apply(&mut nb, Utc::now())
        .unwrap();

        assert_eq!(applied, Applied::NoMatch);
        assert_eq!(nb, snapshot);
    }

    #[test]
    fn set_note_data_replaces_wholesale() {
        let mut nb = notebook_with_notes(&["a"]);
        let id = nb.notes[0].id;
        nb.notes[0].data = data("old", &[("q1", "r1"), ("q2", "r2")]);

        Update::SetNoteData {
            note: id,
            data: data("", &[("q3", "r3")]),
        }
        .apply(&mut nb, Utc::now())
        .unwrap();

        assert_eq!(nb.notes[0].data, data("", &[("q3", "r3")]));
    }

    #[test]
    fn clear_all_note_data_resets_every_note() {
        let mut nb = notebook_with_notes(&["a", "b"]);
        for note in &mut nb.notes {
            note.data = data("x", &[("q", "r")]);
        }
        nb.data = data("notebook level", &[]);

        Update::ClearAllNoteData.apply(&mut nb, Utc::now()).unwrap();
        assert!(nb.notes.iter().all(|n| n.data.is_empty()));
        assert_eq!(nb.data.info, "notebook level");
    }

    #[test]
    fn merge_with_only_title_leaves_other_fields() {
        let mut nb = notebook_with_notes(&["a"]);
        nb.data = data("keep", &[("q", "r")]);
        let notes = nb.notes.clone();
        let created = nb.created;
        let data_before = nb.data.clone();

        let patch = NotebookPatch {
            title: Some("X".into()),
            ..NotebookPatch::default()
        };
        Update::Merge(patch).apply(&mut nb, Utc::now()).unwrap();

        assert_eq!(nb.title, "X");
        assert_eq!(nb.notes, notes);
        assert_eq!(nb.created, created);
        assert_eq!(nb.data, data_before);
    }

    #[test]
    fn merge_with_present_empty_values_clears() {
        let mut nb = notebook_with_notes(&["a"]);
        nb.data = data("gone", &[]);

        let patch: NotebookPatch =
            serde_json::from_str(r#"{"title":"","notes":[],"data":{}}"#).unwrap();
        Update::Merge(patch).apply(&mut nb, Utc::now()).unwrap();

        assert!(nb.title.is_empty());
        assert!(nb.notes.is_empty());
        assert!(nb.data.is_empty());
    }

    #[test]
    fn rejected_merge_writes_nothing() {
        let mut nb = notebook_with_notes(&["a"]);
        let snapshot = nb.clone();
        let id = ObjectId::new();
        let dup = NewNote {
            id: Some(id),
            ..NewNote::default()
        };

        let patch = NotebookPatch {
            title: Some("changed".into()),
            notes: Some(vec![dup.clone(), dup]),
            ..NotebookPatch::default()
        };
        let result = Update::Merge(patch).apply(&mut nb, Utc::now());

        assert_eq!(result, Err(DocumentError::DuplicateNoteId(id)));
        assert_eq!(nb, snapshot);
    }
}

//! Document types for the notebook service.
//!
//! A notebook is a single document; notes live in an ordered array inside
//! it and each note (and the notebook itself) carries a [`Data`] payload:
//!
//! ```text
//! Notebook ─┬─ notes[] ── Note ── data ── queries[] ── Query
//!           └─ data ── queries[] ── Query
//! ```
//!
//! The JSON shape is the wire format and the stored format at the same
//! time. Optional strings and empty arrays are omitted rather than written
//! as `null`, and timestamps use camelCase keys (`lastAccess`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::object_id::ObjectId;

// ============================================================================
// Data payloads
// ============================================================================

/// A question together with its response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub response: String,
}

impl Query {
    pub fn new(question: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
        }
    }
}

/// Auxiliary content attached to a notebook or a note.
///
/// Data is always replaced as a whole; there is no merge of `queries`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<Query>,
}

impl Data {
    /// Whether this payload carries nothing (the cleared state).
    pub fn is_empty(&self) -> bool {
        self.info.is_empty() && self.queries.is_empty()
    }
}

// ============================================================================
// Notes
// ============================================================================

/// A note stored inside a notebook's `notes` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique among the notes of the parent notebook.
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default)]
    pub data: Data,
    /// Refreshed when the note's title or text is updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<DateTime<Utc>>,
}

/// Note as sent by a client when appending or replacing notes.
///
/// The id is optional: a client may pick its own id, otherwise one is
/// assigned when the note is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default)]
    pub data: Data,
}

impl NewNote {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Turns the request into a stored note, assigning an id if missing.
    pub fn into_note(self) -> Note {
        Note {
            id: self.id.unwrap_or_default(),
            title: self.title,
            text: self.text,
            data: self.data,
            last_access: None,
        }
    }
}

/// Id, title and text of one note, without its data payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<DateTime<Utc>>,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            text: note.text.clone(),
            last_access: note.last_access,
        }
    }
}

// ============================================================================
// Notebooks
// ============================================================================

/// A notebook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    /// Store-assigned, globally unique.
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default)]
    pub notes: Vec<Note>,
    pub created: DateTime<Utc>,
    /// Monotonically non-decreasing.
    pub last_access: DateTime<Utc>,
    #[serde(default)]
    pub data: Data,
}

impl Notebook {
    /// Find a note by id.
    pub fn note(&self, id: ObjectId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Find a note by id for in-place modification.
    pub fn note_mut(&mut self, id: ObjectId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    /// Data payload of every note, in note order.
    pub fn note_data(&self) -> Vec<Data> {
        self.notes.iter().map(|n| n.data.clone()).collect()
    }

    pub fn summary(&self) -> NotebookSummary {
        NotebookSummary {
            id: self.id,
            title: self.title.clone(),
            last_access: self.last_access,
        }
    }
}

/// Request body for creating a notebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewNotebook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: Vec<NewNote>,
}

/// Identifier, title and last access time of a notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookSummary {
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub last_access: DateTime<Utc>,
}

/// Body of the last-access endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAccess {
    pub last_access: DateTime<Utc>,
}

/// Sparse update of notebook fields.
///
/// Each field is applied only when present in the request. Presence is
/// what counts, not content: `"title": ""` clears the title and
/// `"data": {}` clears the data, while a missing key (or `null`) leaves the
/// stored value alone. `lastAccess` is server-managed and not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<NewNote>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
}

impl NotebookPatch {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.notes.is_none() && self.created.is_none() && self.data.is_none()
    }
}

/// Request body for the note title endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTitle {
    #[serde(default)]
    pub title: String,
}

/// Request body for the note text endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteText {
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_notebook() -> Notebook {
        let now = Utc::now();
        Notebook {
            id: ObjectId::new(),
            title: "Physics".to_string(),
            notes: vec![NewNote::new("Ch1", "intro").into_note()],
            created: now,
            last_access: now,
            data: Data::default(),
        }
    }

    #[test]
    fn empty_data_serializes_as_empty_object() {
        let json = serde_json::to_value(Data::default()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn notebook_uses_camel_case_keys() {
        let notebook = sample_notebook();
        let json = serde_json::to_value(&notebook).unwrap();

        assert!(json.get("lastAccess").is_some());
        assert!(json.get("last_access").is_none());
        assert_eq!(json["data"], json!({}));
        assert_eq!(json["notes"][0]["title"], "Ch1");
        assert!(json["notes"][0].get("lastAccess").is_none());
    }

    #[test]
    fn empty_title_is_omitted() {
        let mut notebook = sample_notebook();
        notebook.title.clear();
        let json = serde_json::to_value(&notebook).unwrap();
        assert!(json.get("title").is_none());
    }

    #[test]
    fn new_note_without_id_gets_one() {
        let note: NewNote = serde_json::from_str(r#"{"title":"Ch1","text":"intro"}"#).unwrap();
        assert!(note.id.is_none());

        let stored = note.into_note();
        assert_eq!(stored.title, "Ch1");
        assert_eq!(stored.text, "intro");
        assert!(stored.data.is_empty());
    }

    #[test]
    fn new_note_keeps_client_id() {
        let note: NewNote =
            serde_json::from_str(r#"{"id":"65a1f0c2e4b0a1b2c3d4e5f6","title":"x"}"#).unwrap();
        let stored = note.into_note();
        assert_eq!(stored.id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn new_note_rejects_malformed_id() {
        let result = serde_json::from_str::<NewNote>(r#"{"id":"123","title":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_distinguishes_absent_from_empty() {
        let absent: NotebookPatch = serde_json::from_str(r#"{}"#).unwrap();
        assert!(absent.is_empty());

        let null_title: NotebookPatch = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert!(null_title.title.is_none());

        let empty_title: NotebookPatch = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert_eq!(empty_title.title.as_deref(), Some(""));
    }

    #[test]
    fn patch_ignores_last_access() {
        let patch: NotebookPatch =
            serde_json::from_str(r#"{"lastAccess":"2020-01-01T00:00:00Z"}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn summary_carries_three_fields() {
        let notebook = sample_notebook();
        let json = serde_json::to_value(notebook.summary()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(json.get("id").is_some());
        assert!(json.get("title").is_some());
        assert!(json.get("lastAccess").is_some());
    }

    #[test]
    fn note_lookup_by_id() {
        let notebook = sample_notebook();
        let id = notebook.notes[0].id;
        assert_eq!(notebook.note(id).unwrap().title, "Ch1");
        assert!(notebook.note(ObjectId::new()).is_none());
    }

    #[test]
    fn notebook_roundtrips_through_stored_form() {
        let mut notebook = sample_notebook();
        notebook.data = Data {
            info: "about".to_string(),
            queries: vec![Query::new("why?", "because")],
        };
        let value = serde_json::to_value(&notebook).unwrap();
        let back: Notebook = serde_json::from_value(value).unwrap();
        assert_eq!(back, notebook);
    }
}

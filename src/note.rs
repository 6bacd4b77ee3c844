use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use futures::TryStreamExt;
use opendal::{EntryMode, Operator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{NoteStoreError, Result};
use crate::record::{self, Record, RecordDoc};

/// A titled container owning an ordered list of records, scoped to one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub modified_at: DateTime<Utc>,
}

impl Note {
    /// A note that has not been persisted yet; `save_note` allocates its id.
    pub fn draft(title: impl Into<String>) -> Self {
        Note {
            id: String::new(),
            title: title.into(),
            modified_at: Utc::now(),
        }
    }
}

/// Wire form of `meta.json`. Both fields are optional on read.
#[derive(Serialize, Deserialize, Debug)]
struct NoteDoc {
    #[serde(default = "NoteDoc::default_title")]
    title: String,
    #[serde(default)]
    modified_at: Option<DateTime<Utc>>,
}

impl NoteDoc {
    fn default_title() -> String {
        "Untitled".to_string()
    }

    fn into_note(self, note_id: &str) -> Note {
        Note {
            id: note_id.to_string(),
            title: self.title,
            modified_at: self.modified_at.unwrap_or_else(Utc::now),
        }
    }
}

fn notes_root(user_id: &str) -> String {
    format!("users/{}/notes/", user_id)
}

fn note_path(user_id: &str, note_id: &str) -> String {
    format!("users/{}/notes/{}", user_id, note_id)
}

fn meta_path(user_id: &str, note_id: &str) -> String {
    format!("{}/meta.json", note_path(user_id, note_id))
}

fn records_root(user_id: &str, note_id: &str) -> String {
    format!("{}/records/", note_path(user_id, note_id))
}

fn require_user(user_id: &str) -> Result<()> {
    if user_id.is_empty() {
        return Err(NoteStoreError::Unauthenticated);
    }
    Ok(())
}

/// Every note under the user's partition, summary fields only: records are
/// never fetched here. The result is unordered; screens sort by
/// `modified_at` descending for display. Full scan, no pagination.
pub async fn list_notes(op: &Operator, user_id: &str) -> Result<Vec<Note>> {
    require_user(user_id)?;

    let root = notes_root(user_id);
    if !op.exists(&root).await? {
        return Ok(vec![]);
    }

    let mut lister = op.lister(&root).await?;
    let mut notes = Vec::new();
    while let Some(entry) = lister.try_next().await? {
        if entry.metadata().mode() != EntryMode::DIR {
            continue;
        }
        let note_id = entry.name().trim_end_matches('/');
        if note_id.is_empty() {
            continue;
        }
        let meta = meta_path(user_id, note_id);
        // Half-written note directories carry no meta.json; skip them.
        if !op.exists(&meta).await? {
            continue;
        }
        let bytes = op.read(&meta).await?;
        let doc: NoteDoc = serde_json::from_slice(&bytes.to_vec())?;
        notes.push(doc.into_note(note_id));
    }

    Ok(notes)
}

/// The note plus its full record list, sorted ascending by `order`. That
/// sort is the one ordering guarantee the read path provides; physical
/// storage order means nothing.
///
/// Fails with `NoteNotFound` when the note document does not exist, as
/// distinct from a transport failure on either read.
pub async fn get_note(op: &Operator, user_id: &str, note_id: &str) -> Result<(Note, Vec<Record>)> {
    require_user(user_id)?;

    let meta = meta_path(user_id, note_id);
    if !op.exists(&meta).await? {
        return Err(NoteStoreError::NoteNotFound {
            note_id: note_id.to_string(),
        });
    }
    let bytes = op.read(&meta).await?;
    let doc: NoteDoc = serde_json::from_slice(&bytes.to_vec())?;
    let note = doc.into_note(note_id);

    let records = read_records(op, user_id, note_id).await?;
    Ok((note, records))
}

async fn read_records(op: &Operator, user_id: &str, note_id: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for path in record_paths(op, user_id, note_id).await? {
        let bytes = op.read(&path).await?;
        let doc: RecordDoc = serde_json::from_slice(&bytes.to_vec())?;
        records.push(doc.into_record());
    }

    record::sort_by_order(&mut records);
    Ok(records)
}

async fn record_paths(op: &Operator, user_id: &str, note_id: &str) -> Result<Vec<String>> {
    let root = records_root(user_id, note_id);
    if !op.exists(&root).await? {
        return Ok(vec![]);
    }

    let mut lister = op.lister(&root).await?;
    let mut paths = Vec::new();
    while let Some(entry) = lister.try_next().await? {
        if entry.metadata().mode() == EntryMode::FILE {
            paths.push(entry.path().to_string());
        }
    }
    Ok(paths)
}

/// Full replacement of the note's persisted state. The note document is
/// written first; the old record documents are then deleted wholesale and
/// the submitted list written out with dense 0-based `order` values. There
/// is no per-record diffing: record documents get fresh identities on every
/// save.
///
/// The caller's `modified_at` is ignored. The timestamp is taken here, at
/// write time, so display ordering across devices never depends on a
/// client clock. An empty `note.id` means "create": a fresh id is
/// allocated before the write. The returned note carries the assigned id
/// and timestamp.
///
/// Success means the whole record set has landed; a reader immediately
/// after a successful save observes the submitted list. Nothing is rolled
/// back on failure, so a failed save can leave the new note document next
/// to a partially replaced record set.
pub async fn save_note(
    op: &Operator,
    user_id: &str,
    note: &Note,
    records: &[Record],
) -> Result<Note> {
    require_user(user_id)?;

    let note_id = if note.id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        note.id.clone()
    };

    let modified_at = Utc::now();
    let doc = NoteDoc {
        title: note.title.clone(),
        modified_at: Some(modified_at),
    };

    op.create_dir(&notes_root(user_id)).await?;
    op.create_dir(&format!("{}/", note_path(user_id, &note_id)))
        .await?;
    op.write(
        &meta_path(user_id, &note_id),
        serde_json::to_vec_pretty(&doc)?,
    )
    .await?;

    let stale = record_paths(op, user_id, &note_id).await?;
    try_join_all(stale.iter().map(|path| op.delete(path))).await?;

    let records_dir = records_root(user_id, &note_id);
    op.create_dir(&records_dir).await?;
    for (position, item) in records.iter().enumerate() {
        let record_doc = RecordDoc::from_record(item, position);
        let path = format!("{}{}.json", records_dir, Uuid::new_v4());
        op.write(&path, serde_json::to_vec_pretty(&record_doc)?)
            .await?;
    }

    Ok(Note {
        id: note_id,
        title: note.title.clone(),
        modified_at,
    })
}

/// Removes the note and everything under it. The record batch is deleted
/// and awaited in full before the note document goes away, so a failure
/// partway leaves the note document in place for a caller retry; records
/// already deleted are not restored.
///
/// Deleting a note that does not exist fails with `NoteNotFound` and has
/// no side effects, which makes repeat deletion observable but harmless.
pub async fn delete_note(op: &Operator, user_id: &str, note_id: &str) -> Result<()> {
    require_user(user_id)?;

    let meta = meta_path(user_id, note_id);
    if !op.exists(&meta).await? {
        return Err(NoteStoreError::NoteNotFound {
            note_id: note_id.to_string(),
        });
    }

    let paths = record_paths(op, user_id, note_id).await?;
    try_join_all(paths.iter().map(|path| op.delete(path))).await?;

    op.delete(&meta).await?;
    op.remove_all(&format!("{}/", note_path(user_id, note_id)))
        .await?;

    Ok(())
}

pub type Result<T> = std::result::Result<T, NoteStoreError>;

#[derive(thiserror::Error, Debug)]
pub enum NoteStoreError {
    #[error("note not found: {note_id}")]
    NoteNotFound { note_id: String },

    #[error("no authenticated user")]
    Unauthenticated,

    #[error(transparent)]
    Transport(#[from] opendal::Error),

    #[error("malformed stored document: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NoteStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, NoteStoreError::NoteNotFound { .. })
    }
}

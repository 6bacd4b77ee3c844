#![warn(warnings)]
#![deny(clippy::all)]

pub mod account;
pub mod error;
pub mod note;
pub mod record;
pub mod storage;

pub use account::{FixedIdentityProvider, IdentityProvider};
pub use error::{NoteStoreError, Result};
pub use note::Note;
pub use record::{Record, RecordKind, TextStyle};

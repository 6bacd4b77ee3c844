use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Inline style tags applied to a record's content. Applied as a set:
/// duplicates collapse, order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl TextStyle {
    pub fn tag(&self) -> &'static str {
        match self {
            TextStyle::Bold => "BOLD",
            TextStyle::Italic => "ITALIC",
            TextStyle::Underline => "UNDERLINE",
            TextStyle::Strikethrough => "STRIKETHROUGH",
        }
    }

    /// Unrecognized tags decode to `None` and are dropped by readers.
    pub fn from_tag(tag: &str) -> Option<TextStyle> {
        match tag {
            "BOLD" => Some(TextStyle::Bold),
            "ITALIC" => Some(TextStyle::Italic),
            "UNDERLINE" => Some(TextStyle::Underline),
            "STRIKETHROUGH" => Some(TextStyle::Strikethrough),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKind {
    #[default]
    Text,
    Checkbox,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Text => "text",
            RecordKind::Checkbox => "checkbox",
        }
    }

    /// Absent and unrecognized kinds both decode to `Text`.
    fn from_wire(kind: &str) -> RecordKind {
        match kind {
            "checkbox" => RecordKind::Checkbox,
            _ => RecordKind::Text,
        }
    }
}

/// One fragment of a note's body: plain text or a checkbox item.
///
/// `order` is authoritative only immediately after a save, where it equals
/// the record's position in the submitted list. Stored documents may carry
/// gaps or duplicates; readers sort by it and nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: RecordKind,
    pub content: String,
    pub is_checked: Option<bool>,
    pub order: u32,
    pub styles: BTreeSet<TextStyle>,
}

impl Record {
    pub fn text(content: impl Into<String>) -> Self {
        Record {
            kind: RecordKind::Text,
            content: content.into(),
            is_checked: None,
            order: 0,
            styles: BTreeSet::new(),
        }
    }

    pub fn checkbox(content: impl Into<String>, checked: bool) -> Self {
        Record {
            kind: RecordKind::Checkbox,
            content: content.into(),
            is_checked: Some(checked),
            order: 0,
            styles: BTreeSet::new(),
        }
    }
}

/// Wire form of a record document. Every field is optional on read and
/// takes its documented default when missing.
#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct RecordDoc {
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default = "RecordDoc::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub is_checked: Option<bool>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub styles: Vec<String>,
}

impl RecordDoc {
    fn default_kind() -> String {
        RecordKind::Text.as_str().to_string()
    }

    pub(crate) fn into_record(self) -> Record {
        let styles = self
            .styles
            .iter()
            .filter_map(|tag| TextStyle::from_tag(tag))
            .collect();
        Record {
            kind: RecordKind::from_wire(&self.kind),
            content: self.content,
            is_checked: self.is_checked,
            order: self.order,
            styles,
        }
    }

    /// Snapshot of `record` at `position` in a full-replacement save.
    /// `order` comes from the position, never from the record itself, and
    /// `is_checked` is stored as null for anything but a checkbox.
    pub(crate) fn from_record(record: &Record, position: usize) -> Self {
        RecordDoc {
            content: record.content.clone(),
            kind: record.kind.as_str().to_string(),
            is_checked: match record.kind {
                RecordKind::Checkbox => record.is_checked,
                RecordKind::Text => None,
            },
            order: position as u32,
            styles: record.styles.iter().map(|s| s.tag().to_string()).collect(),
        }
    }
}

/// Storage order means nothing; readers get records sorted by `order`.
pub(crate) fn sort_by_order(records: &mut [Record]) {
    records.sort_by_key(|record| record.order);
}

//! Journal entry model.
//!
//! An entry is either present in the store or absent. Create moves it from
//! absent to present, delete moves it back; get and update only apply to
//! present entries and leave that state unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Store-assigned entry identifier. Always positive; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

/// Returned when a path segment is not a usable entry identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("entryId must be a positive integer")]
pub struct EntryIdParseError;

impl EntryId {
    /// Wrap a raw identifier read from storage.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for EntryId {
    type Err = EntryIdParseError;

    /// Parse a client-supplied identifier.
    ///
    /// # Examples
    /// ```
    /// use journal_backend::domain::EntryId;
    ///
    /// assert_eq!("12".parse::<EntryId>().map(EntryId::get), Ok(12));
    /// assert!("abc".parse::<EntryId>().is_err());
    /// assert!("0".parse::<EntryId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(EntryIdParseError),
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field of an [`EntryDraft`] that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    /// `title`
    Title,
    /// `notes`
    Notes,
    /// `photoUrl`
    PhotoUrl,
}

impl EntryField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Notes => "notes",
            Self::PhotoUrl => "photoUrl",
        }
    }
}

/// Validation error for entry drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryValidationError {
    /// A required field was missing or blank.
    #[error("{} is required", .0.as_str())]
    MissingField(EntryField),
}

/// Validated `{title, notes, photoUrl}` triple used for create and update.
///
/// ## Invariants
/// - Every field is non-empty once trimmed. Values are stored as given.
///
/// # Examples
/// ```
/// use journal_backend::domain::{EntryDraft, EntryField, EntryValidationError};
///
/// let draft = EntryDraft::try_new("Day 1", "hello", "http://x/y.png").expect("valid");
/// assert_eq!(draft.title(), "Day 1");
///
/// let err = EntryDraft::try_new("Day 1", " ", "http://x/y.png").expect_err("blank notes");
/// assert_eq!(err, EntryValidationError::MissingField(EntryField::Notes));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    title: String,
    notes: String,
    photo_url: String,
}

impl EntryDraft {
    /// Validate the three mutable fields, reporting the first blank one.
    pub fn try_new(
        title: impl Into<String>,
        notes: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Result<Self, EntryValidationError> {
        let title = title.into();
        let notes = notes.into();
        let photo_url = photo_url.into();
        for (field, value) in [
            (EntryField::Title, &title),
            (EntryField::Notes, &notes),
            (EntryField::PhotoUrl, &photo_url),
        ] {
            if value.trim().is_empty() {
                return Err(EntryValidationError::MissingField(field));
            }
        }
        Ok(Self {
            title,
            notes,
            photo_url,
        })
    }

    /// Entry title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Entry notes.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Photo URL.
    pub fn photo_url(&self) -> &str {
        &self.photo_url
    }
}

/// A persisted journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    draft: EntryDraft,
}

impl Entry {
    /// Combine an identifier with its validated fields.
    pub fn new(id: EntryId, draft: EntryDraft) -> Self {
        Self { id, draft }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Entry title.
    pub fn title(&self) -> &str {
        self.draft.title()
    }

    /// Entry notes.
    pub fn notes(&self) -> &str {
        self.draft.notes()
    }

    /// Photo URL.
    pub fn photo_url(&self) -> &str {
        self.draft.photo_url()
    }

    /// The mutable fields of this entry.
    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }
}

use std::fmt;

use crate::record::errors::GenreError;
use crate::record::errors::RecordNameError;
use crate::record::errors::ReleaseYearError;

/// Record entity owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub user_id: UserId,
    pub name: RecordName,
    pub genre: Genre,
    pub year: ReleaseYear,
}

/// Store-generated record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(pub i64);

/// Owner identifier as asserted by the calling authority.
///
/// Not checked against any credential store: the catalogue trusts the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Record name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordName(String);

impl RecordName {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid record name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 255 characters
    pub fn new(name: String) -> Result<Self, RecordNameError> {
        let length = name.chars().count();
        if name.trim().is_empty() {
            Err(RecordNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(RecordNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Genre value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre(String);

impl Genre {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid genre.
    ///
    /// # Errors
    /// * `Empty` - Genre is empty or whitespace only
    /// * `TooLong` - Genre longer than 100 characters
    pub fn new(genre: String) -> Result<Self, GenreError> {
        let length = genre.chars().count();
        if genre.trim().is_empty() {
            Err(GenreError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(GenreError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(genre))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Release year value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseYear(i32);

impl ReleaseYear {
    /// # Errors
    /// * `NotPositive` - Year is zero or negative
    pub fn new(year: i32) -> Result<Self, ReleaseYearError> {
        if year > 0 {
            Ok(Self(year))
        } else {
            Err(ReleaseYearError::NotPositive(year))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Command to create a new record with domain types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordCommand {
    pub name: RecordName,
    pub genre: Genre,
    pub year: ReleaseYear,
}

/// Natural identity of a record within one user's catalogue.
///
/// Several rows may share a key; deleting by key removes all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub name: RecordName,
    pub year: ReleaseYear,
}

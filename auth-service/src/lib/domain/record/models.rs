use serde::Deserialize;
use serde::Serialize;

use crate::record::errors::RecordError;
use crate::record::errors::RecordFieldError;

const NAME_MAX_LENGTH: usize = 255;
const GENRE_MAX_LENGTH: usize = 100;

/// Record as owned by the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub genre: String,
    pub year: i32,
}

/// Unvalidated record fields as received from a client.
///
/// Checked only once the caller's token has been accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordDraft {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// Record request body as received; `Err` carries why it could not be read.
pub type RecordBody = Result<RecordDraft, String>;

/// Record fields ready to be sent to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub genre: String,
    pub year: i32,
}

/// Natural key of the records to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub name: String,
    pub year: i32,
}

impl RecordDraft {
    /// Validate all fields required for creation.
    ///
    /// # Errors
    /// * `MissingFields` - One of `name`, `genre`, `year` is absent
    /// * `InvalidField` - A field is blank, too long or not positive
    pub fn into_new_record(self) -> Result<NewRecord, RecordError> {
        match (self.name, self.genre, self.year) {
            (Some(name), Some(genre), Some(year)) => Ok(NewRecord {
                name: checked_text("name", name, NAME_MAX_LENGTH)?,
                genre: checked_text("genre", genre, GENRE_MAX_LENGTH)?,
                year: checked_year(year)?,
            }),
            (name, genre, year) => Err(missing(&[
                ("name", name.is_some()),
                ("genre", genre.is_some()),
                ("year", year.is_some()),
            ])),
        }
    }

    /// Validate the fields identifying records to delete; `genre` is ignored.
    ///
    /// # Errors
    /// * `MissingFields` - `name` or `year` is absent
    /// * `InvalidField` - A field is blank, too long or not positive
    pub fn into_key(self) -> Result<RecordKey, RecordError> {
        match (self.name, self.year) {
            (Some(name), Some(year)) => Ok(RecordKey {
                name: checked_text("name", name, NAME_MAX_LENGTH)?,
                year: checked_year(year)?,
            }),
            (name, year) => Err(missing(&[
                ("name", name.is_some()),
                ("year", year.is_some()),
            ])),
        }
    }
}

fn checked_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, RecordFieldError> {
    let actual = value.chars().count();
    if value.trim().is_empty() {
        Err(RecordFieldError::Empty { field })
    } else if actual > max {
        Err(RecordFieldError::TooLong { field, max, actual })
    } else {
        Ok(value)
    }
}

fn checked_year(year: i32) -> Result<i32, RecordFieldError> {
    if year > 0 {
        Ok(year)
    } else {
        Err(RecordFieldError::YearNotPositive(year))
    }
}

fn missing(fields: &[(&str, bool)]) -> RecordError {
    let names: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    RecordError::MissingFields(names.join(", "))
}

//! Validation of the Samputt verse picked by the user.

use std::fmt::{Display, Formatter};

use log::warn;
use serde::Serialize;

use crate::verse_repository::VerseRepository;

/// Verses commonly chosen as the Samputt refrain.
pub const QUICK_SELECT_VERSES: [u32; 5] = [1, 20, 25, 30, 48];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Empty or non-numeric input.
    InvalidInput,
    /// `value` saturates at the `i64` bounds for longer digit strings.
    OutOfRange { value: i64, total: u32 },
    /// In range, but the dataset has no verse with this number.
    MissingVerse(u32),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::InvalidInput => write!(f, "Please enter a valid verse number."),
            SelectionError::OutOfRange { total, .. } => {
                write!(f, "Please enter a verse number between 1 and {total}.")
            }
            SelectionError::MissingVerse(number) => {
                write!(f, "Verse {number} is missing from the dataset")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Parses free-text input into a verse number within `1..=total`.
///
/// Surrounding whitespace is ignored. Anything that is not an integer is
/// [`SelectionError::InvalidInput`]; an integer too long for `i64` is still
/// [`SelectionError::OutOfRange`].
pub fn parse_samputt_input(input: &str, total: u32) -> Result<u32, SelectionError> {
    let trimmed = input.trim();
    let value = match trimmed.parse::<i64>() {
        Ok(value) => value,
        Err(_) => match overflowed_integer(trimmed) {
            Some(value) => value,
            None => {
                warn!("Rejected Samputt input {trimmed:?}: not a number");
                return Err(SelectionError::InvalidInput);
            }
        },
    };

    if value < 1 || value > i64::from(total) {
        warn!("Rejected Samputt input {value}: outside 1..={total}");
        return Err(SelectionError::OutOfRange { value, total });
    }

    // Bounded by 1..=total above.
    Ok(value as u32)
}

/// Saturated value for a well-formed integer that does not fit in `i64`.
fn overflowed_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Quick-select candidates that exist in a dataset of `total` verses.
pub fn quick_select(candidates: &[u32], total: u32) -> Vec<u32> {
    candidates
        .iter()
        .copied()
        .filter(|&number| {
            let valid = (1..=total).contains(&number);
            if !valid {
                warn!("Dropping quick-select verse {number}: dataset has {total} verses");
            }
            valid
        })
        .collect()
}

/// What the selection screen shows once the input is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionPreview {
    pub verse_number: u32,
    pub first_line: String,
}

/// Validates `input` against `repository` and builds the preview.
pub fn preview(repository: &VerseRepository, input: &str) -> Result<SelectionPreview, SelectionError> {
    let total = u32::try_from(repository.count()).unwrap_or(u32::MAX);
    let verse_number = parse_samputt_input(input, total)?;

    let verse = repository.get_by_number(verse_number).ok_or_else(|| {
        warn!("Samputt preview for verse {verse_number}: not in dataset");
        SelectionError::MissingVerse(verse_number)
    })?;
    let first_line = verse.first_line().to_string();

    Ok(SelectionPreview {
        verse_number,
        first_line,
    })
}

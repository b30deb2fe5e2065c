//! Samputt reading: a chosen verse recited as a refrain between every pair of
//! consecutive verses, and once more after the last one.
//!
//! For `N` verses and refrain `S` the sequence is
//!
//! ```text
//! v1, S*, v2, S*, ..., S*, vN, S*
//! ```
//!
//! where `S*` marks an inserted refrain. A regular occurrence of `S` at its
//! own position is *not* marked; the flag records the insertion role, not the
//! verse identity. The result has `2N` entries (`N` regular, `N` refrains).

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::navigation::Navigable;
use crate::verse_model::Verse;
use crate::verse_repository::VerseSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamputtError {
    /// The requested refrain is outside `1..=total` or could not be resolved.
    InvalidSelection { requested: u32, total: u32 },
    /// A regular verse in `1..=total` is missing from the source.
    UnresolvedVerse(u32),
    EmptySequence,
}

impl Display for SamputtError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SamputtError::InvalidSelection { requested, total } => write!(
                f,
                "Verse {requested} cannot be used for Samputt; enter a number between 1 and {total}"
            ),
            SamputtError::UnresolvedVerse(number) => {
                write!(f, "Verse {number} is missing from the dataset")
            }
            SamputtError::EmptySequence => write!(f, "The reading sequence is empty"),
        }
    }
}

impl std::error::Error for SamputtError {}

/// One step of a Samputt reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceEntry {
    pub verse: Arc<Verse>,
    /// True only for inserted refrain copies.
    pub is_repeated_verse: bool,
    /// 1-based index in the final sequence.
    pub position: usize,
}

/// Immutable Samputt sequence for one choice of refrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SamputtSequence {
    samputt_verse: u32,
    entries: Vec<SequenceEntry>,
}

impl SamputtSequence {
    /// Builds the sequence for verses `1..=total` with `samputt_verse` as refrain.
    ///
    /// The refrain is resolved once and shared by every inserted entry.
    pub fn build<S>(total: u32, samputt_verse: u32, source: &S) -> Result<Self, SamputtError>
    where
        S: VerseSource + ?Sized,
    {
        if samputt_verse < 1 || samputt_verse > total {
            return Err(SamputtError::InvalidSelection {
                requested: samputt_verse,
                total,
            });
        }

        let refrain = source
            .verse_by_number(samputt_verse)
            .ok_or(SamputtError::InvalidSelection {
                requested: samputt_verse,
                total,
            })?;

        // Reserve only what the source can back; a larger `total` fails below.
        let backed = source.verse_count().min(total as usize);
        let mut entries = Vec::with_capacity(2 * backed);
        let mut push = |verse: Arc<Verse>, is_repeated_verse: bool| {
            let position = entries.len() + 1;
            entries.push(SequenceEntry {
                verse,
                is_repeated_verse,
                position,
            });
        };

        for number in 1..=total {
            let verse = source
                .verse_by_number(number)
                .ok_or(SamputtError::UnresolvedVerse(number))?;
            push(verse, false);

            if number < total {
                push(Arc::clone(&refrain), true);
            }
        }
        push(refrain, true);

        debug!(
            "Built Samputt sequence: {} verses, refrain {}, {} entries",
            total,
            samputt_verse,
            entries.len()
        );

        Ok(Self {
            samputt_verse,
            entries,
        })
    }

    pub fn samputt_verse(&self) -> u32 {
        self.samputt_verse
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SequenceEntry> {
        self.entries.get(index)
    }
}

/// Linear position over a shared [`SamputtSequence`].
///
/// Not synchronized: one owner steps it at a time.
#[derive(Debug, Clone)]
pub struct SequenceCursor {
    sequence: Arc<SamputtSequence>,
    index: usize,
}

impl SequenceCursor {
    pub fn new(sequence: Arc<SamputtSequence>) -> Self {
        Self { sequence, index: 0 }
    }

    pub fn sequence(&self) -> &Arc<SamputtSequence> {
        &self.sequence
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Result<&SequenceEntry, SamputtError> {
        self.sequence
            .get(self.index)
            .ok_or(SamputtError::EmptySequence)
    }

    /// `(position, total)` for display, position being 1-based.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.sequence.len())
    }
}

impl Navigable for SequenceCursor {
    fn can_step_backward(&self) -> bool {
        self.index > 0
    }

    fn can_step_forward(&self) -> bool {
        self.index + 1 < self.sequence.len()
    }

    fn step_backward(&mut self) -> bool {
        if !self.can_step_backward() {
            return false;
        }
        self.index -= 1;
        true
    }

    fn step_forward(&mut self) -> bool {
        if !self.can_step_forward() {
            return false;
        }
        self.index += 1;
        true
    }
}

use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::font_size::FontSizeState;
use crate::navigation::{DragPhase, Navigable, NavigationIntent, SequentialReader, SwipeDetector};
use crate::reader_config::ReaderConfig;
use crate::samputt::{SamputtSequence, SequenceCursor};
use crate::selection::{self, SelectionError, SelectionPreview};
use crate::verse_model::{Language, Verse};
use crate::verse_repository::VerseRepository;

/// What the verse detail screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerseView {
    pub verse: Arc<Verse>,
    pub language: Language,
    pub text: String,
    pub position: u32,
    pub total: u32,
    pub can_step_backward: bool,
    pub can_step_forward: bool,
}

/// What the Samputt reading screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamputtView {
    pub samputt_verse: u32,
    pub verse: Arc<Verse>,
    pub is_repeated_verse: bool,
    pub label: String,
    pub role: &'static str,
    pub position: usize,
    pub total: usize,
    pub progress_text: String,
    pub can_step_backward: bool,
    pub can_step_forward: bool,
}

/// Everything behind one FFI reader handle.
///
/// The repository is read-only for the handle's lifetime. At most one verse
/// reading and one Samputt session are active at a time; picking a new
/// Samputt verse replaces the previous session.
pub struct ReaderState {
    repository: VerseRepository,
    config: ReaderConfig,
    swipe: SwipeDetector,
    font_size: FontSizeState,
    language: Language,
    reading: Option<SequentialReader>,
    samputt: Option<SequenceCursor>,
}

impl ReaderState {
    pub fn new(repository: VerseRepository, config: ReaderConfig) -> Result<Self, AppResponse> {
        config.validate()?;
        info!(
            "Reader ready: {} verses, font size {}, language {:?}",
            repository.count(),
            config.font_size.name(),
            config.language
        );

        Ok(Self {
            swipe: SwipeDetector::new(config.swipe_threshold),
            font_size: FontSizeState::new(config.font_size),
            language: config.language,
            repository,
            config,
            reading: None,
            samputt: None,
        })
    }

    pub fn repository(&self) -> &VerseRepository {
        &self.repository
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn total_verses(&self) -> u32 {
        u32::try_from(self.repository.count()).unwrap_or(u32::MAX)
    }

    pub fn font_size(&self) -> &FontSizeState {
        &self.font_size
    }

    pub fn font_size_mut(&mut self) -> &mut FontSizeState {
        &mut self.font_size
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    // ---- sequential reading ----

    pub fn open_verse(&mut self, verse_number: u32) -> Result<VerseView, AppResponse> {
        let reader = SequentialReader::new(verse_number, self.total_verses()).ok_or_else(|| {
            AppResponse::NotFound(format!("No verse found with number: {verse_number}"))
        })?;
        self.reading = Some(reader);
        self.verse_view()
    }

    pub fn verse_view(&self) -> Result<VerseView, AppResponse> {
        let reader = self
            .reading
            .as_ref()
            .ok_or_else(|| AppResponse::BadRequest("No verse is open".to_string()))?;

        let verse = self
            .repository
            .get_by_number(reader.current())
            .ok_or_else(|| {
                AppResponse::DataIntegrityError(format!(
                    "Verse {} is missing from the dataset",
                    reader.current()
                ))
            })?;

        Ok(VerseView {
            text: verse.text_for(self.language).to_string(),
            verse,
            language: self.language,
            position: reader.current(),
            total: reader.total(),
            can_step_backward: reader.can_step_backward(),
            can_step_forward: reader.can_step_forward(),
        })
    }

    pub fn navigate_verse(&mut self, intent: NavigationIntent) -> Result<VerseView, AppResponse> {
        let reader = self
            .reading
            .as_mut()
            .ok_or_else(|| AppResponse::BadRequest("No verse is open".to_string()))?;
        reader.navigate(intent);
        self.verse_view()
    }

    /// Applies a completed drag to the verse reader; short drags leave it in place.
    pub fn swipe_verse(&mut self, translation_x: f64) -> Result<VerseView, AppResponse> {
        match self.swipe.intent(DragPhase::Ended, translation_x) {
            Some(intent) => self.navigate_verse(intent),
            None => self.verse_view(),
        }
    }

    // ---- samputt reading ----

    pub fn validate_selection(&self, input: &str) -> Result<SelectionPreview, SelectionError> {
        selection::preview(&self.repository, input)
    }

    pub fn quick_select(&self) -> Vec<u32> {
        selection::quick_select(&self.config.quick_select, self.total_verses())
    }

    /// Builds a fresh sequence for `samputt_verse`, replacing any running session.
    pub fn start_samputt(&mut self, samputt_verse: u32) -> Result<SamputtView, AppResponse> {
        let sequence =
            SamputtSequence::build(self.total_verses(), samputt_verse, &self.repository)?;
        info!(
            "Samputt session started with verse {} ({} entries)",
            samputt_verse,
            sequence.len()
        );
        self.samputt = Some(SequenceCursor::new(Arc::new(sequence)));
        self.samputt_view()
    }

    pub fn samputt_view(&self) -> Result<SamputtView, AppResponse> {
        let cursor = self
            .samputt
            .as_ref()
            .ok_or_else(|| AppResponse::BadRequest("No Samputt session is active".to_string()))?;

        let entry = cursor.current()?;
        let samputt_verse = cursor.sequence().samputt_verse();
        let (position, total) = cursor.progress();

        let label = if entry.is_repeated_verse {
            format!("Samputt Verse {samputt_verse}")
        } else {
            match entry.verse.verse_number {
                Some(number) => format!("Verse {number}"),
                None => "Verse".to_string(),
            }
        };

        Ok(SamputtView {
            samputt_verse,
            verse: Arc::clone(&entry.verse),
            is_repeated_verse: entry.is_repeated_verse,
            label,
            role: if entry.is_repeated_verse { "Samputt" } else { "Regular" },
            position,
            total,
            progress_text: format!("{position} of {total}"),
            can_step_backward: cursor.can_step_backward(),
            can_step_forward: cursor.can_step_forward(),
        })
    }

    pub fn navigate_samputt(&mut self, intent: NavigationIntent) -> Result<SamputtView, AppResponse> {
        let cursor = self
            .samputt
            .as_mut()
            .ok_or_else(|| AppResponse::BadRequest("No Samputt session is active".to_string()))?;
        cursor.navigate(intent);
        self.samputt_view()
    }

    pub fn swipe_samputt(&mut self, translation_x: f64) -> Result<SamputtView, AppResponse> {
        match self.swipe.intent(DragPhase::Ended, translation_x) {
            Some(intent) => self.navigate_samputt(intent),
            None => self.samputt_view(),
        }
    }

    /// Discards the running session. Returns whether one was active.
    pub fn end_samputt(&mut self) -> bool {
        let ended = self.samputt.take().is_some();
        debug!("Samputt session ended: {ended}");
        ended
    }
}

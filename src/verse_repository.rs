//! Read-only access to the bundled stotra document.
//!
//! [`VerseRepository`] is built once from the document and never mutated.
//! Pages are held behind [`Arc`] so sequences and readers can point at a
//! verse without copying its text.
//!
//! Code that only needs "how many verses" and "give me verse n" should be
//! written against [`VerseSource`] so it can run against a test double.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::verse_model::{AppInfo, PageKind, StotraDocument, Verse};

/// Minimal lookup contract needed to build reading sequences.
pub trait VerseSource {
    /// Number of pages of kind [`PageKind::Verse`].
    fn verse_count(&self) -> usize;

    /// Resolves a 1-based verse number.
    fn verse_by_number(&self, verse_number: u32) -> Option<Arc<Verse>>;
}

/// In-memory repository over the validated document.
#[derive(Debug, Clone)]
pub struct VerseRepository {
    title: String,
    subtitle: String,
    description: String,
    author: String,
    total_pages: u32,
    pages: Vec<Arc<Verse>>,
}

impl VerseRepository {
    /// Parses and validates a document from its JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, AppResponse> {
        let document: StotraDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Reads the document from disk, then behaves like [`Self::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppResponse> {
        let path = path.as_ref();
        debug!("Loading stotra document from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_document(document: StotraDocument) -> Result<Self, AppResponse> {
        let mut seen = HashSet::new();

        for page in &document.pages {
            match (page.kind, page.verse_number) {
                (PageKind::Verse, Some(number)) => {
                    if number == 0 {
                        return Err(AppResponse::ValidationError(format!(
                            "Page {} has verse number 0; verse numbers start at 1",
                            page.page_number
                        )));
                    }
                    if !seen.insert(number) {
                        return Err(AppResponse::ValidationError(format!(
                            "Verse number {number} appears more than once"
                        )));
                    }
                }
                (PageKind::Verse, None) => {
                    return Err(AppResponse::ValidationError(format!(
                        "Verse page {} has no verse_number",
                        page.page_number
                    )));
                }
                (PageKind::Introduction, Some(number)) => {
                    return Err(AppResponse::ValidationError(format!(
                        "Introduction page {} carries verse_number {number}",
                        page.page_number
                    )));
                }
                (PageKind::Introduction, None) => {}
            }
        }

        if document.total_pages as usize != document.pages.len() {
            warn!(
                "Document declares {} pages but contains {}",
                document.total_pages,
                document.pages.len()
            );
        }

        let repository = Self {
            title: document.title,
            subtitle: document.subtitle,
            description: document.description,
            author: document.author,
            total_pages: document.total_pages,
            pages: document.pages.into_iter().map(Arc::new).collect(),
        };

        info!(
            "Loaded '{}': {} pages, {} verses",
            repository.title,
            repository.pages.len(),
            repository.count()
        );

        Ok(repository)
    }

    /// Number of verse pages, introductions excluded.
    pub fn count(&self) -> usize {
        self.pages.iter().filter(|page| page.is_verse()).count()
    }

    pub fn get_by_number(&self, verse_number: u32) -> Option<Arc<Verse>> {
        self.pages
            .iter()
            .find(|page| page.verse_number == Some(verse_number))
            .cloned()
    }

    pub fn get_by_page(&self, page_number: u32) -> Option<Arc<Verse>> {
        self.pages
            .iter()
            .find(|page| page.page_number == page_number)
            .cloned()
    }

    /// Substring search over all four text fields of every page.
    ///
    /// Introduction pages are included; see [`Self::search_verses`] for the
    /// verse-only variant used by the browse list.
    pub fn search(&self, query: &str, case_insensitive: bool) -> Vec<Arc<Verse>> {
        let needle = if case_insensitive {
            query.to_lowercase()
        } else {
            query.to_string()
        };

        self.pages
            .iter()
            .filter(|page| page.matches(&needle, case_insensitive))
            .cloned()
            .collect()
    }

    /// Case-insensitive search restricted to verses. A blank query lists every verse.
    pub fn search_verses(&self, query: &str) -> Vec<Arc<Verse>> {
        if query.trim().is_empty() {
            return self.all_verses();
        }

        self.search(query, true)
            .into_iter()
            .filter(|page| page.is_verse())
            .collect()
    }

    /// Verse pages in document order.
    pub fn all_verses(&self) -> Vec<Arc<Verse>> {
        self.pages.iter().filter(|page| page.is_verse()).cloned().collect()
    }

    pub fn all_pages(&self) -> &[Arc<Verse>] {
        &self.pages
    }

    pub fn introduction(&self) -> Option<Arc<Verse>> {
        self.pages
            .iter()
            .find(|page| page.kind == PageKind::Introduction)
            .cloned()
    }

    pub fn app_info(&self) -> AppInfo {
        AppInfo {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            total_pages: self.total_pages,
            total_verses: self.count(),
        }
    }
}

impl VerseSource for VerseRepository {
    fn verse_count(&self) -> usize {
        self.count()
    }

    fn verse_by_number(&self, verse_number: u32) -> Option<Arc<Verse>> {
        self.get_by_number(verse_number)
    }
}

//! Data model definitions for the bundled stotra document.
//!
//! The host application ships a single static JSON document describing the
//! text: a few metadata fields and an ordered list of pages. Each page is
//! either an introduction or a numbered verse carrying four parallel
//! renderings (Sanskrit, transliteration, Hindi and English meaning).
//!
//! The types here mirror that document field-for-field so it can be
//! deserialized with `serde_json` without any intermediate representation.

use serde::{Deserialize, Serialize};

/// Kind of a page in the bundled document.
///
/// Serialized in lowercase, matching the `type` field of the dataset:
///
/// ```rust
/// use bhaktamar_core::verse_model::PageKind;
///
/// let kind: PageKind = serde_json::from_str("\"verse\"")?;
/// assert_eq!(kind, PageKind::Verse);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Introduction,
    Verse,
}

/// One page of the stotra: an introduction or a numbered verse.
///
/// `verse_number` is present exactly when `kind` is [`PageKind::Verse`];
/// the repository rejects documents that break this rule when loading.
///
/// # Examples
///
/// ```rust
/// use bhaktamar_core::verse_model::{PageKind, Verse};
///
/// let json = r#"{
///     "page_number": 2,
///     "type": "verse",
///     "content": "line one\nline two",
///     "transliteration": "bhaktāmara",
///     "hindi_meaning": "अर्थ",
///     "english_meaning": "meaning",
///     "verse_number": 1
/// }"#;
///
/// let verse: Verse = serde_json::from_str(json)?;
/// assert_eq!(verse.kind, PageKind::Verse);
/// assert_eq!(verse.verse_number, Some(1));
/// assert_eq!(verse.first_line(), "line one");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Position of the page in the printed text, starting at 1.
    pub page_number: u32,

    /// Introduction or verse.
    #[serde(rename = "type")]
    pub kind: PageKind,

    /// Sanskrit text. Lines are separated by `\n`.
    pub content: String,

    /// Roman transliteration of `content`.
    pub transliteration: String,

    pub hindi_meaning: String,

    pub english_meaning: String,

    /// Sequential verse number; `None` for introduction pages.
    #[serde(default)]
    pub verse_number: Option<u32>,
}

impl Verse {
    pub fn is_verse(&self) -> bool {
        self.kind == PageKind::Verse
    }

    /// Returns the rendering selected by `language`.
    pub fn text_for(&self, language: Language) -> &str {
        match language {
            Language::Sanskrit => &self.content,
            Language::Transliteration => &self.transliteration,
            Language::Hindi => &self.hindi_meaning,
            Language::English => &self.english_meaning,
        }
    }

    /// First line of the Sanskrit text, used for list and selection previews.
    pub fn first_line(&self) -> &str {
        self.content.lines().next().unwrap_or_default()
    }

    /// True when any of the four text fields contains `needle`.
    ///
    /// With `case_insensitive` set, both sides are lowercased first; `needle`
    /// is expected to be lowercased by the caller already.
    pub(crate) fn matches(&self, needle: &str, case_insensitive: bool) -> bool {
        [
            &self.content,
            &self.hindi_meaning,
            &self.english_meaning,
            &self.transliteration,
        ]
        .into_iter()
        .any(|field| {
            if case_insensitive {
                field.to_lowercase().contains(needle)
            } else {
                field.contains(needle)
            }
        })
    }
}

/// The whole bundled document as shipped with the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StotraDocument {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub total_pages: u32,
    pub pages: Vec<Verse>,
}

/// Metadata shown on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub total_pages: u32,
    pub total_verses: usize,
}

/// Which of the four parallel renderings a reader displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Sanskrit,
    Transliteration,
    Hindi,
    English,
}

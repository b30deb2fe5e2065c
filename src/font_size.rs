//! Font-size presets for the four text fields and their labels.

use serde::{Deserialize, Serialize};

/// Preset levels, smallest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSizeLevel {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl FontSizeLevel {
    pub const ALL: [FontSizeLevel; 4] = [
        FontSizeLevel::Small,
        FontSizeLevel::Medium,
        FontSizeLevel::Large,
        FontSizeLevel::ExtraLarge,
    ];

    pub fn sizes(self) -> FontSizes {
        match self {
            FontSizeLevel::Small => FontSizes {
                sanskrit: 16,
                transliteration: 14,
                hindi: 14,
                english: 14,
                labels: 12,
            },
            FontSizeLevel::Medium => FontSizes {
                sanskrit: 18,
                transliteration: 16,
                hindi: 16,
                english: 16,
                labels: 14,
            },
            FontSizeLevel::Large => FontSizes {
                sanskrit: 20,
                transliteration: 18,
                hindi: 18,
                english: 18,
                labels: 16,
            },
            FontSizeLevel::ExtraLarge => FontSizes {
                sanskrit: 24,
                transliteration: 20,
                hindi: 20,
                english: 20,
                labels: 18,
            },
        }
    }

    pub fn next(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|&level| level == self)?;
        Self::ALL.get(index + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|&level| level == self)?;
        index.checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Parses the wire name (`"small"`, `"medium"`, `"large"`, `"extra-large"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            FontSizeLevel::Small => "small",
            FontSizeLevel::Medium => "medium",
            FontSizeLevel::Large => "large",
            FontSizeLevel::ExtraLarge => "extra-large",
        }
    }
}

/// Point sizes for one preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
    pub sanskrit: u16,
    pub transliteration: u16,
    pub hindi: u16,
    pub english: u16,
    pub labels: u16,
}

impl FontSizes {
    /// Text lines are laid out at 1.5x their font size.
    pub fn line_height(size: u16) -> f32 {
        f32::from(size) * 1.5
    }
}

/// Current preset plus the step operations the size controls use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FontSizeState {
    level: FontSizeLevel,
}

impl FontSizeState {
    pub fn new(level: FontSizeLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> FontSizeLevel {
        self.level
    }

    pub fn sizes(&self) -> FontSizes {
        self.level.sizes()
    }

    /// Saturates at [`FontSizeLevel::ExtraLarge`].
    pub fn increase(&mut self) -> bool {
        match self.level.next() {
            Some(level) => {
                self.level = level;
                true
            }
            None => false,
        }
    }

    /// Saturates at [`FontSizeLevel::Small`].
    pub fn decrease(&mut self) -> bool {
        match self.level.previous() {
            Some(level) => {
                self.level = level;
                true
            }
            None => false,
        }
    }

    pub fn set_level(&mut self, level: FontSizeLevel) {
        self.level = level;
    }
}

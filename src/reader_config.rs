//! Host-supplied reader configuration.
//!
//! Every field is optional in the JSON; missing fields take the defaults
//! below, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::font_size::FontSizeLevel;
use crate::navigation::SWIPE_THRESHOLD;
use crate::selection::QUICK_SELECT_VERSES;
use crate::verse_model::Language;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub font_size: FontSizeLevel,
    pub language: Language,
    pub swipe_threshold: f64,
    pub quick_select: Vec<u32>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            font_size: FontSizeLevel::default(),
            language: Language::default(),
            swipe_threshold: SWIPE_THRESHOLD,
            quick_select: QUICK_SELECT_VERSES.to_vec(),
        }
    }
}

impl ReaderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, AppResponse> {
        let config: ReaderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppResponse> {
        if !self.swipe_threshold.is_finite() || self.swipe_threshold <= 0.0 {
            return Err(AppResponse::ValidationError(format!(
                "swipe_threshold must be a positive number, got {}",
                self.swipe_threshold
            )));
        }
        Ok(())
    }
}

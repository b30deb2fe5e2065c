//! Directional navigation shared by the reading modes.
//!
//! Buttons and swipes both reduce to a [`NavigationIntent`]; readers only
//! ever see those two events.

use log::debug;
use serde::{Deserialize, Serialize};

/// Minimum horizontal travel, in host layout units, for a swipe to count.
pub const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationIntent {
    NavigateBackward,
    NavigateForward,
}

impl NavigationIntent {
    /// Maps the FFI direction code: `-1` backward, `1` forward.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(NavigationIntent::NavigateBackward),
            1 => Some(NavigationIntent::NavigateForward),
            _ => None,
        }
    }
}

/// Lifecycle phase of a drag as reported by the host gesture system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    Began,
    Active,
    Ended,
    Cancelled,
}

/// Turns completed horizontal drags into navigation intents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeDetector {
    threshold: f64,
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self {
            threshold: SWIPE_THRESHOLD,
        }
    }
}

impl SwipeDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Only [`DragPhase::Ended`] is evaluated. Dragging right (positive
    /// travel) goes back, dragging left goes forward; travel of exactly the
    /// threshold or less yields nothing.
    pub fn intent(&self, phase: DragPhase, translation_x: f64) -> Option<NavigationIntent> {
        if phase != DragPhase::Ended {
            return None;
        }

        if translation_x > self.threshold {
            Some(NavigationIntent::NavigateBackward)
        } else if translation_x < -self.threshold {
            Some(NavigationIntent::NavigateForward)
        } else {
            None
        }
    }
}

/// Intent for a completed drag using the default threshold.
pub fn intent_from_swipe(translation_x: f64) -> Option<NavigationIntent> {
    SwipeDetector::default().intent(DragPhase::Ended, translation_x)
}

/// A bounded, linear reading position.
///
/// Steps at a boundary are no-ops; they report `false` instead of failing.
pub trait Navigable {
    fn can_step_backward(&self) -> bool;
    fn can_step_forward(&self) -> bool;

    /// Returns whether the position moved.
    fn step_backward(&mut self) -> bool;

    /// Returns whether the position moved.
    fn step_forward(&mut self) -> bool;

    fn navigate(&mut self, intent: NavigationIntent) -> bool {
        let moved = match intent {
            NavigationIntent::NavigateBackward => self.step_backward(),
            NavigationIntent::NavigateForward => self.step_forward(),
        };
        debug!("navigate {intent:?}: moved={moved}");
        moved
    }
}

/// Verse-by-verse reading over `1..=total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequentialReader {
    current: u32,
    total: u32,
}

impl SequentialReader {
    /// Returns `None` when `start` is outside `1..=total`.
    pub fn new(start: u32, total: u32) -> Option<Self> {
        (1..=total).contains(&start).then_some(Self {
            current: start,
            total,
        })
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

impl Navigable for SequentialReader {
    fn can_step_backward(&self) -> bool {
        self.current > 1
    }

    fn can_step_forward(&self) -> bool {
        self.current < self.total
    }

    fn step_backward(&mut self) -> bool {
        if !self.can_step_backward() {
            return false;
        }
        self.current -= 1;
        true
    }

    fn step_forward(&mut self) -> bool {
        if !self.can_step_forward() {
            return false;
        }
        self.current += 1;
        true
    }
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ids::{LanguageId, LessonId};

/// Aggregated completion for one language, useful for UI.
///
/// `percent` is the exact ratio `100 * completed / total` with no rounding
/// applied; use [`LanguageProgress::whole_percent`] for a display value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LanguageProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

impl LanguageProgress {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            // Lesson counts are tiny; the conversion is exact.
            #[allow(clippy::cast_precision_loss)]
            let ratio = completed as f64 / total as f64;
            (ratio * 100.0).clamp(0.0, 100.0)
        };

        Self {
            completed,
            total,
            percent,
        }
    }

    /// Percentage rounded half-up to the nearest integer.
    #[must_use]
    pub fn whole_percent(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = self.percent.round() as u8;
        rounded
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

/// Completed lessons, keyed by `(language, lesson)`.
///
/// The set only grows. It trusts its caller to have checked access before
/// marking anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressSet {
    completed: BTreeSet<(LanguageId, LessonId)>,
}

impl ProgressSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion. Returns `true` if the key was not present before.
    pub fn mark_completed(&mut self, language: &LanguageId, lesson: LessonId) -> bool {
        self.completed.insert((language.clone(), lesson))
    }

    #[must_use]
    pub fn is_completed(&self, language: &LanguageId, lesson: LessonId) -> bool {
        self.completed.contains(&(language.clone(), lesson))
    }

    /// Number of completed lessons recorded for `language`.
    #[must_use]
    pub fn completed_in(&self, language: &LanguageId) -> usize {
        self.completed
            .iter()
            .filter(|(lang, _)| lang == language)
            .count()
    }

    #[must_use]
    pub fn progress_for(&self, language: &LanguageId, total_lessons: usize) -> LanguageProgress {
        LanguageProgress::new(self.completed_in(language), total_lessons)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageId, LessonId)> {
        self.completed.iter().map(|(lang, lesson)| (lang, *lesson))
    }
}

use serde::Serialize;

use lingua_core::access::is_locked;
use lingua_core::model::{
    DisplayMeta, LanguageId, LanguageProgress, Lesson, LessonId, PlanOffer, SubscriptionPlan,
};
use lingua_core::{Catalog, CatalogStats};

use super::state::SessionState;

/// Presentation-agnostic snapshot of a session.
///
/// This is intentionally **not** a UI view-model: no formatted strings, no
/// layout hints. Display metadata is passed through from the catalog as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub languages: Vec<LanguageTab>,
    pub selected: LanguageId,
    pub is_premium: bool,
    pub lessons: Vec<LessonView>,
    pub progress: LanguageProgress,
    pub stats: CatalogStats,
}

/// One entry of the language picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageTab {
    pub id: LanguageId,
    pub name: String,
    pub display: DisplayMeta,
    pub selected: bool,
}

/// A lesson of the selected language with its derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonView {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub locked: bool,
    pub completed: bool,
    pub playing: bool,
}

/// A subscription offer together with its position relative to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub offer: PlanOffer,
    pub savings_percent: Option<u8>,
    pub active: bool,
}

impl SessionView {
    /// Derive the view from current state. Nothing here is cached.
    #[must_use]
    pub fn build(catalog: &Catalog, state: &SessionState) -> Self {
        let language = catalog
            .language(&state.selection)
            .unwrap_or_else(|_| catalog.first_language());

        let languages = catalog
            .all()
            .iter()
            .map(|lang| LanguageTab {
                id: lang.id().clone(),
                name: lang.name().to_owned(),
                display: lang.display().clone(),
                selected: lang.id() == language.id(),
            })
            .collect();

        let lessons = language
            .lessons()
            .iter()
            .map(|lesson| LessonView {
                locked: is_locked(lesson, &state.subscription),
                completed: state.progress.is_completed(language.id(), lesson.id()),
                playing: state.playback.is_playing_in(language.id(), lesson.audio()),
                lesson: lesson.clone(),
            })
            .collect();

        Self {
            languages,
            selected: language.id().clone(),
            is_premium: state.subscription.is_premium(),
            lessons,
            progress: state
                .progress
                .progress_for(language.id(), language.lessons().len()),
            stats: catalog.stats(),
        }
    }

    #[must_use]
    pub fn lesson(&self, id: LessonId) -> Option<&LessonView> {
        self.lessons.iter().find(|view| view.lesson.id() == id)
    }
}

impl PlanView {
    #[must_use]
    pub fn list(offers: Vec<PlanOffer>, current: Option<SubscriptionPlan>) -> Vec<Self> {
        let monthly = offers
            .iter()
            .find(|offer| offer.plan == SubscriptionPlan::Monthly)
            .cloned();

        offers
            .into_iter()
            .map(|offer| PlanView {
                savings_percent: monthly
                    .as_ref()
                    .and_then(|monthly| offer.savings_percent(monthly)),
                active: current == Some(offer.plan),
                offer,
            })
            .collect()
    }
}

use std::sync::Arc;

use tracing::{debug, info};

use lingua_core::access::is_locked;
use lingua_core::model::{LanguageId, LessonId, SubscriptionPlan, plan_offers};
use lingua_core::{Catalog, Clock};

use super::state::SessionState;
use super::view::{PlanView, SessionView};
use crate::error::SessionError;
use crate::playback::{PlaybackCoordinator, SpeechEvent, speech_language_code};

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Why an action left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    /// The lesson is paid content and the session is not premium.
    Locked,
    AlreadyCompleted,
    AlreadyPremium,
    /// `stop` was requested with nothing playing.
    NothingPlaying,
    /// The speech engine refused to start.
    SpeechUnavailable,
}

/// Result of an accepted action. Declines are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Performed,
    Declined(DeclineReason),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_performed(&self) -> bool {
        matches!(self, Self::Performed)
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// The single entry point for learner actions.
///
/// Each action mutates at most one of subscription, progress, or playback,
/// and runs to completion before returning. Reads go through
/// [`current_view`](Self::current_view), which recomputes every derived flag.
#[derive(Debug)]
pub struct SessionController {
    catalog: Arc<Catalog>,
    clock: Clock,
    playback: PlaybackCoordinator,
    state: SessionState,
}

impl SessionController {
    /// Start a free-tier session on the catalog's first language.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, playback: PlaybackCoordinator, clock: Clock) -> Self {
        let selection = catalog.first_language().id().clone();
        Self {
            catalog,
            clock,
            playback,
            state: SessionState::new(selection),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn selected_language(&self) -> &LanguageId {
        &self.state.selection
    }

    /// Switch the selected language. Progress and playback are left alone.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` for ids missing from the catalog; the
    /// selection is unchanged in that case.
    pub fn select_language(&mut self, id: &LanguageId) -> Result<(), SessionError> {
        let language = self.catalog.language(id)?;
        if language.id() != &self.state.selection {
            info!(from = %self.state.selection, to = %language.id(), "language selected");
            self.state.selection = language.id().clone();
        }
        Ok(())
    }

    /// Unlock every lesson. There is no way back.
    pub fn upgrade_to_premium(&mut self) -> ActionOutcome {
        self.upgrade(None)
    }

    /// Like [`upgrade_to_premium`](Self::upgrade_to_premium), remembering the chosen plan.
    pub fn upgrade_with_plan(&mut self, plan: SubscriptionPlan) -> ActionOutcome {
        self.upgrade(Some(plan))
    }

    fn upgrade(&mut self, plan: Option<SubscriptionPlan>) -> ActionOutcome {
        if self.state.subscription.upgrade(plan, self.clock.now()) {
            info!(plan = plan.map_or("unspecified", |p| p.as_str()), "upgraded to premium");
            ActionOutcome::Performed
        } else {
            debug!("already premium");
            ActionOutcome::Declined(DeclineReason::AlreadyPremium)
        }
    }

    /// Speak a lesson of the selected language, if it is unlocked.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` when the lesson is not part of the
    /// selected language.
    pub fn request_play(&mut self, lesson: LessonId) -> Result<ActionOutcome, SessionError> {
        let language = &self.state.selection;
        let lesson = self.catalog.lesson(language, lesson)?;

        if is_locked(lesson, &self.state.subscription) {
            debug!(%language, lesson = %lesson.id(), "play declined: locked");
            return Ok(ActionOutcome::Declined(DeclineReason::Locked));
        }

        let started = self.playback.play(
            &mut self.state.playback,
            language,
            lesson.audio(),
            lesson.content(),
            speech_language_code(language),
        );

        Ok(match started {
            Some(_) => ActionOutcome::Performed,
            None => ActionOutcome::Declined(DeclineReason::SpeechUnavailable),
        })
    }

    /// Mark a lesson of the selected language as completed, if it is unlocked.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` when the lesson is not part of the
    /// selected language.
    pub fn request_complete(&mut self, lesson: LessonId) -> Result<ActionOutcome, SessionError> {
        let language = &self.state.selection;
        let lesson = self.catalog.lesson(language, lesson)?;

        if is_locked(lesson, &self.state.subscription) {
            debug!(%language, lesson = %lesson.id(), "complete declined: locked");
            return Ok(ActionOutcome::Declined(DeclineReason::Locked));
        }

        if self.state.progress.mark_completed(language, lesson.id()) {
            info!(%language, lesson = %lesson.id(), "lesson completed");
            Ok(ActionOutcome::Performed)
        } else {
            Ok(ActionOutcome::Declined(DeclineReason::AlreadyCompleted))
        }
    }

    /// Halt speech immediately. Safe to call when idle.
    pub fn stop_playback(&mut self) -> ActionOutcome {
        if self.playback.stop(&mut self.state.playback) {
            ActionOutcome::Performed
        } else {
            ActionOutcome::Declined(DeclineReason::NothingPlaying)
        }
    }

    /// Deliver a notification from the speech engine.
    pub fn on_speech_event(&mut self, event: &SpeechEvent) -> bool {
        self.playback.handle_event(&mut self.state.playback, event)
    }

    #[must_use]
    pub fn current_view(&self) -> SessionView {
        SessionView::build(&self.catalog, &self.state)
    }

    /// Subscription offers, flagging the plan this session is on.
    #[must_use]
    pub fn plans(&self) -> Vec<PlanView> {
        PlanView::list(plan_offers(), self.state.subscription.plan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::model::{AudioCueId, SubscriptionState};
    use lingua_core::time::{fixed_clock, fixed_now};

    use crate::playback::{RecordingSpeech, SpeechCall, UtteranceId};

    fn controller() -> (SessionController, RecordingSpeech) {
        let speech = RecordingSpeech::new();
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let playback = PlaybackCoordinator::new(Box::new(speech.clone()));
        (SessionController::new(catalog, playback, fixed_clock()), speech)
    }

    fn lang(id: &str) -> LanguageId {
        LanguageId::new(id)
    }

    #[test]
    fn starts_free_on_first_language() {
        let (session, _) = controller();
        assert_eq!(session.selected_language(), &lang("english"));
        assert_eq!(session.state().subscription, SubscriptionState::Free);
        assert!(session.state().progress.is_empty());
        assert!(session.state().playback.is_idle());
    }

    #[test]
    fn select_unknown_language_is_not_found_and_keeps_selection() {
        let (mut session, _) = controller();
        session.select_language(&lang("japanese")).unwrap();

        let err = session.select_language(&lang("klingon")).unwrap_err();
        assert!(matches!(err, SessionError::NotFound(ref e) if e.is_not_found()));
        assert_eq!(session.selected_language(), &lang("japanese"));
    }

    #[test]
    fn locked_lesson_cannot_be_played_or_completed() {
        let (mut session, speech) = controller();
        let before = session.state().clone();

        let play = session.request_play(LessonId::new(3)).unwrap();
        let complete = session.request_complete(LessonId::new(4)).unwrap();

        assert_eq!(play, ActionOutcome::Declined(DeclineReason::Locked));
        assert_eq!(complete, ActionOutcome::Declined(DeclineReason::Locked));
        assert_eq!(session.state(), &before);
        assert!(speech.calls().is_empty());
    }

    #[test]
    fn play_speaks_content_in_language_code() {
        let (mut session, speech) = controller();
        session.select_language(&lang("japanese")).unwrap();

        let outcome = session.request_play(LessonId::new(1)).unwrap();

        assert!(outcome.is_performed());
        let utterance = speech.last_spoken().unwrap();
        assert_eq!(utterance.text, "こんにちは (Konnichiwa)");
        assert_eq!(utterance.language_code, "ja-JP");
        assert!(session.state().playback.is_playing(&AudioCueId::new("konnichiwa")));
    }

    #[test]
    fn upgrade_unlocks_and_records_plan() {
        let (mut session, _) = controller();

        assert!(session.upgrade_with_plan(SubscriptionPlan::Lifetime).is_performed());
        assert_eq!(
            session.upgrade_to_premium(),
            ActionOutcome::Declined(DeclineReason::AlreadyPremium)
        );
        assert_eq!(
            session.state().subscription,
            SubscriptionState::Premium {
                plan: Some(SubscriptionPlan::Lifetime),
                since: fixed_now(),
            }
        );
        assert!(session.current_view().lessons.iter().all(|lesson| !lesson.locked));

        let plans = session.plans();
        let active: Vec<_> = plans.iter().filter(|p| p.active).map(|p| p.offer.plan).collect();
        assert_eq!(active, vec![SubscriptionPlan::Lifetime]);
    }

    #[test]
    fn complete_twice_is_declined_the_second_time() {
        let (mut session, _) = controller();
        assert!(session.request_complete(LessonId::new(1)).unwrap().is_performed());
        assert_eq!(
            session.request_complete(LessonId::new(1)).unwrap(),
            ActionOutcome::Declined(DeclineReason::AlreadyCompleted)
        );
        assert_eq!(session.state().progress.len(), 1);
    }

    #[test]
    fn unknown_lesson_is_not_found() {
        let (mut session, _) = controller();
        assert!(session.request_play(LessonId::new(99)).is_err());
        assert!(session.request_complete(LessonId::new(99)).is_err());
    }

    #[test]
    fn playback_survives_language_switch() {
        let (mut session, _) = controller();
        session.request_play(LessonId::new(1)).unwrap();
        session.select_language(&lang("korean")).unwrap();

        assert!(session.state().playback.is_playing(&AudioCueId::new("hello")));
        assert!(session.current_view().lessons.iter().all(|lesson| !lesson.playing));

        session.select_language(&lang("english")).unwrap();
        let view = session.current_view();
        assert!(view.lesson(LessonId::new(1)).unwrap().playing);
    }

    #[test]
    fn stop_and_finish_events() {
        let (mut session, speech) = controller();
        assert_eq!(
            session.stop_playback(),
            ActionOutcome::Declined(DeclineReason::NothingPlaying)
        );

        session.request_play(LessonId::new(2)).unwrap();
        assert!(session.stop_playback().is_performed());
        assert_eq!(speech.calls().last(), Some(&SpeechCall::Cancel));

        session.request_play(LessonId::new(1)).unwrap();
        let id = speech.last_spoken().unwrap().id;
        assert!(!session.on_speech_event(&SpeechEvent::Finished(UtteranceId::new(0))));
        assert!(session.on_speech_event(&SpeechEvent::Finished(id)));
        assert!(session.state().playback.is_idle());
    }

    #[test]
    fn refused_speech_is_reported_as_declined() {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let playback = PlaybackCoordinator::new(Box::new(RecordingSpeech::unavailable()));
        let mut session = SessionController::new(catalog, playback, fixed_clock());

        assert_eq!(
            session.request_play(LessonId::new(1)).unwrap(),
            ActionOutcome::Declined(DeclineReason::SpeechUnavailable)
        );
        assert!(session.state().playback.is_idle());
    }
}

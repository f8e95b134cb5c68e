//! Access policy: the single gate deciding whether a lesson may be played or
//! completed.

use crate::model::{Lesson, SubscriptionState};

/// True iff the lesson is paid content and the learner is not premium.
#[must_use]
pub fn is_locked(lesson: &Lesson, subscription: &SubscriptionState) -> bool {
    !lesson.is_free() && !subscription.is_premium()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AudioCueId, LessonId};
    use crate::time::fixed_now;

    fn lesson(free: bool) -> Lesson {
        Lesson::new(
            LessonId::new(1),
            "Numbers",
            "One, Two, Three",
            "Satu, Dua, Tiga",
            AudioCueId::new("numbers"),
            free,
        )
        .unwrap()
    }

    #[test]
    fn free_lessons_are_never_locked() {
        let mut subscription = SubscriptionState::default();
        assert!(!is_locked(&lesson(true), &subscription));

        subscription.upgrade(None, fixed_now());
        assert!(!is_locked(&lesson(true), &subscription));
    }

    #[test]
    fn paid_lessons_unlock_with_premium() {
        let mut subscription = SubscriptionState::default();
        assert!(is_locked(&lesson(false), &subscription));

        subscription.upgrade(None, fixed_now());
        assert!(!is_locked(&lesson(false), &subscription));
    }
}

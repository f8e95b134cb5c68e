use serde::{Deserialize, Serialize};

use lingua_core::model::{LanguageId, ProgressSet, SubscriptionState};

use crate::playback::PlaybackPointer;

/// Everything a session knows about the learner, in one serializable value.
///
/// Only the session controller holds a mutable reference; everyone else gets
/// a shared borrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub selection: LanguageId,
    pub subscription: SubscriptionState,
    pub progress: ProgressSet,
    pub playback: PlaybackPointer,
}

impl SessionState {
    #[must_use]
    pub fn new(selection: LanguageId) -> Self {
        Self {
            selection,
            subscription: SubscriptionState::default(),
            progress: ProgressSet::default(),
            playback: PlaybackPointer::default(),
        }
    }
}

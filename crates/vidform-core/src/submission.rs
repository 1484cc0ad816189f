//! Submission controller
//!
//! Drives one [`FormSession`] through `Idle → Submitting → Succeeded | Failed`:
//! the session guards entry and builds the payload, the controller performs
//! the single network call and forwards the ready notice to the notifier.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::SubmissionError;
use crate::hooks::{Notifier, VideoGenerationApi};
use crate::identifier::local_now;
use crate::models::{GenerationResponse, SubmissionPayload, WorkflowStatus};
use crate::session::FormSession;

#[derive(Clone)]
pub struct SubmissionController {
    api: Arc<dyn VideoGenerationApi>,
    notifier: Arc<dyn Notifier>,
}

impl SubmissionController {
    pub fn new(api: Arc<dyn VideoGenerationApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Run a full attempt using the current local time.
    ///
    /// Returns `false` when the trigger was ignored (no audio file, or a
    /// submission already in flight); no request is sent in that case.
    pub async fn submit(&self, session: &mut FormSession) -> bool {
        self.submit_at(session, local_now()).await
    }

    /// Like [`SubmissionController::submit`] with an explicit timestamp.
    pub async fn submit_at(&self, session: &mut FormSession, now: NaiveDateTime) -> bool {
        let Some(payload) = session.begin_submission(now) else {
            return false;
        };
        let outcome = self.dispatch(payload).await;
        self.finish(session, outcome);
        true
    }

    /// Send a payload obtained from [`FormSession::begin_submission`].
    ///
    /// Front-ends that keep handling input while the request runs await this
    /// themselves and hand the outcome to [`SubmissionController::finish`].
    pub async fn dispatch(
        &self,
        payload: SubmissionPayload,
    ) -> Result<GenerationResponse, SubmissionError> {
        self.api.submit(&payload).await
    }

    /// Apply an outcome to the session and notify once on success.
    pub fn finish<'s>(
        &self,
        session: &'s mut FormSession,
        outcome: Result<GenerationResponse, SubmissionError>,
    ) -> &'s WorkflowStatus {
        if let Some(notice) = session.resolve(outcome) {
            self.notifier.notify(&notice);
        }
        session.status()
    }
}

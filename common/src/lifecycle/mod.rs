//! Per-tab request lifecycle state machine.
//!
//! The three data tabs (Display, Create/Update, Send Files) each own an
//! independent `TabLifecycle`. The lifecycle enforces the single-in-flight
//! rule (the submit action is a no-op while a request is loading) and guards
//! against stale responses: every submission is stamped with an epoch token,
//! and a completion carrying an old epoch is discarded. `clear` also bumps
//! the epoch, so a response that resolves after the user cleared the view can
//! never repopulate it.
//!
//! There is deliberately no cancellation: an in-flight request runs to
//! completion or transport failure. The frontend arms a 30-second failsafe
//! that reports a failure for the same epoch so the progress indicator cannot
//! get stuck, without touching the underlying request.

/// The three data tabs of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Display,
    CreateUpdate,
    SendFiles,
}

/// State of one tab's request workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Lifecycle for a single tab. One parametrized type, instantiated three
/// times, instead of three copies of the same idle/loading/done pattern.
#[derive(Debug, Clone)]
pub struct TabLifecycle {
    state: TabState,
    epoch: u64,
}

impl Default for TabLifecycle {
    fn default() -> Self {
        Self {
            state: TabState::Idle,
            epoch: 0,
        }
    }
}

impl TabLifecycle {
    pub fn state(&self) -> TabState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == TabState::Loading
    }

    pub fn succeeded(&self) -> bool {
        self.state == TabState::Succeeded
    }

    /// True iff a submission is currently allowed: no request in flight and
    /// the associated input is non-empty.
    pub fn can_submit(&self, has_input: bool) -> bool {
        self.state != TabState::Loading && has_input
    }

    /// Moves to `Loading` and returns the epoch token for this submission.
    /// Returns `None` (and changes nothing) when submission is not allowed.
    pub fn try_begin(&mut self, has_input: bool) -> Option<u64> {
        if !self.can_submit(has_input) {
            return None;
        }
        self.epoch += 1;
        self.state = TabState::Loading;
        Some(self.epoch)
    }

    /// Completes the submission identified by `epoch` successfully.
    /// Returns false for a stale epoch or when no request is loading.
    pub fn finish_ok(&mut self, epoch: u64) -> bool {
        if self.state == TabState::Loading && epoch == self.epoch {
            self.state = TabState::Succeeded;
            true
        } else {
            false
        }
    }

    /// Fails the submission identified by `epoch` (transport error or the
    /// loading failsafe). Returns false for a stale epoch.
    pub fn finish_err(&mut self, epoch: u64) -> bool {
        if self.state == TabState::Loading && epoch == self.epoch {
            self.state = TabState::Failed;
            true
        } else {
            false
        }
    }

    /// Resets to `Idle`. Permitted only from `Succeeded` or `Failed`; bumps
    /// the epoch so any response still in flight is discarded on arrival.
    pub fn clear(&mut self) -> bool {
        match self.state {
            TabState::Succeeded | TabState::Failed => {
                self.state = TabState::Idle;
                self.epoch += 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_input_and_no_inflight_request() {
        let mut tab = TabLifecycle::default();
        assert!(!tab.can_submit(false));
        assert!(tab.try_begin(false).is_none());

        let epoch = tab.try_begin(true).expect("first submit");
        assert_eq!(tab.state(), TabState::Loading);

        // No duplicate in-flight request for the same tab.
        assert!(!tab.can_submit(true));
        assert!(tab.try_begin(true).is_none());

        assert!(tab.finish_ok(epoch));
        assert!(tab.can_submit(true));
    }

    #[test]
    fn can_submit_again_after_failure() {
        let mut tab = TabLifecycle::default();
        let epoch = tab.try_begin(true).unwrap();
        assert!(tab.finish_err(epoch));
        assert_eq!(tab.state(), TabState::Failed);
        assert!(tab.can_submit(true));
    }

    #[test]
    fn clear_only_from_terminal_states() {
        let mut tab = TabLifecycle::default();
        assert!(!tab.clear());

        let epoch = tab.try_begin(true).unwrap();
        assert!(!tab.clear());

        tab.finish_ok(epoch);
        assert!(tab.clear());
        assert_eq!(tab.state(), TabState::Idle);
    }

    #[test]
    fn stale_response_after_clear_is_discarded() {
        let mut tab = TabLifecycle::default();
        let first = tab.try_begin(true).unwrap();
        tab.finish_ok(first);

        let second = tab.try_begin(true).unwrap();
        tab.finish_err(second);
        assert!(tab.clear());

        // A response from the cleared submission resolves late: ignored.
        assert!(!tab.finish_ok(second));
        assert!(!tab.finish_err(second));
        assert_eq!(tab.state(), TabState::Idle);
    }

    #[test]
    fn failsafe_for_an_old_submission_does_not_fail_a_new_one() {
        let mut tab = TabLifecycle::default();
        let first = tab.try_begin(true).unwrap();
        tab.finish_ok(first);
        tab.clear();

        let second = tab.try_begin(true).unwrap();
        // Failsafe armed for the first submission fires late.
        assert!(!tab.finish_err(first));
        assert_eq!(tab.state(), TabState::Loading);
        assert!(tab.finish_ok(second));
    }
}

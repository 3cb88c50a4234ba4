/// Sequence number issued for every started request. `0` means none issued.
pub type RequestId = u64;

/// What the response pane currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestOutcome {
    #[default]
    Idle,
    InProgress,
    Success(String),
    Failure(String),
}

impl RequestOutcome {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, RequestOutcome::InProgress)
    }
}

/// The single outcome cell shared by every job trigger.
///
/// Each [`OutcomeSlot::begin`] issues a fresh id; only the settlement carrying
/// the latest id may leave `InProgress`. Older settlements are dropped so a
/// slow request can never overwrite a newer one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutcomeSlot {
    outcome: RequestOutcome,
    latest: RequestId,
}

impl OutcomeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    pub fn latest(&self) -> RequestId {
        self.latest
    }

    /// Resets the slot to `InProgress` and returns the id for the new request.
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        self.outcome = RequestOutcome::InProgress;
        self.latest
    }

    /// Applies a settlement. Returns `false` when it was stale and ignored.
    pub fn settle(&mut self, request_id: RequestId, settlement: crate::Settlement) -> bool {
        if request_id != self.latest || !self.outcome.is_in_progress() {
            return false;
        }
        self.outcome = match settlement {
            crate::Settlement::Success(message) => RequestOutcome::Success(message),
            crate::Settlement::Failure(message) => RequestOutcome::Failure(message),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settlement;

    #[test]
    fn begin_issues_increasing_ids() {
        let mut slot = OutcomeSlot::new();
        assert_eq!(slot.latest(), 0);
        assert_eq!(slot.begin(), 1);
        assert_eq!(slot.begin(), 2);
        assert!(slot.outcome().is_in_progress());
    }

    #[test]
    fn settle_twice_keeps_first_result() {
        let mut slot = OutcomeSlot::new();
        let id = slot.begin();
        assert!(slot.settle(id, Settlement::Success("ok".into())));
        assert!(!slot.settle(id, Settlement::Failure("late".into())));
        assert_eq!(slot.outcome(), &RequestOutcome::Success("ok".into()));
    }

    #[test]
    fn settle_without_begin_is_ignored() {
        let mut slot = OutcomeSlot::new();
        assert!(!slot.settle(0, Settlement::Success("ghost".into())));
        assert_eq!(slot.outcome(), &RequestOutcome::Idle);
    }
}

use crate::{CapacityTracker, JoinDecision, LeaveDecision, Metrics};

use mb_core::{RoomId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Join,
    Leave,
}

impl Transition {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
        }
    }
}

/// A tracker decision that storage has not confirmed yet.
///
/// Exactly one of `commit`, `compensate` or `discard` settles it. A guard
/// dropped while unsettled means the transition was cancelled or ran out of
/// time mid-write; whether the write landed is unknown, so the room's
/// tracker state is dropped and rebuilt from storage on next access.
pub(crate) struct TransitionGuard<'a> {
    tracker: &'a CapacityTracker,
    metrics: &'a Metrics,
    transition: Transition,
    room_id: RoomId,
    user_id: UserId,
    capacity: u32,
    settled: bool,
}

impl<'a> TransitionGuard<'a> {
    pub(crate) fn new(
        tracker: &'a CapacityTracker,
        metrics: &'a Metrics,
        transition: Transition,
        room_id: RoomId,
        user_id: UserId,
        capacity: u32,
    ) -> Self {
        Self {
            tracker,
            metrics,
            transition,
            room_id,
            user_id,
            capacity,
            settled: false,
        }
    }

    /// Storage agrees with the tracker
    pub(crate) fn commit(mut self) {
        self.settled = true;
    }

    /// The write definitely failed: reverse the tracker decision.
    pub(crate) fn compensate(mut self) {
        self.settled = true;
        self.metrics.compensation(self.transition.as_str());

        let reversed = match self.transition {
            Transition::Join => matches!(
                self.tracker.try_leave(self.room_id, self.user_id),
                LeaveDecision::Accepted { .. }
            ),
            Transition::Leave => matches!(
                self.tracker
                    .try_join(self.room_id, self.user_id, self.capacity),
                JoinDecision::Accepted { .. }
            ),
        };

        if reversed {
            log::warn!(
                "Compensated {} of {} in {} after a failed write",
                self.transition.as_str(),
                self.user_id,
                self.room_id
            );
        } else {
            log::error!(
                "Could not reverse {} of {} in {}; rebuilding room from storage",
                self.transition.as_str(),
                self.user_id,
                self.room_id
            );
            self.evict();
        }
    }

    /// Storage state is uncertain: forget the room instead of guessing.
    pub(crate) fn discard(mut self) {
        self.settled = true;
        self.evict();
    }

    fn evict(&self) {
        if self.tracker.evict(self.room_id) {
            self.metrics.tracker_evicted();
        }
    }
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        log::warn!(
            "{} of {} in {} abandoned before storage confirmed it; rebuilding room from storage",
            self.transition.as_str(),
            self.user_id,
            self.room_id
        );
        self.evict();
    }
}

use crate::transition_guard::{Transition, TransitionGuard};
use crate::{CapacityTracker, JoinDecision, Metrics};

use mb_core::{RoomId, UserId};

use googletest::prelude::*;

const ROOM: RoomId = RoomId(7);
const USER: UserId = UserId(70);

fn admitted_tracker() -> CapacityTracker {
    let tracker = CapacityTracker::new();
    tracker.bootstrap(ROOM, [UserId(1)]);
    assert_that!(
        tracker.try_join(ROOM, USER, 3),
        eq(JoinDecision::Accepted { occupancy: 2 })
    );
    tracker
}

#[test]
fn given_admitted_join_when_committed_then_tracker_keeps_member() {
    let tracker = admitted_tracker();
    let metrics = Metrics::new();

    TransitionGuard::new(&tracker, &metrics, Transition::Join, ROOM, USER, 3).commit();

    assert!(tracker.is_member(ROOM, USER));
    assert_that!(tracker.snapshot(ROOM), some(eq(2)));
}

#[test]
fn given_admitted_join_when_compensated_then_occupancy_restored() {
    let tracker = admitted_tracker();
    let metrics = Metrics::new();

    TransitionGuard::new(&tracker, &metrics, Transition::Join, ROOM, USER, 3).compensate();

    assert!(!tracker.is_member(ROOM, USER));
    assert_that!(tracker.snapshot(ROOM), some(eq(1)));
}

#[test]
fn given_accepted_leave_when_compensated_then_member_restored() {
    let tracker = admitted_tracker();
    let metrics = Metrics::new();
    tracker.try_leave(ROOM, USER);

    TransitionGuard::new(&tracker, &metrics, Transition::Leave, ROOM, USER, 3).compensate();

    assert!(tracker.is_member(ROOM, USER));
    assert_that!(tracker.snapshot(ROOM), some(eq(2)));
}

#[test]
fn given_pending_guard_when_dropped_then_room_evicted() {
    let tracker = admitted_tracker();
    let metrics = Metrics::new();

    {
        let _guard = TransitionGuard::new(&tracker, &metrics, Transition::Join, ROOM, USER, 3);
    }

    assert!(!tracker.is_tracked(ROOM));
}

#[test]
fn given_guard_when_discarded_then_room_evicted() {
    let tracker = admitted_tracker();
    let metrics = Metrics::new();

    TransitionGuard::new(&tracker, &metrics, Transition::Join, ROOM, USER, 3).discard();

    assert_that!(tracker.snapshot(ROOM), none());
}

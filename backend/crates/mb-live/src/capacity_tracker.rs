//! In-process gate for join/leave decisions.
//!
//! Each room's state sits behind its own mutex, so decisions for different
//! rooms never contend. The outer map lock is held only long enough to find
//! or insert an entry. No method here awaits: a decision is made and
//! applied before the caller touches storage.

use mb_core::{RoomId, UserId};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Outcome of [`CapacityTracker::try_join`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDecision {
    Accepted { occupancy: u32 },
    AlreadyMember,
    Full { capacity: u32 },
}

/// Outcome of [`CapacityTracker::try_leave`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Accepted { occupancy: u32 },
    NotMember,
}

/// Participants believed to hold a slot. Occupancy is the set's size, so the
/// two can never disagree.
#[derive(Debug, Default)]
struct CapacityState {
    participants: HashSet<UserId>,
}

impl CapacityState {
    fn occupancy(&self) -> u32 {
        u32::try_from(self.participants.len()).unwrap_or(u32::MAX)
    }
}

#[derive(Clone, Default)]
pub struct CapacityTracker {
    rooms: Arc<RwLock<HashMap<RoomId, Arc<Mutex<CapacityState>>>>>,
}

impl CapacityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a room from durable membership. Does nothing if the room is
    /// already tracked; returns the occupancy the tracker now holds.
    pub fn bootstrap(&self, room_id: RoomId, members: impl IntoIterator<Item = UserId>) -> u32 {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = rooms.get(&room_id) {
            return lock(existing).occupancy();
        }

        let state = CapacityState {
            participants: members.into_iter().collect(),
        };
        let occupancy = state.occupancy();
        rooms.insert(room_id, Arc::new(Mutex::new(state)));

        log::debug!("Tracking {} with {} members", room_id, occupancy);
        occupancy
    }

    pub fn is_tracked(&self, room_id: RoomId) -> bool {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&room_id)
    }

    /// Check membership, then capacity, then admit - as one critical section.
    pub fn try_join(&self, room_id: RoomId, user_id: UserId, capacity: u32) -> JoinDecision {
        let entry = self.entry(room_id);
        let mut state = lock(&entry);

        if state.participants.contains(&user_id) {
            return JoinDecision::AlreadyMember;
        }
        if state.occupancy() >= capacity {
            return JoinDecision::Full { capacity };
        }

        state.participants.insert(user_id);
        JoinDecision::Accepted {
            occupancy: state.occupancy(),
        }
    }

    pub fn try_leave(&self, room_id: RoomId, user_id: UserId) -> LeaveDecision {
        let entry = self.entry(room_id);
        let mut state = lock(&entry);

        if !state.participants.remove(&user_id) {
            return LeaveDecision::NotMember;
        }

        LeaveDecision::Accepted {
            occupancy: state.occupancy(),
        }
    }

    /// Recent occupancy of a tracked room; `None` if the room is not tracked.
    pub fn snapshot(&self, room_id: RoomId) -> Option<u32> {
        let entry = self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&room_id)
            .cloned()?;

        let occupancy = lock(&entry).occupancy();
        Some(occupancy)
    }

    pub fn is_member(&self, room_id: RoomId, user_id: UserId) -> bool {
        let entry = self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&room_id)
            .cloned();

        entry.is_some_and(|entry| lock(&entry).participants.contains(&user_id))
    }

    /// Forget a room. The next access rebuilds it from durable membership.
    pub fn evict(&self, room_id: RoomId) -> bool {
        let removed = self
            .rooms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&room_id)
            .is_some();

        if removed {
            log::debug!("Stopped tracking {}", room_id);
        }
        removed
    }

    pub fn tracked_room_count(&self) -> usize {
        self.rooms.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn entry(&self, room_id: RoomId) -> Arc<Mutex<CapacityState>> {
        if let Some(entry) = self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&room_id)
        {
            return Arc::clone(entry);
        }

        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(rooms.entry(room_id).or_default())
    }
}

// Critical sections never panic, so a poisoned lock still guards valid state
fn lock(entry: &Mutex<CapacityState>) -> MutexGuard<'_, CapacityState> {
    entry.lock().unwrap_or_else(PoisonError::into_inner)
}

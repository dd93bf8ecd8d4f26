//! Join/leave orchestration.
//!
//! Every transition for a room runs inside that room's lane: tracker
//! decision, durable write and broadcast happen in one total order per room,
//! while rooms with different ids proceed in parallel. The tracker decision
//! comes first so that refusals never touch storage.

use crate::transition_guard::{Transition, TransitionGuard};
use crate::{
    CAPACITY_EXCEEDED, CapacityTracker, DUPLICATE_JOIN, JoinDecision, LeaveDecision, LiveConfig,
    LiveError, MembershipOutcome, Metrics, NOT_MEMBER, PERSISTENCE_FAILURE,
    Result as LiveErrorResult, RoomBroadcaster, RoomStore, RoomSubscription,
};

use mb_core::{BoardId, JoinedRoom, Membership, Room, RoomId, UpdateEvent, UserId};
use mb_db::{DbError, Result as DbErrorResult};

use std::collections::HashMap;
use std::future::Future;
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use tokio::sync::Mutex as AsyncMutex;

pub struct MembershipCoordinator {
    store: Arc<dyn RoomStore>,
    tracker: CapacityTracker,
    broadcaster: RoomBroadcaster,
    lanes: Mutex<HashMap<RoomId, Arc<AsyncMutex<()>>>>,
    write_timeout: Duration,
    metrics: Metrics,
}

impl MembershipCoordinator {
    pub fn new(store: Arc<dyn RoomStore>, config: LiveConfig) -> Self {
        Self {
            store,
            tracker: CapacityTracker::new(),
            broadcaster: RoomBroadcaster::new(config.channel_capacity),
            lanes: Mutex::new(HashMap::new()),
            write_timeout: config.write_timeout,
            metrics: Metrics::new(),
        }
    }

    pub fn tracker(&self) -> &CapacityTracker {
        &self.tracker
    }

    pub fn broadcaster(&self) -> &RoomBroadcaster {
        &self.broadcaster
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    pub async fn join(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> LiveErrorResult<MembershipOutcome> {
        let lane = self.lane(room_id);
        let _turn = lane.lock().await;

        let room = self.resolve_in_lane(&lane, room_id).await?;
        self.ensure_tracked(&room).await?;

        let occupancy = match self.tracker.try_join(room_id, user_id, room.capacity) {
            JoinDecision::Accepted { occupancy } => occupancy,
            JoinDecision::AlreadyMember => {
                self.metrics.join_rejected(DUPLICATE_JOIN);
                return Err(LiveError::DuplicateJoin {
                    room_id,
                    user_id,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            JoinDecision::Full { capacity } => {
                log::debug!("{} refused, {} is full", user_id, room_id);
                self.metrics.join_rejected(CAPACITY_EXCEEDED);
                return Err(LiveError::CapacityExceeded {
                    room_id,
                    capacity,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let guard = TransitionGuard::new(
            &self.tracker,
            &self.metrics,
            Transition::Join,
            room_id,
            user_id,
            room.capacity,
        );
        let membership = Membership::new(room_id, user_id);
        let mut row_written = false;

        let written = self
            .durable(self.persist_join(&membership, occupancy, &mut row_written))
            .await;

        if let Err(err) = written {
            log::warn!("Join of {} to {} not persisted: {}", user_id, room_id, err);

            if is_unique_violation(&err) {
                // Storage already holds this membership; the tracker was behind
                guard.discard();
                self.metrics.join_rejected(DUPLICATE_JOIN);
                return Err(LiveError::DuplicateJoin {
                    room_id,
                    user_id,
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            self.metrics.join_rejected(PERSISTENCE_FAILURE);
            if err.is_persistence_timeout() {
                guard.discard();
                return Err(err);
            }

            if row_written
                && let Err(cleanup) = self
                    .durable(self.store.delete_membership(room_id, user_id))
                    .await
            {
                log::error!(
                    "Could not remove half-written membership of {} in {}: {}",
                    user_id,
                    room_id,
                    cleanup
                );
                guard.discard();
                return Err(err);
            }

            guard.compensate();
            return Err(err);
        }

        guard.commit();
        self.metrics.join_accepted();
        log::info!(
            "{} joined {} ({}/{})",
            user_id,
            room_id,
            occupancy,
            room.capacity
        );

        self.announce(room_id, occupancy, Some(user_id)).await;

        Ok(MembershipOutcome {
            room_id,
            current_occupancy: occupancy,
        })
    }

    pub async fn leave(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> LiveErrorResult<MembershipOutcome> {
        let lane = self.lane(room_id);
        let _turn = lane.lock().await;

        let room = self.resolve_in_lane(&lane, room_id).await?;
        self.ensure_tracked(&room).await?;

        let occupancy = match self.tracker.try_leave(room_id, user_id) {
            LeaveDecision::Accepted { occupancy } => occupancy,
            LeaveDecision::NotMember => {
                self.metrics.leave_rejected(NOT_MEMBER);
                return Err(LiveError::NotMember {
                    room_id,
                    user_id,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let guard = TransitionGuard::new(
            &self.tracker,
            &self.metrics,
            Transition::Leave,
            room_id,
            user_id,
            room.capacity,
        );
        let mut row_deleted = false;

        let written = self
            .durable(self.persist_leave(room_id, user_id, occupancy, &mut row_deleted))
            .await;

        if let Err(err) = written {
            self.metrics.leave_rejected(PERSISTENCE_FAILURE);
            log::warn!(
                "Leave of {} from {} not persisted: {}",
                user_id,
                room_id,
                err
            );

            // The row is already gone, so the user must not be re-admitted.
            // The next access rebuilds the room and repairs its stored count.
            if row_deleted || err.is_persistence_timeout() {
                guard.discard();
            } else {
                guard.compensate();
            }
            return Err(err);
        }

        guard.commit();
        self.metrics.leave_accepted();
        log::info!(
            "{} left {} ({}/{})",
            user_id,
            room_id,
            occupancy,
            room.capacity
        );

        self.announce(room_id, occupancy, Some(user_id)).await;

        Ok(MembershipOutcome {
            room_id,
            current_occupancy: occupancy,
        })
    }

    /// Live occupancy of a room, bootstrapping the tracker if needed
    pub async fn current_occupancy(&self, room_id: RoomId) -> LiveErrorResult<u32> {
        if let Some(occupancy) = self.tracker.snapshot(room_id) {
            return Ok(occupancy);
        }

        let lane = self.lane(room_id);
        let _turn = lane.lock().await;

        let room = self.resolve_in_lane(&lane, room_id).await?;
        self.ensure_tracked(&room).await?;

        self.tracker
            .snapshot(room_id)
            .ok_or_else(|| LiveError::room_not_found(room_id.to_string()))
    }

    /// Live updates for a room from now on
    pub async fn subscribe(&self, room_id: RoomId) -> LiveErrorResult<RoomSubscription> {
        let lane = self.lane(room_id);
        let _turn = lane.lock().await;

        self.resolve_in_lane(&lane, room_id).await?;
        self.broadcaster.subscribe(room_id).await
    }

    // =========================================================================
    // Room lifecycle
    // =========================================================================

    /// Create the room of a newly created board
    pub async fn open_room(&self, board_id: BoardId, capacity: i64) -> LiveErrorResult<Room> {
        let capacity = Room::validate_capacity(capacity).map_err(|_| LiveError::InvalidCapacity {
            value: capacity,
            location: ErrorLocation::from(Location::caller()),
        })?;

        if self
            .durable(self.store.find_room_by_board_id(board_id))
            .await?
            .is_some()
        {
            return Err(room_already_exists(board_id));
        }

        let room = match self
            .durable(self.store.create_room_for_board(board_id, capacity))
            .await
        {
            Ok(room) => room,
            Err(err) if is_unique_violation(&err) => return Err(room_already_exists(board_id)),
            Err(err) => return Err(err),
        };

        self.tracker.bootstrap(room.id, std::iter::empty());
        self.metrics
            .rooms_tracked(self.tracker.tracked_room_count());
        log::info!(
            "Opened {} for {} with capacity {}",
            room.id,
            board_id,
            capacity
        );

        Ok(room)
    }

    /// Remove a board's room. Memberships go with it and live streams end.
    pub async fn close_room(&self, board_id: BoardId) -> LiveErrorResult<RoomId> {
        let room = self
            .durable(self.store.find_room_by_board_id(board_id))
            .await?
            .ok_or_else(|| LiveError::room_not_found(board_id.to_string()))?;

        let lane = self.lane(room.id);
        let _turn = lane.lock().await;

        let deleted = self
            .durable(self.store.delete_room_for_board(board_id))
            .await?;

        self.tracker.evict(room.id);
        self.broadcaster.close_room(room.id).await;
        self.forget_lane(room.id);
        self.metrics
            .rooms_tracked(self.tracker.tracked_room_count());

        match deleted {
            Some(room_id) => {
                log::info!("Closed {} of {}", room_id, board_id);
                Ok(room_id)
            }
            None => Err(LiveError::room_not_found(board_id.to_string())),
        }
    }

    /// The room of a board, with its live occupancy
    pub async fn room_for_board(&self, board_id: BoardId) -> LiveErrorResult<Room> {
        let mut room = self
            .durable(self.store.find_room_by_board_id(board_id))
            .await?
            .ok_or_else(|| LiveError::room_not_found(board_id.to_string()))?;

        room.member_count = match self.tracker.snapshot(room.id) {
            Some(occupancy) => occupancy,
            None => self.durable(self.store.count_members(room.id)).await?,
        };

        Ok(room)
    }

    /// Rooms a user has joined, most recent first
    pub async fn rooms_for_user(
        &self,
        user_id: UserId,
        limit: u32,
        offset: u32,
    ) -> LiveErrorResult<Vec<JoinedRoom>> {
        let mut rooms = self
            .durable(self.store.find_rooms_for_user(user_id, limit, offset))
            .await?;

        for room in &mut rooms {
            if let Some(occupancy) = self.tracker.snapshot(room.room_id) {
                room.member_count = occupancy;
            }
        }

        Ok(rooms)
    }

    /// Rebuild a room's tracker entry from durable membership, repair the
    /// persisted count if it drifted, and tell subscribers if occupancy moved.
    pub async fn reconcile(&self, room_id: RoomId) -> LiveErrorResult<u32> {
        let lane = self.lane(room_id);
        let _turn = lane.lock().await;

        let room = self.resolve_in_lane(&lane, room_id).await?;
        let members = self.durable(self.store.list_member_ids(room_id)).await?;

        let previous = self.tracker.snapshot(room_id).unwrap_or(room.member_count);
        self.tracker.evict(room_id);
        let occupancy = self.tracker.bootstrap(room_id, members);

        if room.member_count != occupancy {
            log::warn!(
                "Persisted count of {} drifted: {} stored, {} members",
                room_id,
                room.member_count,
                occupancy
            );
            self.durable(self.store.save_member_count(room_id, occupancy))
                .await?;
        }

        if previous != occupancy {
            self.announce(room_id, occupancy, None).await;
        }

        Ok(occupancy)
    }

    /// Load every stored room into the tracker, repairing drifted counts.
    /// Returns how many rooms were loaded.
    pub async fn warm_up(&self) -> LiveErrorResult<usize> {
        let rooms = self.durable(self.store.find_all_rooms()).await?;
        let total = rooms.len();

        for room in rooms {
            let lane = self.lane(room.id);
            let _turn = lane.lock().await;
            self.ensure_tracked(&room).await?;
        }

        log::info!("Warmed up {} rooms", total);
        Ok(total)
    }

    /// Rooms with a serialization lane
    pub fn lane_count(&self) -> usize {
        self.lanes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Close every live channel; later publishes are dropped
    pub async fn shutdown(&self) {
        self.broadcaster.shutdown().await;
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lane(&self, room_id: RoomId) -> Arc<AsyncMutex<()>> {
        let mut lanes = self.lanes.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(lanes.entry(room_id).or_default())
    }

    fn forget_lane(&self, room_id: RoomId) {
        self.lanes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&room_id);
    }

    /// Drop the lane of a room that does not exist, unless other callers
    /// are queued on it. `held` is the caller's own handle.
    fn release_lane(&self, room_id: RoomId, held: &Arc<AsyncMutex<()>>) {
        let mut lanes = self.lanes.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = lanes
            .get(&room_id)
            .is_some_and(|lane| Arc::ptr_eq(lane, held) && Arc::strong_count(lane) <= 2);
        if idle {
            lanes.remove(&room_id);
        }
    }

    /// Run one store call under the write deadline
    async fn durable<T>(
        &self,
        operation: impl Future<Output = DbErrorResult<T>>,
    ) -> LiveErrorResult<T> {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.write_timeout, operation).await;
        self.metrics.store_latency(started.elapsed());

        match outcome {
            Ok(result) => Ok(result?),
            Err(_) => Err(LiveError::PersistenceFailure {
                source: DbError::Timeout {
                    timeout_ms: u64::try_from(self.write_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                    location: ErrorLocation::from(Location::caller()),
                },
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    async fn resolve_room(&self, room_id: RoomId) -> LiveErrorResult<Room> {
        self.durable(self.store.find_room(room_id))
            .await?
            .ok_or_else(|| LiveError::room_not_found(room_id.to_string()))
    }

    /// `resolve_room` for a caller holding `lane`; unknown ids leave no lane behind
    async fn resolve_in_lane(
        &self,
        lane: &Arc<AsyncMutex<()>>,
        room_id: RoomId,
    ) -> LiveErrorResult<Room> {
        let resolved = self.resolve_room(room_id).await;
        if let Err(LiveError::RoomNotFound { .. }) = resolved {
            self.release_lane(room_id, lane);
        }
        resolved
    }

    /// Seed the tracker from storage before its first decision for a room,
    /// and bring the stored count in line with the membership rows.
    /// Callers hold the room's lane.
    async fn ensure_tracked(&self, room: &Room) -> LiveErrorResult<()> {
        if self.tracker.is_tracked(room.id) {
            return Ok(());
        }

        let members = self.durable(self.store.list_member_ids(room.id)).await?;
        let occupancy = self.tracker.bootstrap(room.id, members);
        self.metrics
            .rooms_tracked(self.tracker.tracked_room_count());
        log::info!("Loaded {} from storage with {} members", room.id, occupancy);

        if room.member_count != occupancy {
            log::warn!(
                "Repairing stored count of {}: {} stored, {} members",
                room.id,
                room.member_count,
                occupancy
            );
            if let Err(err) = self
                .durable(self.store.save_member_count(room.id, occupancy))
                .await
            {
                // Retry the repair on the next access
                self.tracker.evict(room.id);
                return Err(err);
            }
        }

        Ok(())
    }

    async fn persist_join(
        &self,
        membership: &Membership,
        occupancy: u32,
        row_written: &mut bool,
    ) -> DbErrorResult<()> {
        self.store.insert_membership(membership).await?;
        *row_written = true;

        if !self
            .store
            .save_member_count(membership.room_id, occupancy)
            .await?
        {
            log::warn!("{} vanished while saving its count", membership.room_id);
        }
        Ok(())
    }

    async fn persist_leave(
        &self,
        room_id: RoomId,
        user_id: UserId,
        occupancy: u32,
        row_deleted: &mut bool,
    ) -> DbErrorResult<()> {
        if !self.store.delete_membership(room_id, user_id).await? {
            log::warn!(
                "{} had no membership row in {}; storage already agreed",
                user_id,
                room_id
            );
        }
        *row_deleted = true;

        if !self.store.save_member_count(room_id, occupancy).await? {
            log::warn!("{} vanished while saving its count", room_id);
        }
        Ok(())
    }

    /// Publish the new occupancy. Delivery problems never fail a transition.
    async fn announce(&self, room_id: RoomId, occupancy: u32, actor: Option<UserId>) {
        let event = match actor {
            Some(user_id) => {
                UpdateEvent::new(room_id, occupancy, self.actor_username(user_id).await)
            }
            None => UpdateEvent::system(room_id, occupancy),
        };
        if let Err(e) = self.broadcaster.publish(room_id, event).await {
            log::warn!("Update for {} not delivered: {}", room_id, e);
        }
    }

    async fn actor_username(&self, user_id: UserId) -> String {
        match self.durable(self.store.find_username(user_id)).await {
            Ok(Some(username)) => username,
            Ok(None) => String::new(),
            Err(e) => {
                log::warn!("Could not resolve username of {}: {}", user_id, e);
                String::new()
            }
        }
    }
}

fn is_unique_violation(err: &LiveError) -> bool {
    matches!(err, LiveError::PersistenceFailure { source, .. } if source.is_unique_violation())
}

#[track_caller]
fn room_already_exists(board_id: BoardId) -> LiveError {
    LiveError::RoomAlreadyExists {
        board_id,
        location: ErrorLocation::from(Location::caller()),
    }
}

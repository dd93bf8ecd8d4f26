use crate::{LiveError, Metrics, Result as LiveErrorResult, RoomSubscription};

use mb_core::{RoomId, UpdateEvent};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use tokio::sync::{RwLock, broadcast};

/// One multicast channel per room.
///
/// A channel is created by the first subscribe or publish for its room and
/// lives until the room is closed or the broadcaster shuts down.
#[derive(Clone)]
pub struct RoomBroadcaster {
    inner: Arc<RwLock<BroadcasterInner>>,
    channel_capacity: usize,
    metrics: Metrics,
}

struct BroadcasterInner {
    channels: HashMap<RoomId, broadcast::Sender<UpdateEvent>>,
    shut_down: bool,
}

impl RoomBroadcaster {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BroadcasterInner {
                channels: HashMap::new(),
                shut_down: false,
            })),
            channel_capacity: channel_capacity.max(1),
            metrics: Metrics::new(),
        }
    }

    /// Subscribe to a room's updates from this point on
    pub async fn subscribe(&self, room_id: RoomId) -> LiveErrorResult<RoomSubscription> {
        let location = ErrorLocation::from(Location::caller());
        let mut inner = self.inner.write().await;

        if inner.shut_down {
            return Err(LiveError::BroadcastUnavailable { room_id, location });
        }

        let sender = inner
            .channels
            .entry(room_id)
            .or_insert_with(|| self.create_channel(room_id));
        let receiver = sender.subscribe();

        log::debug!(
            "Client subscribed to {} ({} total subscribers)",
            room_id,
            sender.receiver_count()
        );
        self.metrics.subscription_changed("created");

        Ok(RoomSubscription::new(room_id, receiver, self.metrics.clone()))
    }

    /// Fan an event out to every current subscriber of the room.
    ///
    /// Never waits on subscribers. Reaching nobody is not an error and
    /// returns `Ok(0)`; only a shut-down broadcaster refuses.
    pub async fn publish(&self, room_id: RoomId, event: UpdateEvent) -> LiveErrorResult<usize> {
        let location = ErrorLocation::from(Location::caller());

        {
            let inner = self.inner.read().await;
            if inner.shut_down {
                return Err(LiveError::BroadcastUnavailable { room_id, location });
            }
            if let Some(sender) = inner.channels.get(&room_id) {
                return Ok(self.send(room_id, sender, event));
            }
        }

        let mut inner = self.inner.write().await;
        if inner.shut_down {
            return Err(LiveError::BroadcastUnavailable { room_id, location });
        }
        let sender = inner
            .channels
            .entry(room_id)
            .or_insert_with(|| self.create_channel(room_id));

        Ok(self.send(room_id, sender, event))
    }

    /// End a room's channel; its subscribers' streams finish.
    pub async fn close_room(&self, room_id: RoomId) -> bool {
        let removed = self.inner.write().await.channels.remove(&room_id).is_some();
        if removed {
            log::info!("Closed broadcast channel for {}", room_id);
        }
        removed
    }

    /// Close every channel and refuse further subscribes and publishes
    pub async fn shutdown(&self) {
        let mut inner = self.inner.write().await;
        inner.shut_down = true;
        let closed = inner.channels.len();
        inner.channels.clear();

        log::info!("Broadcaster shut down, closed {} room channels", closed);
    }

    pub async fn is_shut_down(&self) -> bool {
        self.inner.read().await.shut_down
    }

    pub async fn subscriber_count(&self, room_id: RoomId) -> usize {
        let inner = self.inner.read().await;
        inner
            .channels
            .get(&room_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    pub async fn channel_count(&self) -> usize {
        self.inner.read().await.channels.len()
    }

    fn create_channel(&self, room_id: RoomId) -> broadcast::Sender<UpdateEvent> {
        let (sender, _) = broadcast::channel(self.channel_capacity);
        log::info!("Created broadcast channel for {}", room_id);
        sender
    }

    fn send(
        &self,
        room_id: RoomId,
        sender: &broadcast::Sender<UpdateEvent>,
        event: UpdateEvent,
    ) -> usize {
        match sender.send(event) {
            Ok(receiver_count) => {
                log::debug!(
                    "Published update to {} ({} receivers)",
                    room_id,
                    receiver_count
                );
                self.metrics.event_published(receiver_count);
                receiver_count
            }
            Err(_) => {
                // Channel exists but no one is listening
                log::debug!("Update for {} had no active receivers", room_id);
                self.metrics.event_published(0);
                0
            }
        }
    }
}

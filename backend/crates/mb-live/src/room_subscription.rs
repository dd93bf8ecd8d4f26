use crate::Metrics;

use mb_core::{RoomId, UpdateEvent};

use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};

/// One subscriber's view of a room's live updates.
///
/// Only events published after the subscription was taken are delivered.
/// A subscriber that falls more than the channel capacity behind skips the
/// oldest events rather than slowing the publisher down.
pub struct RoomSubscription {
    room_id: RoomId,
    receiver: broadcast::Receiver<UpdateEvent>,
    metrics: Metrics,
}

impl RoomSubscription {
    pub(crate) fn new(
        room_id: RoomId,
        receiver: broadcast::Receiver<UpdateEvent>,
        metrics: Metrics,
    ) -> Self {
        Self {
            room_id,
            receiver,
            metrics,
        }
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Next event, or `None` once the room's channel has been closed.
    pub async fn recv(&mut self) -> Option<UpdateEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(missed)) => {
                    log::warn!(
                        "Subscriber of {} lagged, skipped {} events",
                        self.room_id,
                        missed
                    );
                    self.metrics.subscriber_lagged(missed);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = UpdateEvent> + Send + 'static {
        futures::stream::unfold(self, |mut subscription| async move {
            let event = subscription.recv().await?;
            Some((event, subscription))
        })
    }
}

impl Drop for RoomSubscription {
    fn drop(&mut self) {
        self.metrics.subscription_changed("dropped");
        log::debug!("Subscriber of {} disconnected", self.room_id);
    }
}

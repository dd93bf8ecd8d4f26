pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::ids::{BoardId, RoomId, UserId};
pub use models::joined_room::JoinedRoom;
pub use models::membership::Membership;
pub use models::room::Room;
pub use models::update_event::UpdateEvent;

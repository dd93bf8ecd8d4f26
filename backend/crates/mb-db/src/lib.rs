pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::pool::{MIGRATOR, connect, connect_in_memory};
pub use error::{DbError, Result};
pub use repositories::membership_repository::MembershipRepository;
pub use repositories::room_repository::RoomRepository;
pub use repositories::user_repository::UserRepository;

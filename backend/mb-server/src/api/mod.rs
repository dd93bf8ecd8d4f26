pub mod error;
pub mod extractors;
pub mod live;
pub mod memberships;
pub mod rooms;

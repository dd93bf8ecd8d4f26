pub mod open_room_request;
pub mod room_dto;
pub mod room_response;
#[allow(clippy::module_inception)]
pub mod rooms;

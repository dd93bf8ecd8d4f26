pub mod joined_room_dto;
pub mod joined_room_list_response;
pub mod list_rooms_query;
#[allow(clippy::module_inception)]
pub mod memberships;
pub mod occupancy_response;

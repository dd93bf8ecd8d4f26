pub mod admin;
pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::CurrentUser,
    live::live::{board_updates, room_updates},
    memberships::{
        joined_room_dto::JoinedRoomDto,
        joined_room_list_response::JoinedRoomListResponse,
        list_rooms_query::ListRoomsQuery,
        memberships::{get_occupancy, join_room, leave_room, list_my_rooms},
        occupancy_response::OccupancyResponse,
    },
    rooms::{
        open_room_request::OpenRoomRequest,
        room_dto::RoomDto,
        room_response::RoomResponse,
        rooms::{close_room, get_room, open_room},
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;

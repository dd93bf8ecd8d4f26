pub mod ids;
pub mod joined_room;
pub mod membership;
pub mod room;
pub mod update_event;

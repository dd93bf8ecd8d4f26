mod room;
mod update_event;

pub mod actor_directory;
pub mod event_store;

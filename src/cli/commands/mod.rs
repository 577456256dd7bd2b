pub mod actions;
pub mod list;
pub mod record;

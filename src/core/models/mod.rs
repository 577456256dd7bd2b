pub mod auth_context;
pub mod event_record;
pub mod query;

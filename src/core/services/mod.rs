pub mod actor_resolver;
pub mod query_engine;

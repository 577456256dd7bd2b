use std::collections::HashMap;

use crate::core::traits::actor_directory::ActorDirectory;

/// Label shown for events without a user id.
pub const SYSTEM_ACTOR: &str = "System";

/// Resolves `user_id`s to display names for one rendered page.
///
/// Create one per request: the cache lives as long as the resolver, so
/// every distinct id hits the directory at most once.
pub struct ActorResolver<'a> {
    directory: &'a dyn ActorDirectory,
    cache: HashMap<String, String>,
}

impl<'a> ActorResolver<'a> {
    pub fn new(directory: &'a dyn ActorDirectory) -> Self {
        Self {
            directory,
            cache: HashMap::new(),
        }
    }

    /// Display name for an event's actor.
    pub fn resolve(&mut self, user_id: Option<&str>) -> String {
        let Some(id) = user_id else {
            return SYSTEM_ACTOR.to_string();
        };

        if let Some(name) = self.cache.get(id) {
            return name.clone();
        }

        let name = self
            .directory
            .display_name(id)
            .unwrap_or_else(|| format!("User #{id}"));
        self.cache.insert(id.to_string(), name.clone());
        name
    }
}

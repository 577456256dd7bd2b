use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::errors::{LogError, Result};
use crate::core::traits::actor_directory::ActorDirectory;

/// Staff directory read from a TOML file mapping user ids to names.
///
/// Example `users.toml`:
/// ```toml
/// [users]
/// "1" = "Maria (Head Chef)"
/// "7" = "Dev Patel"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct TomlUserDirectory {
    #[serde(default)]
    users: HashMap<String, String>,
}

impl TomlUserDirectory {
    /// Load the directory. A missing file gives an empty directory, so
    /// every actor falls back to its id.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no user directory, showing raw ids");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| LogError::InvalidConfig {
            detail: format!("Failed to parse user directory {}: {e}", path.display()),
        })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}

impl ActorDirectory for TomlUserDirectory {
    fn display_name(&self, user_id: &str) -> Option<String> {
        self.users.get(user_id).cloned()
    }
}

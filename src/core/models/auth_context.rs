use std::fmt;
use std::str::FromStr;

/// Back-office roles known to the admin suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Staff,
    /// Scheduled jobs and other unattended work.
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Staff => "staff",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            "system" => Ok(Self::System),
            other => Err(format!(
                "unknown role '{other}' (expected admin, manager, staff or system)"
            )),
        }
    }
}

/// Who is performing a request. Passed explicitly into each handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Option<String>,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: Option<String>, role: Role) -> Self {
        // A system actor never carries a user id.
        if role == Role::System {
            return Self::system();
        }
        Self {
            user_id: user_id.filter(|id| !id.trim().is_empty()),
            role,
        }
    }

    pub fn system() -> Self {
        Self {
            user_id: None,
            role: Role::System,
        }
    }
}

//! Account roles.
//!
//! Role names must match the seed data in `20260301000002_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Learner,
}

impl Role {
    /// Role given to self-registered accounts.
    pub const DEFAULT: Role = Role::Learner;

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Learner => "learner",
        }
    }

    /// Whether the role may author levels, lessons, activities, exercises
    /// and media.
    pub fn can_edit_content(self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "learner" => Ok(Role::Learner),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editors_and_admins_can_edit() {
        assert!(Role::Admin.can_edit_content());
        assert!(Role::Editor.can_edit_content());
        assert!(!Role::Learner.can_edit_content());
    }

    #[test]
    fn role_names_parse_back() {
        for role in [Role::Admin, Role::Editor, Role::Learner] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("guest".parse::<Role>().is_err());
        assert_eq!(serde_json::to_value(Role::Editor).unwrap(), "editor");
    }
}

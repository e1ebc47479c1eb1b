//! Role identifiers and the fixed role hierarchy.
//!
//! ```text
//! ROLE_ROOT -> ROLE_ADMIN -> ROLE_USER -> ROLE_LOGGED
//! ROLE_API  -> ROLE_LOGGED
//! ```
//!
//! A role grants itself and every role reachable below it.

use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::model::role::RoleDto;

/// Built-in role. Declaration order is the order roles are listed in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Root,
    Admin,
    User,
    Api,
    Logged,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Root, Role::Admin, Role::User, Role::Api, Role::Logged];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Root => "ROLE_ROOT",
            Role::Admin => "ROLE_ADMIN",
            Role::User => "ROLE_USER",
            Role::Api => "ROLE_API",
            Role::Logged => "ROLE_LOGGED",
        }
    }

    /// Roles directly below this one in the hierarchy.
    pub fn children(&self) -> &'static [Role] {
        match self {
            Role::Root => &[Role::Admin],
            Role::Admin => &[Role::User],
            Role::User => &[Role::Logged],
            Role::Api => &[Role::Logged],
            Role::Logged => &[],
        }
    }

    /// This role plus every role it inherits, in declaration order.
    pub fn inherited(&self) -> Vec<Role> {
        Self::expand([*self])
    }

    /// Expands a set of granted roles through the hierarchy.
    ///
    /// # Arguments
    /// - `roles` - Directly granted roles, duplicates allowed
    ///
    /// # Returns
    /// - `Vec<Role>` - Unique effective roles in declaration order
    pub fn expand(roles: impl IntoIterator<Item = Role>) -> Vec<Role> {
        let mut effective = BTreeSet::new();
        let mut pending: Vec<Role> = roles.into_iter().collect();

        while let Some(role) = pending.pop() {
            if effective.insert(role) {
                pending.extend_from_slice(role.children());
            }
        }

        effective.into_iter().collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| format!("Unknown role '{}'", value))
    }
}

/// Role row as stored in the `role` table.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
    pub role: String,
    pub description: String,
}

impl RoleRecord {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::role::Model) -> Self {
        Self {
            role: entity.role,
            description: entity.description,
        }
    }

    /// Converts domain model to DTO for API responses.
    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            role: self.role,
            description: self.description,
        }
    }
}

/// String form of a list of roles, as exposed over the API and in JWT claims.
pub fn role_names(roles: &[Role]) -> Vec<String> {
    roles.iter().map(|role| role.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_inherits_every_user_role() {
        assert_eq!(
            Role::Root.inherited(),
            vec![Role::Root, Role::Admin, Role::User, Role::Logged]
        );
    }

    #[test]
    fn api_only_inherits_logged() {
        assert_eq!(Role::Api.inherited(), vec![Role::Api, Role::Logged]);
    }

    #[test]
    fn expand_removes_duplicates() {
        let roles = Role::expand([Role::User, Role::Logged, Role::Admin, Role::User]);

        assert_eq!(roles, vec![Role::Admin, Role::User, Role::Logged]);
    }

    #[test]
    fn parses_role_names() {
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert!("ROLE_UNKNOWN".parse::<Role>().is_err());
        assert!("role_admin".parse::<Role>().is_err());
    }
}

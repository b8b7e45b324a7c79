use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Platform role carried in the credential's role list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[display("LEARNER")]
    Learner,
    #[display("TRAINER")]
    Trainer,
    #[display("ADMIN")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Learner, Role::Trainer, Role::Admin];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Learner => "LEARNER",
            Trainer => "TRAINER",
            Admin => "ADMIN",
        }
    }

    /// Parse a role claim. A `ROLE_` authority prefix is tolerated.
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        let code = code.strip_prefix("ROLE_").unwrap_or(code);
        match code {
            "LEARNER" => Some(Learner),
            "TRAINER" => Some(Trainer),
            "ADMIN" => Some(Admin),
            _ => None,
        }
    }

    #[inline]
    const fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// Set of roles allowed to run one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    #[inline]
    pub const fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("LEARNER"), Some(Role::Learner));
        assert_eq!(Role::from_code("ROLE_ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_code("TRAINER"), Some(Role::Trainer));
        assert_eq!(Role::from_code("learner"), None);
        assert_eq!(Role::from_code("SUPER_ADMIN"), None);
    }

    #[test]
    fn test_role_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.code());
        }
    }

    #[test]
    fn test_role_set() {
        let set = RoleSet::of(&[Role::Learner, Role::Admin]);
        assert!(set.contains(Role::Learner));
        assert!(set.contains(Role::Admin));
        assert!(!set.contains(Role::Trainer));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Role::Learner, Role::Admin]);
        assert!(!RoleSet::default().contains(Role::Admin));
    }
}

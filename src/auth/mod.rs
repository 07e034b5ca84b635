//! Checker collaborators for privileged operations.
//!
//! Handlers receive both checkers by injection through `AppState`; nothing
//! in this crate resolves them from global state. The decision logic
//! behind a real deployment lives outside this fragment — the bundled
//! implementations are config-driven policies sufficient to run the panel.

use std::collections::HashSet;

use crate::acl::AccessType;

/// Answers "is this server feature switched on?", e.g. `access_control`.
pub trait FunctionChecker: Send + Sync {
    fn check(&self, function: &str) -> bool;
}

/// Answers "may this caller act at the given level?" for one action type.
/// `user_id` narrows the check to a specific account when present.
pub trait PrivilegeChecker: Send + Sync {
    fn check(&self, action: AccessType, level: i64, user_id: Option<i64>) -> bool;
}

/// Feature switches taken from `site.features` in the config.
pub struct ConfigFunctionChecker {
    enabled: HashSet<String>,
}

impl ConfigFunctionChecker {
    pub fn new(features: &[String]) -> Self {
        Self {
            enabled: features.iter().cloned().collect(),
        }
    }
}

impl FunctionChecker for ConfigFunctionChecker {
    fn check(&self, function: &str) -> bool {
        self.enabled.contains(function)
    }
}

/// Grants any action up to a fixed level ceiling, regardless of user.
pub struct LevelPrivilegeChecker {
    granted: i64,
}

impl LevelPrivilegeChecker {
    pub fn new(granted: i64) -> Self {
        Self { granted }
    }
}

impl PrivilegeChecker for LevelPrivilegeChecker {
    fn check(&self, _action: AccessType, level: i64, _user_id: Option<i64>) -> bool {
        level <= self.granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acl::level;

    #[test]
    fn function_checker_follows_feature_list() {
        let checker = ConfigFunctionChecker::new(&["access_control".to_string()]);
        assert!(checker.check("access_control"));
        assert!(!checker.check("batch_download"));
    }

    #[test]
    fn privilege_checker_enforces_ceiling() {
        let checker = LevelPrivilegeChecker::new(level::MANAGER);
        assert!(checker.check(AccessType::Interface, level::USER, None));
        assert!(checker.check(AccessType::Interface, level::MANAGER, Some(1)));
        assert!(!checker.check(AccessType::Interface, level::ADMIN, None));
    }
}

use std::collections::{HashMap, HashSet};

use crate::auth::Role;

/// The five operations every resource kind exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Access rule table: (resource kind, operation) -> required role.
///
/// One table for the whole service instead of role literals scattered
/// through the handlers. Pairs with no rule deny.
#[derive(Debug, Default)]
pub struct AccessPolicy {
    rules: HashMap<(&'static str, Operation), Role>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the standard two-tier rule set for a resource kind:
    /// reads require USER, writes require ADMIN.
    pub fn register(&mut self, kind: &'static str) {
        self.rules.insert((kind, Operation::List), Role::User);
        self.rules.insert((kind, Operation::Get), Role::User);
        self.rules.insert((kind, Operation::Create), Role::Admin);
        self.rules.insert((kind, Operation::Update), Role::Admin);
        self.rules.insert((kind, Operation::Delete), Role::Admin);
    }

    pub fn standard(kinds: &[&'static str]) -> Self {
        let mut policy = Self::new();
        for kind in kinds {
            policy.register(kind);
        }
        policy
    }

    /// Pure decision, evaluated before any store access.
    ///
    /// Each rule is checked against the caller's role set independently:
    /// ADMIN does not imply USER. A caller may hold both.
    pub fn authorize(
        &self,
        roles: &HashSet<Role>,
        kind: &'static str,
        operation: Operation,
    ) -> Decision {
        match self.rules.get(&(kind, operation)) {
            Some(required) if roles.contains(required) => Decision::Allow,
            _ => Decision::Deny,
        }
    }
}

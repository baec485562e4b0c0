use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::errors::RegistryError;

/// What a registered name stands for in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Variable,
    Function,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Variable => f.write_str("variable"),
            Role::Function => f.write_str("function"),
        }
    }
}

/// Append-only map from known names to their role.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    names: HashMap<String, Role>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` under `role`. Registering the same name twice with
    /// the same role is a no-op; with a different role it fails.
    pub fn register(&mut self, name: impl Into<String>, role: Role) -> Result<(), RegistryError> {
        let name = name.into();
        match self.names.get(&name) {
            Some(&existing) if existing != role => Err(RegistryError::DuplicateConflict {
                name,
                existing,
                requested: role,
            }),
            Some(_) => Ok(()),
            None => {
                tracing::trace!(%name, %role, "registered identifier");
                self.names.insert(name, role);
                Ok(())
            }
        }
    }

    /// Role of `name`, or `None` when it was never registered.
    pub fn classify(&self, name: &str) -> Option<Role> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered names with their roles, sorted by name.
    pub fn entries(&self) -> Vec<(&str, Role)> {
        let mut entries: Vec<_> = self
            .names
            .iter()
            .map(|(name, role)| (name.as_str(), *role))
            .collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }
}

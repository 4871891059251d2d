//! Test framework integrations and the registry that selects them by name.
//!
//! An integration decides how the project's test suite is run against a
//! mutant. Only selection lives here; the integrations themselves are run by
//! the execution environment.
//!
//! ## Adding New Integrations
//!
//! 1. Add a variant to [`Integration`]
//! 2. Register its canonical name in [`IntegrationRegistry::with_builtins()`]

use serde::Serialize;

/// Available test framework integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Integration {
    /// Kills no mutations; used when no integration is selected.
    #[default]
    Null,
    /// `RSpec` 2.x test suites.
    Rspec2,
}

impl Integration {
    /// Returns the canonical name used with `--use`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Rspec2 => "rspec",
        }
    }

    /// Returns a short description of the integration.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Null => "Null integration, kills no mutations",
            Self::Rspec2 => "RSpec 2 integration",
        }
    }
}

/// Constructor for an integration, stored in the registry.
pub type IntegrationFactory = fn() -> Integration;

/// Registry mapping canonical integration names to their factories.
pub struct IntegrationRegistry {
    entries: Vec<(&'static str, IntegrationFactory)>,
}

impl IntegrationRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a registry with every built-in integration registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Integration::Null.name(), || Integration::Null);
        registry.register(Integration::Rspec2.name(), || Integration::Rspec2);
        registry
    }

    /// Registers a factory under `name`.
    ///
    /// A later registration under the same name shadows the earlier one.
    pub fn register(&mut self, name: &'static str, factory: IntegrationFactory) {
        self.entries.retain(|(existing, _)| *existing != name);
        self.entries.push((name, factory));
    }

    /// Resolves an integration by its exact canonical name.
    ///
    /// Returns `None` if no integration is registered under `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Integration> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, factory)| factory())
    }

    /// Returns all registered names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }
}

impl Default for IntegrationRegistry {
    /// Same as [`IntegrationRegistry::new`]: an empty registry.
    fn default() -> Self {
        Self::new()
    }
}

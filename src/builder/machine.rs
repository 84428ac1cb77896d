//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Handlers, ParentTable};
use crate::machine::Machine;

/// Builder for constructing machines with a fluent API.
///
/// Parent registrations switch the machine to static parent lookup; without
/// any, parents are discovered with `ParentQuery`.
pub struct MachineBuilder<H: Handlers> {
    handlers: H,
    initial: Option<H::State>,
    config: MachineConfig,
    parents: Option<ParentTable<H::State>>,
}

impl<H: Handlers> MachineBuilder<H> {
    /// Create a new builder around a handler set.
    pub fn new(handlers: H) -> Self {
        Self {
            handlers,
            initial: None,
            config: MachineConfig::default(),
            parents: None,
        }
    }

    /// Set the initial pseudo-state (required).
    pub fn initial(mut self, state: H::State) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Install a prepared parent table.
    pub fn parents(mut self, table: ParentTable<H::State>) -> Self {
        self.parents = Some(table);
        self
    }

    /// Register `parent` as the parent of `child`.
    /// Returns an error if the registration would break the hierarchy.
    pub fn child(mut self, parent: H::State, child: H::State) -> Result<Self, BuildError> {
        self.parents
            .get_or_insert_with(ParentTable::new)
            .register_child(parent, child)?;
        Ok(self)
    }

    /// Register `parent` as the parent of every state in `children`.
    pub fn children<I>(mut self, parent: H::State, children: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = H::State>,
    {
        self.parents
            .get_or_insert_with(ParentTable::new)
            .register_children(parent, children)?;
        Ok(self)
    }

    /// Build and bootstrap the machine.
    /// Returns an error if required fields are missing or bootstrap fails.
    pub fn build(self) -> Result<Machine<H>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        self.config.validate()?;

        let machine = Machine::assemble(self.handlers, initial, self.config, self.parents)?;
        Ok(machine)
    }
}

//! DefinitionRegistry - ordered storage for service definitions.
//!
//! This module provides [`DefinitionRegistry`], the store that compiler passes
//! walk and mutate. It keeps three things:
//!
//! - **Definitions**: stored in insertion order with an id index for O(1)
//!   lookup. Passes iterate in insertion order, so results and error reports
//!   are deterministic.
//! - **Container-wide bindings**: declared once and visible to every
//!   definition unless the definition declares the same key itself.
//! - **Consumed bindings**: the set of [`BindingId`]s matched by a parameter in
//!   any pass so far. Ids are only ever added.
//!
//! # Ownership
//!
//! `DefinitionRegistry` is not synchronized. During compilation the pipeline
//! holds it by `&mut` for its whole duration; no two passes ever run
//! interleaved.
//!
//! # Example
//!
//! ```
//! use wiring_registry::DefinitionRegistry;
//! use wiring_core::Reference;
//!
//! let mut registry = DefinitionRegistry::new();
//! registry
//!     .register("mailer", "App::Mailer")
//!     .add_argument(Reference::new("transport"));
//! registry.bind_default("$locale", "fr");
//!
//! assert!(registry.contains("mailer"));
//! assert_eq!(registry.default_bindings().len(), 1);
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

use wiring_core::{
    Argument, BindingError, BindingId, BindingKey, Bindings, BoundArgument, ClassName,
    ServiceDefinition, ServiceId,
};

use crate::BindingTable;

/// Ordered registry of service definitions.
#[derive(Debug, Default, Clone)]
pub struct DefinitionRegistry {
    /// Definitions in insertion order.
    definitions: Vec<(ServiceId, ServiceDefinition)>,

    /// Reverse index: id -> position in `definitions`.
    index: FxHashMap<ServiceId, usize>,

    /// Container-wide bindings.
    defaults: Bindings,

    /// Bindings consumed by any pass so far.
    consumed: FxHashSet<BindingId>,
}

impl DefinitionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a fresh definition for `class` under `id`.
    ///
    /// An existing definition with the same id is replaced but keeps its
    /// position in the iteration order.
    pub fn register(
        &mut self,
        id: impl Into<ServiceId>,
        class: impl Into<ClassName>,
    ) -> &mut ServiceDefinition {
        self.set_definition(id, ServiceDefinition::new(class))
    }

    /// Register an autowired definition for `class` under `id`.
    pub fn autowire(
        &mut self,
        id: impl Into<ServiceId>,
        class: impl Into<ClassName>,
    ) -> &mut ServiceDefinition {
        let definition = self.register(id, class);
        definition.set_autowired(true);
        definition
    }

    /// Store `definition` under `id`, replacing any previous one in place.
    pub fn set_definition(
        &mut self,
        id: impl Into<ServiceId>,
        definition: ServiceDefinition,
    ) -> &mut ServiceDefinition {
        let id = id.into();
        let slot = match self.index.get(&id) {
            Some(&slot) => {
                self.definitions[slot].1 = definition;
                slot
            }
            None => {
                let slot = self.definitions.len();
                self.index.insert(id.clone(), slot);
                self.definitions.push((id, definition));
                slot
            }
        };
        &mut self.definitions[slot].1
    }

    /// Remove a definition, preserving the order of the others.
    pub fn remove(&mut self, id: &str) -> Option<ServiceDefinition> {
        let slot = self.index.remove(id)?;
        let (_, definition) = self.definitions.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(definition)
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn get(&self, id: &str) -> Option<&ServiceDefinition> {
        self.index.get(id).map(|&slot| &self.definitions[slot].1)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ServiceDefinition> {
        let slot = *self.index.get(id)?;
        Some(&mut self.definitions[slot].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get a definition by its position in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&ServiceId, &ServiceDefinition)> {
        self.definitions.get(index).map(|(id, def)| (id, def))
    }

    /// Get a mutable definition by its position in insertion order.
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&ServiceId, &mut ServiceDefinition)> {
        self.definitions.get_mut(index).map(|(id, def)| (&*id, def))
    }

    /// Iterate definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceId, &ServiceDefinition)> {
        self.definitions.iter().map(|(id, def)| (id, def))
    }

    /// Service ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &ServiceId> {
        self.definitions.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Resolve the class a definition is built from.
    ///
    /// Child definitions without a class of their own inherit it from the
    /// nearest parent definition that has one. `Ok(None)` means no definition
    /// in the chain names a class.
    pub fn resolve_class(&self, id: &ServiceId) -> Result<Option<ClassName>, BindingError> {
        let Some(definition) = self.get(id.as_str()) else {
            return Ok(None);
        };
        self.resolve_definition_class(id, definition)
    }

    /// Like [`resolve_class`](Self::resolve_class) for a definition that may
    /// not be registered itself (an inline definition owned by `owner`).
    pub fn resolve_definition_class(
        &self,
        owner: &ServiceId,
        definition: &ServiceDefinition,
    ) -> Result<Option<ClassName>, BindingError> {
        let mut visited: FxHashSet<&ServiceId> = FxHashSet::default();
        let mut current = definition;

        loop {
            if let Some(class) = current.class() {
                return Ok(Some(class.clone()));
            }
            let Some(parent) = current.parent() else {
                return Ok(None);
            };
            if !visited.insert(parent) {
                return Err(BindingError::CircularParent {
                    service: owner.clone(),
                    parent: parent.clone(),
                });
            }
            current = self
                .get(parent.as_str())
                .ok_or_else(|| BindingError::UnknownParent {
                    service: owner.clone(),
                    parent: parent.clone(),
                })?;
        }
    }

    // ==========================================================================
    // Container-wide bindings
    // ==========================================================================

    /// Declare a container-wide binding and return its identity.
    pub fn bind_default(
        &mut self,
        key: impl Into<BindingKey>,
        value: impl Into<Argument>,
    ) -> BindingId {
        let bound = BoundArgument::defaults(value);
        let id = bound.id();
        self.defaults.insert(key, bound);
        id
    }

    pub fn default_bindings(&self) -> &Bindings {
        &self.defaults
    }

    /// The effective binding table of `definition`: its own bindings layered
    /// over the container-wide ones.
    pub fn binding_table<'a>(&'a self, definition: &'a ServiceDefinition) -> BindingTable<'a> {
        BindingTable::new(definition.bindings(), &self.defaults)
    }

    // ==========================================================================
    // Consumed bindings
    // ==========================================================================

    pub fn is_consumed(&self, id: BindingId) -> bool {
        self.consumed.contains(&id)
    }

    /// Record bindings as consumed. Already-consumed ids are ignored.
    pub fn mark_consumed(&mut self, ids: impl IntoIterator<Item = BindingId>) {
        self.consumed.extend(ids);
    }

    pub fn consumed_bindings(&self) -> &FxHashSet<BindingId> {
        &self.consumed
    }
}

//! Resolve Bindings Pass - substitute bound values and report unused bindings.
//!
//! Walks every definition in insertion order and lets the
//! [`ArgumentResolver`] match its parameters against its bindings. Problems
//! found on one definition are collected and the walk goes on; after the last
//! definition every binding that was never consumed is reported.
//!
//! A container-wide binding counts as seen only through a definition it is
//! visible to. One that every definition shadows with a local binding is
//! never reported.
//!
//! ## States
//!
//! ```text
//! Idle -> Resolving { 0 } -> ... -> Resolving { n - 1 } -> Validating -> Done
//!                                                                   \-> Failed
//! ```
//!
//! `Failed` is reached when any error was collected, whichever state found it.
//!
//! ## Idempotence
//!
//! Consumed binding ids are written back to the registry and seed the next
//! run, and substituted positions are no longer placeholders. Running the pass
//! twice over the same registry changes nothing the second time.

use tracing::debug;

use wiring_core::{BindingError, ConfigurationError, SignatureProvider};
use wiring_registry::DefinitionRegistry;

use crate::argument_resolver::ArgumentResolver;
use crate::passes::CompilerPass;
use crate::usage::BindingUsage;

/// Where a [`ResolveBindingsPass`] is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveState {
    #[default]
    Idle,
    /// Resolving the definition at `index` in insertion order.
    Resolving { index: usize },
    /// All definitions visited; checking for unused bindings.
    Validating,
    Done,
    Failed,
}

/// Output of the resolve bindings pass.
#[derive(Debug, Default)]
pub struct ResolveOutput {
    /// Number of definitions visited.
    pub definitions_resolved: usize,
    /// Number of definitions whose arguments or method calls changed.
    pub definitions_changed: usize,
    /// Number of argument positions substituted.
    pub substitutions: usize,
    /// Collected errors.
    pub errors: Vec<BindingError>,
}

impl ResolveOutput {
    pub fn into_result(self) -> Result<(), ConfigurationError> {
        ConfigurationError::from(self.errors).into_result()
    }
}

/// Resolve Bindings Pass.
#[derive(Debug, Default)]
pub struct ResolveBindingsPass {
    state: ResolveState,
}

impl ResolveBindingsPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ResolveState {
        self.state
    }

    /// Run the pass and return everything it found.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(
        &mut self,
        registry: &mut DefinitionRegistry,
        signatures: &dyn SignatureProvider,
    ) -> ResolveOutput {
        debug!(definitions = registry.len(), "resolving bindings");

        let mut output = ResolveOutput::default();
        let mut usage = BindingUsage::seeded(registry.consumed_bindings());

        for index in 0..registry.len() {
            self.state = ResolveState::Resolving { index };

            // Phase 1: resolve against the registry (immutable borrow)
            let resolution = {
                let Some((id, definition)) = registry.get_index(index) else {
                    break;
                };
                ArgumentResolver::new(registry, signatures, &mut usage).resolve(id, definition)
            };

            // Phase 2: apply to the definition (mutable borrow)
            if let Some((_, definition)) = registry.get_index_mut(index) {
                let mut changed = false;
                if definition.arguments() != resolution.arguments.as_slice() {
                    definition.set_arguments(resolution.arguments);
                    changed = true;
                }
                if definition.method_calls() != resolution.method_calls.as_slice() {
                    definition.set_method_calls(resolution.method_calls);
                    changed = true;
                }
                if changed {
                    output.definitions_changed += 1;
                }
            }

            output.definitions_resolved += 1;
            output.substitutions += resolution.substitutions;
            output.errors.extend(resolution.errors);
        }

        self.state = ResolveState::Validating;
        output.errors.extend(usage.unused());
        registry.mark_consumed(usage.consumed().iter().copied());

        self.state = if output.errors.is_empty() {
            ResolveState::Done
        } else {
            ResolveState::Failed
        };

        debug!(
            resolved = output.definitions_resolved,
            changed = output.definitions_changed,
            substitutions = output.substitutions,
            errors = output.errors.len(),
            "bindings resolved"
        );

        output
    }

    /// Run the pass; any collected error fails it.
    pub fn process(
        &mut self,
        registry: &mut DefinitionRegistry,
        signatures: &dyn SignatureProvider,
    ) -> Result<(), ConfigurationError> {
        self.run(registry, signatures).into_result()
    }
}

impl CompilerPass for ResolveBindingsPass {
    fn name(&self) -> &'static str {
        "resolve-bindings"
    }

    fn process(
        &mut self,
        registry: &mut DefinitionRegistry,
        signatures: &dyn SignatureProvider,
    ) -> Result<(), ConfigurationError> {
        ResolveBindingsPass::process(self, registry, signatures)
    }
}

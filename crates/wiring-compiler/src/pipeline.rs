//! Pass pipeline.
//!
//! [`PassConfig`] decides which passes run and in what order; [`Compiler`]
//! runs them.
//!
//! Passes are ordered by [`PassPhase`] first. Within a phase a higher
//! priority runs earlier, and passes with equal priority keep the order they
//! were added in.

use std::fmt;

use tracing::debug;

use wiring_core::{ConfigurationError, SignatureProvider};
use wiring_registry::DefinitionRegistry;

use crate::passes::{AutowireRequiredMethodsPass, CompilerPass, ResolveBindingsPass};

/// Coarse ordering of passes, earliest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PassPhase {
    BeforeOptimization,
    Optimization,
    BeforeRemoving,
    Removing,
    AfterRemoving,
}

struct RegisteredPass {
    phase: PassPhase,
    priority: i32,
    pass: Box<dyn CompilerPass>,
}

/// Ordered set of compiler passes.
pub struct PassConfig {
    passes: Vec<RegisteredPass>,
}

impl PassConfig {
    /// A configuration with no passes at all.
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add a pass to `phase` with the given priority.
    pub fn add_pass(
        &mut self,
        pass: impl CompilerPass + 'static,
        phase: PassPhase,
        priority: i32,
    ) -> &mut Self {
        self.passes.push(RegisteredPass {
            phase,
            priority,
            pass: Box::new(pass),
        });
        // Stable: equal keys keep insertion order
        self.passes
            .sort_by(|a, b| a.phase.cmp(&b.phase).then(b.priority.cmp(&a.priority)));
        self
    }

    /// Pass names in run order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|entry| entry.pass.name()).collect()
    }

    /// Pass names of one phase in run order.
    pub fn phase_names(&self, phase: PassPhase) -> Vec<&'static str> {
        self.passes
            .iter()
            .filter(|entry| entry.phase == phase)
            .map(|entry| entry.pass.name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassConfig {
    /// Required-method autowiring, then binding resolution.
    fn default() -> Self {
        let mut config = Self::empty();
        config
            .add_pass(AutowireRequiredMethodsPass::new(), PassPhase::Optimization, 0)
            .add_pass(ResolveBindingsPass::new(), PassPhase::Optimization, 0);
        config
    }
}

impl fmt::Debug for PassConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.passes
                    .iter()
                    .map(|entry| (entry.phase, entry.priority, entry.pass.name())),
            )
            .finish()
    }
}

/// Runs a [`PassConfig`] over a registry.
#[derive(Debug, Default)]
pub struct Compiler {
    config: PassConfig,
}

impl Compiler {
    pub fn new(config: PassConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PassConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PassConfig {
        &mut self.config
    }

    /// Run every pass in order. The first failing pass stops the build.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(
        &mut self,
        registry: &mut DefinitionRegistry,
        signatures: &dyn SignatureProvider,
    ) -> Result<(), ConfigurationError> {
        for entry in &mut self.config.passes {
            let name = entry.pass.name();
            debug!(pass = name, phase = ?entry.phase, "running compiler pass");
            entry.pass.process(registry, signatures).inspect_err(|errors| {
                debug!(pass = name, errors = errors.len(), "compiler pass failed");
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::{BindingError, ServiceId};
    use wiring_registry::ClassCatalog;

    struct Named(&'static str);

    impl CompilerPass for Named {
        fn name(&self) -> &'static str {
            self.0
        }

        fn process(
            &mut self,
            _registry: &mut DefinitionRegistry,
            _signatures: &dyn SignatureProvider,
        ) -> Result<(), ConfigurationError> {
            Ok(())
        }
    }

    struct Failing;

    impl CompilerPass for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn process(
            &mut self,
            _registry: &mut DefinitionRegistry,
            _signatures: &dyn SignatureProvider,
        ) -> Result<(), ConfigurationError> {
            Err(BindingError::UnknownParent {
                service: ServiceId::new("child"),
                parent: ServiceId::new("base"),
            }
            .into())
        }
    }

    struct Marker;

    impl CompilerPass for Marker {
        fn name(&self) -> &'static str {
            "marker"
        }

        fn process(
            &mut self,
            registry: &mut DefinitionRegistry,
            _signatures: &dyn SignatureProvider,
        ) -> Result<(), ConfigurationError> {
            registry.register("marker", "App::Marker");
            Ok(())
        }
    }

    #[test]
    fn default_pipeline() {
        assert_eq!(
            PassConfig::default().pass_names(),
            vec!["autowire-required-methods", "resolve-bindings"]
        );
    }

    #[test]
    fn phase_then_priority_then_insertion() {
        let mut config = PassConfig::empty();
        config
            .add_pass(Named("late"), PassPhase::AfterRemoving, 100)
            .add_pass(Named("low"), PassPhase::Optimization, -5)
            .add_pass(Named("first-tie"), PassPhase::Optimization, 0)
            .add_pass(Named("second-tie"), PassPhase::Optimization, 0)
            .add_pass(Named("high"), PassPhase::Optimization, 10)
            .add_pass(Named("early"), PassPhase::BeforeOptimization, -100);

        assert_eq!(
            config.pass_names(),
            vec!["early", "high", "first-tie", "second-tie", "low", "late"]
        );
        assert_eq!(config.phase_names(PassPhase::Removing), Vec::<&str>::new());
    }

    #[test]
    fn first_failure_aborts() {
        let mut config = PassConfig::empty();
        config
            .add_pass(Failing, PassPhase::Optimization, 0)
            .add_pass(Marker, PassPhase::Optimization, 0);

        let mut registry = DefinitionRegistry::new();
        let result = Compiler::new(config).compile(&mut registry, &ClassCatalog::new());

        assert_eq!(result.map_err(|e| e.len()), Err(1));
        assert!(!registry.contains("marker"));
    }
}

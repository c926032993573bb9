//! Container builder.
//!
//! [`ContainerBuilder`] owns everything a build needs: the definitions, the
//! class signatures they are checked against and the pass pipeline. Once
//! [`compile`](ContainerBuilder::compile) succeeds the builder is frozen and
//! every mutating call fails with [`ContainerError::Frozen`].
//!
//! # Example
//!
//! ```
//! use wiring::{ClassDecl, ContainerBuilder, ParamSpec, Reference};
//!
//! let mut builder = ContainerBuilder::new();
//! builder
//!     .catalog_mut()
//!     .declare(ClassDecl::new("App::Logger"))
//!     .unwrap();
//! builder
//!     .catalog_mut()
//!     .declare(
//!         ClassDecl::new("App::Mailer")
//!             .with_constructor(vec![ParamSpec::typed("logger", "App::Logger")]),
//!     )
//!     .unwrap();
//!
//! builder.register("logger", "App::Logger").unwrap();
//! builder
//!     .register("mailer", "App::Mailer")
//!     .unwrap()
//!     .bind("App::Logger", Reference::new("logger"));
//!
//! builder.compile().unwrap();
//! assert!(builder.is_compiled());
//! ```

use tracing::debug;

use wiring_compiler::{Compiler, PassConfig};
use wiring_core::{
    Argument, BindingId, BindingKey, ClassName, ContainerError, ServiceDefinition, ServiceId,
};
use wiring_registry::{ClassCatalog, DefinitionRegistry};

/// Collects definitions and compiles them into their final shape.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    registry: DefinitionRegistry,
    catalog: ClassCatalog,
    compiler: Compiler,
    compiled: bool,
}

impl ContainerBuilder {
    /// Create a builder with the default pass pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder over an existing class catalog.
    pub fn with_catalog(catalog: ClassCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Replace the pass pipeline.
    pub fn with_pass_config(mut self, config: PassConfig) -> Self {
        self.compiler = Compiler::new(config);
        self
    }

    // ==========================================================================
    // Definitions
    // ==========================================================================

    /// Register a definition for `class` under `id`.
    pub fn register(
        &mut self,
        id: impl Into<ServiceId>,
        class: impl Into<ClassName>,
    ) -> Result<&mut ServiceDefinition, ContainerError> {
        let id = self.check_open(id.into())?;
        Ok(self.registry.register(id, class))
    }

    /// Register an autowired definition for `class` under `id`.
    pub fn autowire(
        &mut self,
        id: impl Into<ServiceId>,
        class: impl Into<ClassName>,
    ) -> Result<&mut ServiceDefinition, ContainerError> {
        let id = self.check_open(id.into())?;
        Ok(self.registry.autowire(id, class))
    }

    /// Store a prepared definition under `id`.
    pub fn set_definition(
        &mut self,
        id: impl Into<ServiceId>,
        definition: ServiceDefinition,
    ) -> Result<&mut ServiceDefinition, ContainerError> {
        let id = self.check_open(id.into())?;
        Ok(self.registry.set_definition(id, definition))
    }

    pub fn definition(&self, id: &str) -> Result<&ServiceDefinition, ContainerError> {
        self.registry
            .get(id)
            .ok_or_else(|| ContainerError::ServiceNotFound(ServiceId::new(id)))
    }

    pub fn definition_mut(&mut self, id: &str) -> Result<&mut ServiceDefinition, ContainerError> {
        if self.compiled {
            return Err(ContainerError::Frozen {
                id: ServiceId::new(id),
            });
        }
        self.registry
            .get_mut(id)
            .ok_or_else(|| ContainerError::ServiceNotFound(ServiceId::new(id)))
    }

    pub fn has_definition(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    /// Declare a binding visible to every definition.
    pub fn bind_default(
        &mut self,
        key: impl Into<BindingKey>,
        value: impl Into<Argument>,
    ) -> Result<BindingId, ContainerError> {
        if self.compiled {
            return Err(ContainerError::FrozenDefaults);
        }
        Ok(self.registry.bind_default(key, value))
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    // ==========================================================================
    // Signatures
    // ==========================================================================

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ClassCatalog {
        &mut self.catalog
    }

    // ==========================================================================
    // Compilation
    // ==========================================================================

    pub fn pass_config(&self) -> &PassConfig {
        self.compiler.config()
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Run the pass pipeline over all definitions.
    ///
    /// On success the builder is frozen. On failure it stays open so the
    /// configuration can be fixed and compiled again. Compiling a frozen
    /// builder does nothing.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(&mut self) -> Result<(), ContainerError> {
        if self.compiled {
            return Ok(());
        }

        debug!(
            definitions = self.registry.len(),
            classes = self.catalog.len(),
            "compiling container"
        );
        self.compiler.compile(&mut self.registry, &self.catalog)?;
        self.compiled = true;
        debug!("container compiled");
        Ok(())
    }

    fn check_open(&self, id: ServiceId) -> Result<ServiceId, ContainerError> {
        if self.compiled {
            return Err(ContainerError::Frozen { id });
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::{BindingError, Reference};

    #[test]
    fn register_after_compile_is_frozen() {
        let mut builder = ContainerBuilder::new();
        builder.register("a", "A").unwrap();
        builder.catalog_mut().declare(wiring_registry::ClassDecl::new("A")).unwrap();
        builder.compile().unwrap();

        assert_eq!(
            builder.register("b", "B").unwrap_err(),
            ContainerError::Frozen {
                id: ServiceId::new("b")
            }
        );
        assert_eq!(
            builder.bind_default("$x", "y").unwrap_err(),
            ContainerError::FrozenDefaults
        );
        assert!(matches!(
            builder.definition_mut("a"),
            Err(ContainerError::Frozen { .. })
        ));
        assert!(builder.definition("a").is_ok());
    }

    #[test]
    fn failed_compile_stays_open() {
        let mut builder = ContainerBuilder::new();
        builder
            .register("a", "Missing")
            .unwrap()
            .bind("$logger", Reference::new("logger"));

        let Err(ContainerError::Configuration(errors)) = builder.compile() else {
            panic!("expected a configuration error");
        };
        assert!(matches!(
            errors.iter().next(),
            Some(BindingError::UnresolvableClass { .. })
        ));
        assert!(!builder.is_compiled());
        assert!(builder.register("b", "B").is_ok());
    }

    #[test]
    fn unknown_definition() {
        let builder = ContainerBuilder::new();
        assert_eq!(
            builder.definition("nope").unwrap_err(),
            ContainerError::ServiceNotFound(ServiceId::new("nope"))
        );
    }
}

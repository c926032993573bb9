//! Autowire Required Methods Pass - schedule calls to required setters.
//!
//! For every autowired, non-abstract definition whose class resolves, appends
//! a call with no arguments for each required method of the class that the
//! definition does not already call. Inherited methods come first, in the
//! order the signature provider lists them.
//!
//! The calls start out empty; the resolve bindings pass fills their arguments
//! from bindings afterwards. Definitions whose class cannot be resolved are
//! skipped here, so the failure is reported once, by binding resolution.

use tracing::{debug, trace};

use wiring_core::{ConfigurationError, SignatureProvider};
use wiring_registry::DefinitionRegistry;

use crate::passes::CompilerPass;

/// Output of the autowire required methods pass.
#[derive(Debug, Default)]
pub struct AutowireOutput {
    /// Number of definitions inspected.
    pub definitions_inspected: usize,
    /// Number of method calls added.
    pub calls_added: usize,
}

/// Autowire Required Methods Pass.
#[derive(Debug, Default)]
pub struct AutowireRequiredMethodsPass;

impl AutowireRequiredMethodsPass {
    pub fn new() -> Self {
        Self
    }

    /// Run the pass.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(
        &mut self,
        registry: &mut DefinitionRegistry,
        signatures: &dyn SignatureProvider,
    ) -> AutowireOutput {
        let mut output = AutowireOutput::default();

        for index in 0..registry.len() {
            // Phase 1: collect required methods not yet called
            let missing: Vec<String> = {
                let Some((id, definition)) = registry.get_index(index) else {
                    break;
                };
                if !definition.is_autowired() || definition.is_abstract() {
                    continue;
                }
                output.definitions_inspected += 1;

                let Ok(Some(class)) = registry.resolve_definition_class(id, definition) else {
                    continue;
                };
                let Ok(methods) = signatures.methods(&class) else {
                    continue;
                };
                methods
                    .into_iter()
                    .filter(|method| method.is_required() && !definition.has_method_call(method.name()))
                    .map(|method| method.name().to_string())
                    .collect()
            };

            // Phase 2: append the calls
            if let Some((id, definition)) = registry.get_index_mut(index) {
                for method in missing {
                    trace!(service = %id, method = %method, "adding required method call");
                    definition.add_method_call(method, Vec::new());
                    output.calls_added += 1;
                }
            }
        }

        debug!(
            inspected = output.definitions_inspected,
            calls_added = output.calls_added,
            "required methods autowired"
        );

        output
    }
}

impl CompilerPass for AutowireRequiredMethodsPass {
    fn name(&self) -> &'static str {
        "autowire-required-methods"
    }

    fn process(
        &mut self,
        registry: &mut DefinitionRegistry,
        signatures: &dyn SignatureProvider,
    ) -> Result<(), ConfigurationError> {
        self.run(registry, signatures);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::{MethodFlags, MethodSignature, ParamSpec};
    use wiring_registry::{ClassCatalog, ClassDecl};

    fn catalog() -> ClassCatalog {
        let mut catalog = ClassCatalog::new();
        catalog
            .declare(
                ClassDecl::new("App::LoggerAware").with_method(
                    MethodSignature::new("setLogger", vec![ParamSpec::typed("logger", "App::Logger")])
                        .required(),
                ),
            )
            .unwrap();
        catalog
            .declare(
                ClassDecl::new("App::Mailer")
                    .extends("App::LoggerAware")
                    .with_method(
                        MethodSignature::new("setLocale", vec![ParamSpec::typed("locale", "string")])
                            .required(),
                    )
                    .with_method(
                        MethodSignature::new("create", vec![])
                            .required()
                            .with_flags(MethodFlags::STATIC),
                    )
                    .with_method(MethodSignature::new("setDebug", vec![ParamSpec::new("debug")])),
            )
            .unwrap();
        catalog
    }

    fn called(registry: &DefinitionRegistry, id: &str) -> Vec<String> {
        registry
            .get(id)
            .unwrap()
            .method_calls()
            .iter()
            .map(|call| call.method().to_string())
            .collect()
    }

    #[test]
    fn adds_required_methods_ancestors_first() {
        let mut registry = DefinitionRegistry::new();
        registry.autowire("mailer", "App::Mailer");

        let output = AutowireRequiredMethodsPass::new().run(&mut registry, &catalog());
        assert_eq!(output.calls_added, 2);
        assert_eq!(called(&registry, "mailer"), vec!["setLogger", "setLocale"]);
    }

    #[test]
    fn existing_calls_not_duplicated() {
        let mut registry = DefinitionRegistry::new();
        registry
            .autowire("mailer", "App::Mailer")
            .add_method_call("setLocale", vec!["fr".into()]);

        AutowireRequiredMethodsPass::new().run(&mut registry, &catalog());
        assert_eq!(called(&registry, "mailer"), vec!["setLocale", "setLogger"]);
    }

    #[test]
    fn skips_non_autowired_abstract_and_unresolvable() {
        let mut registry = DefinitionRegistry::new();
        registry.register("plain", "App::Mailer");
        registry.autowire("base", "App::Mailer").set_abstract(true);
        registry.autowire("broken", "App::Missing");

        let output = AutowireRequiredMethodsPass::new().run(&mut registry, &catalog());
        assert_eq!(output.calls_added, 0);
        assert_eq!(output.definitions_inspected, 1);
        assert!(called(&registry, "plain").is_empty());
    }
}

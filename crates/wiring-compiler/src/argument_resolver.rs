//! Argument Resolver - substitutes bound values into argument positions.
//!
//! For one definition, the resolver matches the declared parameters of the
//! constructor (or factory method) and of every method call against the
//! definition's [`BindingTable`].
//!
//! ## Candidate keys
//!
//! For an unset or missing argument, tried in order:
//!
//! ```text
//! <param type> $<param name>     e.g. "string $locale"
//! $<param name>                  e.g. "$locale"
//! <param class>                  only for class-typed parameters
//! ```
//!
//! For a placeholder typed reference (id equal to its type), with `n` the
//! reference's own name or else the parameter name:
//!
//! ```text
//! <class> $n
//! $n
//! <class>
//! ```
//!
//! The first hit is substituted and consumed. Explicit arguments are never
//! replaced, and nothing is done past a variadic parameter.
//!
//! ## Value walk
//!
//! After parameter matching every resulting argument is walked: placeholder
//! typed references anywhere get `<class> $name` then `<class>` lookups, lists
//! are walked, and inline definitions are resolved with their own bindings.
//! Errors from inline definitions are attributed to the enclosing service.

use tracing::{trace, warn};

use wiring_core::{
    Argument, BindingError, BindingKey, ClassName, LookupError, MethodCall, ParamSpec, ParamType,
    ServiceDefinition, ServiceId, SignatureProvider, TypedReference,
};
use wiring_registry::{BindingTable, DefinitionRegistry};

use crate::usage::BindingUsage;

/// Outcome of resolving one definition.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Constructor arguments after substitution.
    pub arguments: Vec<Argument>,
    /// Method calls after substitution.
    pub method_calls: Vec<MethodCall>,
    /// Definition-scoped errors, in the order found.
    pub errors: Vec<BindingError>,
    /// Number of positions substituted.
    pub substitutions: usize,
}

/// Matches parameters against bindings for one definition at a time.
pub struct ArgumentResolver<'a> {
    registry: &'a DefinitionRegistry,
    signatures: &'a dyn SignatureProvider,
    usage: &'a mut BindingUsage,
    substitutions: usize,
}

impl<'a> ArgumentResolver<'a> {
    pub fn new(
        registry: &'a DefinitionRegistry,
        signatures: &'a dyn SignatureProvider,
        usage: &'a mut BindingUsage,
    ) -> Self {
        Self {
            registry,
            signatures,
            usage,
            substitutions: 0,
        }
    }

    /// Resolve `definition`, registered under `service`.
    ///
    /// The definition itself is not touched; the caller applies the returned
    /// arguments and method calls.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve(&mut self, service: &ServiceId, definition: &ServiceDefinition) -> Resolution {
        let before = self.substitutions;
        let mut errors = Vec::new();
        let (arguments, method_calls) = self.resolve_definition(service, definition, &mut errors);

        for error in &errors {
            warn!(service = %service, error = %error, "binding resolution failed");
        }

        Resolution {
            arguments,
            method_calls,
            errors,
            substitutions: self.substitutions - before,
        }
    }

    fn resolve_definition(
        &mut self,
        service: &ServiceId,
        definition: &ServiceDefinition,
        errors: &mut Vec<BindingError>,
    ) -> (Vec<Argument>, Vec<MethodCall>) {
        let table = self.registry.binding_table(definition);
        self.observe_bindings(service, table, errors);

        let mut arguments = definition.arguments().to_vec();
        let mut method_calls = definition.method_calls().to_vec();

        if definition.is_abstract() {
            return (arguments, method_calls);
        }

        if !table.is_empty() {
            match self.resolve_class(service, definition) {
                Ok(class) => {
                    self.bind_constructor(service, definition, class.as_ref(), table, &mut arguments, errors);
                    if let Some(class) = &class {
                        self.bind_method_calls(service, definition, class, table, &mut method_calls, errors);
                    }
                }
                Err(error) => errors.push(error),
            }
        }

        for argument in &mut arguments {
            self.walk(service, table, argument, errors);
        }
        for call in &mut method_calls {
            for argument in call.arguments_mut() {
                self.walk(service, table, argument, errors);
            }
        }

        (arguments, method_calls)
    }

    /// Observe the effective bindings and check class-typed local keys hold
    /// injectable values.
    ///
    /// Container-wide bindings are observed without a service, and only where
    /// no local binding shadows them.
    fn observe_bindings(&mut self, service: &ServiceId, table: BindingTable<'_>, errors: &mut Vec<BindingError>) {
        for (key, bound) in table.local().iter() {
            self.usage.observe(Some(service), key, bound);
            if key.targets_class() && !bound.value().is_service_like() {
                errors.push(BindingError::InvalidBindingValue {
                    service: service.clone(),
                    key: key.clone(),
                    found: bound.value().kind_name(),
                });
            }
        }
        for (key, bound) in table.defaults() {
            self.usage.observe(None, key, bound);
        }
    }

    /// The definition's class, checked against the signature provider.
    fn resolve_class(
        &self,
        service: &ServiceId,
        definition: &ServiceDefinition,
    ) -> Result<Option<ClassName>, BindingError> {
        let Some(class) = self.registry.resolve_definition_class(service, definition)? else {
            return Ok(None);
        };
        self.signatures
            .resolve_class(&class)
            .map_err(|e| BindingError::from_lookup(service, e))?;
        Ok(Some(class))
    }

    fn bind_constructor(
        &mut self,
        service: &ServiceId,
        definition: &ServiceDefinition,
        class: Option<&ClassName>,
        table: BindingTable<'_>,
        arguments: &mut Vec<Argument>,
        errors: &mut Vec<BindingError>,
    ) {
        let signatures = self.signatures;
        let signature = match definition.factory() {
            Some(factory) => {
                let Some(target) = factory.class().or(class) else {
                    return;
                };
                signatures.method(target, factory.method()).map(Some)
            }
            None => match class {
                Some(class) => signatures.constructor(class),
                None => return,
            },
        };

        match signature {
            Ok(Some(signature)) => self.bind_params(service, table, signature.params(), arguments),
            Ok(None) => {}
            Err(error) => errors.push(BindingError::from_lookup(service, error)),
        }
    }

    fn bind_method_calls(
        &mut self,
        service: &ServiceId,
        definition: &ServiceDefinition,
        class: &ClassName,
        table: BindingTable<'_>,
        method_calls: &mut [MethodCall],
        errors: &mut Vec<BindingError>,
    ) {
        let signatures = self.signatures;
        for call in method_calls {
            match signatures.method(class, call.method()) {
                Ok(signature) => {
                    self.bind_params(service, table, signature.params(), call.arguments_mut())
                }
                // Factories may return something other than the declared class
                Err(LookupError::MethodNotFound { .. }) if definition.factory().is_some() => {}
                Err(error) => errors.push(BindingError::from_lookup(service, error)),
            }
        }
    }

    fn bind_params(
        &mut self,
        service: &ServiceId,
        table: BindingTable<'_>,
        params: &[ParamSpec],
        arguments: &mut Vec<Argument>,
    ) {
        for (position, param) in params.iter().enumerate() {
            let keys = match arguments.get(position) {
                None | Some(Argument::Unset) => parameter_keys(param),
                Some(Argument::Typed(typed)) if typed.is_placeholder() => {
                    placeholder_keys(typed, typed.name().unwrap_or(param.name()))
                }
                Some(_) => Vec::new(),
            };

            if let Some((key, bound)) = table.resolve_first(&keys) {
                trace!(service = %service, key = %key, position, "substituting bound argument");
                self.usage.consume(bound.id());
                self.substitutions += 1;
                set_position(arguments, position, bound.value().clone());
            }

            if param.is_variadic() {
                break;
            }
        }
    }

    fn walk(
        &mut self,
        service: &ServiceId,
        table: BindingTable<'_>,
        argument: &mut Argument,
        errors: &mut Vec<BindingError>,
    ) {
        match argument {
            Argument::Typed(typed) if typed.is_placeholder() => {
                let mut keys = Vec::with_capacity(2);
                if let Some(name) = typed.name() {
                    keys.push(BindingKey::typed(typed.ty().as_str(), name));
                }
                keys.push(BindingKey::ty(typed.ty().as_str()));

                if let Some((key, bound)) = table.resolve_first(&keys) {
                    trace!(service = %service, key = %key, "substituting typed reference");
                    self.usage.consume(bound.id());
                    self.substitutions += 1;
                    *argument = bound.value().clone();
                }
            }
            Argument::List(items) => {
                for item in items {
                    self.walk(service, table, item, errors);
                }
            }
            Argument::Inline(inline) => {
                let (arguments, method_calls) = self.resolve_definition(service, inline, errors);
                inline.set_arguments(arguments);
                inline.set_method_calls(method_calls);
            }
            _ => {}
        }
    }
}

/// Candidate keys for an unset parameter.
fn parameter_keys(param: &ParamSpec) -> Vec<BindingKey> {
    let mut keys = Vec::with_capacity(3);
    if let Some(ty) = param.ty() {
        keys.push(BindingKey::typed(ty.to_string(), param.name()));
    }
    keys.push(BindingKey::name(param.name()));
    if let Some(class) = param.ty().and_then(ParamType::as_class) {
        keys.push(BindingKey::ty(class.as_str()));
    }
    keys
}

/// Candidate keys for a placeholder typed reference named `name`.
fn placeholder_keys(typed: &TypedReference, name: &str) -> Vec<BindingKey> {
    vec![
        BindingKey::typed(typed.ty().as_str(), name),
        BindingKey::name(name),
        BindingKey::ty(typed.ty().as_str()),
    ]
}

fn set_position(arguments: &mut Vec<Argument>, position: usize, value: Argument) {
    if position >= arguments.len() {
        arguments.resize(position + 1, Argument::Unset);
    }
    arguments[position] = value;
}

//! Service definitions.

use crate::{Argument, BindingId, BindingKey, Bindings, BoundArgument, ClassName, ServiceId};

/// A method to invoke right after the service is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    method: String,
    arguments: Vec<Argument>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut Vec<Argument> {
        &mut self.arguments
    }

    pub fn set_arguments(&mut self, arguments: Vec<Argument>) {
        self.arguments = arguments;
    }
}

/// A static factory method used instead of the constructor.
///
/// Without an explicit class the factory method lives on the definition's
/// own class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    class: Option<ClassName>,
    method: String,
}

impl Factory {
    pub fn new(class: impl Into<ClassName>, method: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            method: method.into(),
        }
    }

    /// A factory method on the definition's own class.
    pub fn own(method: impl Into<String>) -> Self {
        Self {
            class: None,
            method: method.into(),
        }
    }

    pub fn class(&self) -> Option<&ClassName> {
        self.class.as_ref()
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

/// Configuration record describing how to build one service.
///
/// Setters return `&mut Self` so definitions registered in a registry can be
/// configured in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceDefinition {
    class: Option<ClassName>,
    parent: Option<ServiceId>,
    factory: Option<Factory>,
    arguments: Vec<Argument>,
    method_calls: Vec<MethodCall>,
    bindings: Bindings,
    autowired: bool,
    is_abstract: bool,
}

impl ServiceDefinition {
    /// Create a definition for `class`.
    pub fn new(class: impl Into<ClassName>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    /// Create a child definition that inherits its class from `parent`.
    pub fn child(parent: impl Into<ServiceId>) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::default()
        }
    }

    // ==========================================================================
    // Class, parent and factory
    // ==========================================================================

    pub fn class(&self) -> Option<&ClassName> {
        self.class.as_ref()
    }

    pub fn set_class(&mut self, class: impl Into<ClassName>) -> &mut Self {
        self.class = Some(class.into());
        self
    }

    pub fn parent(&self) -> Option<&ServiceId> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: impl Into<ServiceId>) -> &mut Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn factory(&self) -> Option<&Factory> {
        self.factory.as_ref()
    }

    pub fn set_factory(&mut self, factory: Factory) -> &mut Self {
        self.factory = Some(factory);
        self
    }

    /// Builder-style [`set_factory`](Self::set_factory) for inline definitions.
    pub fn with_factory(mut self, factory: Factory) -> Self {
        self.factory = Some(factory);
        self
    }

    // ==========================================================================
    // Arguments
    // ==========================================================================

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn set_arguments(&mut self, arguments: Vec<Argument>) -> &mut Self {
        self.arguments = arguments;
        self
    }

    pub fn add_argument(&mut self, argument: impl Into<Argument>) -> &mut Self {
        self.arguments.push(argument.into());
        self
    }

    /// Set the argument at `index`, padding earlier positions with
    /// [`Argument::Unset`].
    pub fn replace_argument(&mut self, index: usize, argument: impl Into<Argument>) -> &mut Self {
        if index >= self.arguments.len() {
            self.arguments.resize(index + 1, Argument::Unset);
        }
        self.arguments[index] = argument.into();
        self
    }

    // ==========================================================================
    // Method calls
    // ==========================================================================

    pub fn method_calls(&self) -> &[MethodCall] {
        &self.method_calls
    }

    pub fn add_method_call(
        &mut self,
        method: impl Into<String>,
        arguments: Vec<Argument>,
    ) -> &mut Self {
        self.method_calls.push(MethodCall::new(method, arguments));
        self
    }

    pub fn set_method_calls(&mut self, calls: Vec<MethodCall>) -> &mut Self {
        self.method_calls = calls;
        self
    }

    pub fn has_method_call(&self, method: &str) -> bool {
        self.method_calls.iter().any(|call| call.method == method)
    }

    // ==========================================================================
    // Bindings
    // ==========================================================================

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub fn set_bindings(&mut self, bindings: Bindings) -> &mut Self {
        self.bindings = bindings;
        self
    }

    /// Declare a binding with a fresh identity and return that identity.
    pub fn bind(&mut self, key: impl Into<BindingKey>, value: impl Into<Argument>) -> BindingId {
        self.bindings.bind(key, value)
    }

    /// Declare an existing binding, keeping its identity.
    pub fn bind_shared(&mut self, key: impl Into<BindingKey>, bound: BoundArgument) -> &mut Self {
        self.bindings.insert(key, bound);
        self
    }

    // ==========================================================================
    // Flags
    // ==========================================================================

    pub fn is_autowired(&self) -> bool {
        self.autowired
    }

    pub fn set_autowired(&mut self, autowired: bool) -> &mut Self {
        self.autowired = autowired;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn set_abstract(&mut self, is_abstract: bool) -> &mut Self {
        self.is_abstract = is_abstract;
        self
    }
}

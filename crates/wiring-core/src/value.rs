//! Argument values carried by service definitions and bindings.
//!
//! An [`Argument`] is one positional slot of a constructor or method call.
//! It is either a literal [`Value`], a lazy [`Reference`] to another service,
//! a [`TypedReference`] (a reference that also states the required class),
//! an inline anonymous definition, a list of arguments, or the
//! [`Argument::Unset`] placeholder that binding resolution and autowiring fill.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::{ClassName, ServiceDefinition, ServiceId};

/// A literal scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
}

impl Value {
    /// Name of the value's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{}", v.0),
            Value::String(s) => write!(f, "\"{s}\""),
        }
    }
}

/// A lazy pointer to another service definition by id.
///
/// References are not followed during binding resolution; they are resolved
/// when the container is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    id: ServiceId,
}

impl Reference {
    pub fn new(id: impl Into<ServiceId>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &ServiceId {
        &self.id
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.id)
    }
}

/// A reference that also carries the class it must satisfy and, optionally,
/// the parameter name it is meant for.
///
/// When the referenced id equals the required type the reference is an
/// autowiring placeholder: nothing explicit was configured, so a matching
/// binding may replace it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedReference {
    id: ServiceId,
    ty: ClassName,
    name: Option<String>,
}

impl TypedReference {
    pub fn new(id: impl Into<ServiceId>, ty: impl Into<ClassName>) -> Self {
        Self {
            id: id.into(),
            ty: ty.into(),
            name: None,
        }
    }

    /// Create an autowiring placeholder for `ty` (the id is the type itself).
    pub fn placeholder(ty: impl Into<ClassName>) -> Self {
        let ty = ty.into();
        Self {
            id: ServiceId::new(ty.as_str()),
            ty,
            name: None,
        }
    }

    /// Target a specific parameter name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    pub fn ty(&self) -> &ClassName {
        &self.ty
    }

    /// Target parameter name, without the leading `$`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check whether this reference is an autowiring placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.id.as_str() == self.ty.as_str()
    }
}

impl fmt::Display for TypedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} ({})", self.id, self.ty)
    }
}

/// One positional argument of a constructor or method call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Argument {
    /// Nothing configured at this position yet.
    #[default]
    Unset,
    Value(Value),
    Reference(Reference),
    Typed(TypedReference),
    /// An anonymous definition built in place.
    Inline(Box<ServiceDefinition>),
    List(Vec<Argument>),
}

impl Argument {
    pub fn is_unset(&self) -> bool {
        matches!(self, Argument::Unset)
    }

    /// Check whether binding resolution may replace this argument.
    ///
    /// True for [`Argument::Unset`] and for placeholder typed references.
    pub fn is_placeholder(&self) -> bool {
        match self {
            Argument::Unset => true,
            Argument::Typed(typed) => typed.is_placeholder(),
            _ => false,
        }
    }

    /// Name of the argument's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Argument::Unset => "unset",
            Argument::Value(value) => value.kind_name(),
            Argument::Reference(_) => "reference",
            Argument::Typed(_) => "typed reference",
            Argument::Inline(_) => "inline definition",
            Argument::List(_) => "list",
        }
    }

    /// Check whether this argument may be injected where an object is expected.
    pub fn is_service_like(&self) -> bool {
        match self {
            Argument::Value(value) => value.is_null(),
            Argument::Reference(_) | Argument::Typed(_) | Argument::Inline(_) => true,
            _ => false,
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

impl From<Reference> for Argument {
    fn from(reference: Reference) -> Self {
        Argument::Reference(reference)
    }
}

impl From<TypedReference> for Argument {
    fn from(reference: TypedReference) -> Self {
        Argument::Typed(reference)
    }
}

impl From<ServiceDefinition> for Argument {
    fn from(definition: ServiceDefinition) -> Self {
        Argument::Inline(Box::new(definition))
    }
}

impl From<Vec<Argument>> for Argument {
    fn from(items: Vec<Argument>) -> Self {
        Argument::List(items)
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::Value(Value::String(s))
    }
}

impl From<i64> for Argument {
    fn from(i: i64) -> Self {
        Argument::Value(Value::Int(i))
    }
}

impl From<bool> for Argument {
    fn from(b: bool) -> Self {
        Argument::Value(Value::Bool(b))
    }
}

impl From<f64> for Argument {
    fn from(v: f64) -> Self {
        Argument::Value(Value::Float(OrderedFloat(v)))
    }
}

//! Callable signatures and the signature lookup seam.
//!
//! Binding resolution never inspects classes at runtime. Instead it asks a
//! [`SignatureProvider`] for the ordered parameter list of a constructor or
//! method. Implementations are built ahead of time (see `ClassCatalog` in the
//! registry crate), from static analysis or hand-written declarations.

use std::fmt;

use bitflags::bitflags;

use crate::{ClassName, LookupError};

/// Builtin (non-class) parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Bool,
    Int,
    Float,
    String,
    Array,
    Iterable,
    Callable,
    Object,
    Mixed,
}

impl BuiltinType {
    /// Look up a builtin by its source spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => BuiltinType::Bool,
            "int" => BuiltinType::Int,
            "float" => BuiltinType::Float,
            "string" => BuiltinType::String,
            "array" => BuiltinType::Array,
            "iterable" => BuiltinType::Iterable,
            "callable" => BuiltinType::Callable,
            "object" => BuiltinType::Object,
            "mixed" => BuiltinType::Mixed,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinType::Bool => "bool",
            BuiltinType::Int => "int",
            BuiltinType::Float => "float",
            BuiltinType::String => "string",
            BuiltinType::Array => "array",
            BuiltinType::Iterable => "iterable",
            BuiltinType::Callable => "callable",
            BuiltinType::Object => "object",
            BuiltinType::Mixed => "mixed",
        }
    }
}

/// Declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    Builtin(BuiltinType),
    Class(ClassName),
}

impl ParamType {
    /// Parse a type spelling: builtins by name, anything else as a class.
    pub fn parse(ty: &str) -> Self {
        match BuiltinType::from_name(ty) {
            Some(builtin) => ParamType::Builtin(builtin),
            None => ParamType::Class(ClassName::new(ty)),
        }
    }

    pub fn as_class(&self) -> Option<&ClassName> {
        match self {
            ParamType::Class(class) => Some(class),
            ParamType::Builtin(_) => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Builtin(builtin) => f.write_str(builtin.as_str()),
            ParamType::Class(class) => write!(f, "{class}"),
        }
    }
}

impl From<&str> for ParamType {
    fn from(ty: &str) -> Self {
        Self::parse(ty)
    }
}

bitflags! {
    /// Parameter modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParamFlags: u8 {
        /// Collects all remaining arguments.
        const VARIADIC = 1 << 0;
    }
}

bitflags! {
    /// Method modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodFlags: u8 {
        /// Must be called after construction when the service is autowired.
        const REQUIRED = 1 << 0;
        const STATIC = 1 << 1;
    }
}

/// One declared parameter of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamSpec {
    name: String,
    ty: Option<ParamType>,
    flags: ParamFlags,
}

impl ParamSpec {
    /// Create an untyped parameter. A leading `$` on the name is dropped.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim_start_matches('$').to_string(),
            ty: None,
            flags: ParamFlags::empty(),
        }
    }

    /// Create a parameter with a declared type.
    pub fn typed(name: impl AsRef<str>, ty: impl Into<ParamType>) -> Self {
        Self::new(name).with_type(ty)
    }

    pub fn with_type(mut self, ty: impl Into<ParamType>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn variadic(self) -> Self {
        self.with_flags(ParamFlags::VARIADIC)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Option<&ParamType> {
        self.ty.as_ref()
    }

    pub fn flags(&self) -> ParamFlags {
        self.flags
    }

    pub fn is_variadic(&self) -> bool {
        self.flags.contains(ParamFlags::VARIADIC)
    }
}

/// Signature of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    name: String,
    params: Vec<ParamSpec>,
    flags: MethodFlags,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, params: Vec<ParamSpec>) -> Self {
        Self {
            name: name.into(),
            params,
            flags: MethodFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Mark the method as required for autowired services.
    pub fn required(self) -> Self {
        self.with_flags(MethodFlags::REQUIRED)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn flags(&self) -> MethodFlags {
        self.flags
    }

    pub fn is_required(&self) -> bool {
        self.flags.contains(MethodFlags::REQUIRED) && !self.flags.contains(MethodFlags::STATIC)
    }
}

/// Build-time source of callable signatures.
///
/// All lookups resolve inheritance: a class resolves only when it and all of
/// its ancestors are known, and inherited constructors and methods are
/// visible through the subclass.
pub trait SignatureProvider {
    /// Check that `class` and its whole ancestor chain are known.
    fn resolve_class(&self, class: &ClassName) -> Result<(), LookupError>;

    /// The constructor of `class`, inherited if not declared directly.
    ///
    /// `Ok(None)` means the class has no constructor at all.
    fn constructor(&self, class: &ClassName) -> Result<Option<&MethodSignature>, LookupError>;

    /// A method of `class` by name, inherited methods included.
    fn method(&self, class: &ClassName, method: &str) -> Result<&MethodSignature, LookupError>;

    /// All methods of `class`, ancestors' methods first, overrides replacing
    /// the inherited declaration in place.
    fn methods(&self, class: &ClassName) -> Result<Vec<&MethodSignature>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_type_parse() {
        assert_eq!(ParamType::parse("string"), ParamType::Builtin(BuiltinType::String));
        assert_eq!(
            ParamType::parse("App::Logger"),
            ParamType::Class(ClassName::new("App::Logger"))
        );
        assert_eq!(ParamType::parse("int").to_string(), "int");
    }

    #[test]
    fn param_spec_strips_sigil() {
        let param = ParamSpec::typed("$locale", "string");
        assert_eq!(param.name(), "locale");
        assert!(!param.is_variadic());
        assert!(ParamSpec::new("$handlers").variadic().flags().contains(ParamFlags::VARIADIC));
    }

    #[test]
    fn static_methods_are_never_required() {
        let method = MethodSignature::new("create", vec![])
            .required()
            .with_flags(MethodFlags::STATIC);
        assert!(!method.is_required());

        let setter = MethodSignature::new("setLogger", vec![]).required();
        assert!(setter.is_required());
    }
}

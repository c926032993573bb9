//! Error types for container compilation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ContainerError (top-level wrapper)
//! ├── ConfigurationError - aggregate of every problem found by a pass
//! │   └── BindingError   - one problem (unused binding, missing method, ...)
//! └── Frozen / FrozenDefaults / ServiceNotFound
//!
//! LookupError - signal from a SignatureProvider, converted to BindingError
//! ```
//!
//! Passes collect [`BindingError`]s instead of stopping at the first one, so a
//! single build reports as many problems as possible. Any collected error fails
//! the build.

use std::fmt;

use thiserror::Error;

use crate::{BindingKey, BindingSource, ClassName, ServiceId};

// ============================================================================
// Signature Lookup Errors
// ============================================================================

/// Errors reported by a [`SignatureProvider`](crate::SignatureProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The class, or one of its ancestors, is unknown.
    #[error("class \"{class}\" not found")]
    ClassNotFound { class: ClassName },

    /// The class resolves but has no method with that name.
    #[error("method \"{method}()\" does not exist on class \"{class}\"")]
    MethodNotFound { class: ClassName, method: String },

    /// The ancestor chain of the class loops back on itself.
    #[error("circular inheritance for class \"{class}\"")]
    CircularInheritance { class: ClassName },
}

// ============================================================================
// Binding Errors
// ============================================================================

/// A single configuration problem found while resolving bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A binding never matched any parameter.
    ///
    /// `service` is `None` for container-wide bindings.
    #[error("{}", unused_binding_message(.service, .key, .origin))]
    UnusedBinding {
        service: Option<ServiceId>,
        key: BindingKey,
        origin: BindingSource,
    },

    /// A method call names a method the class does not have.
    #[error("Invalid service \"{service}\": method \"{method}()\" does not exist.")]
    MissingMethod {
        service: ServiceId,
        class: ClassName,
        method: String,
    },

    /// The definition's class, or one of its ancestors, cannot be found.
    #[error("Invalid service \"{service}\": class \"{class}\" not found.")]
    UnresolvableClass { service: ServiceId, class: ClassName },

    /// The definition's class inherits from itself.
    #[error("Invalid service \"{service}\": circular inheritance for class \"{class}\".")]
    CircularInheritance { service: ServiceId, class: ClassName },

    /// A child definition names a parent definition that does not exist.
    #[error("Invalid service \"{service}\": parent definition \"{parent}\" does not exist.")]
    UnknownParent { service: ServiceId, parent: ServiceId },

    /// Parent definitions loop back on themselves.
    #[error("Invalid service \"{service}\": circular reference through parent definition \"{parent}\".")]
    CircularParent { service: ServiceId, parent: ServiceId },

    /// A class-typed binding holds a scalar value.
    #[error(
        "Invalid value for binding key \"{key}\" for service \"{service}\": expected a reference, a typed reference, an inline definition or null, \"{found}\" given."
    )]
    InvalidBindingValue {
        service: ServiceId,
        key: BindingKey,
        found: &'static str,
    },
}

impl BindingError {
    /// Convert a signature lookup failure into a definition-scoped error.
    pub fn from_lookup(service: &ServiceId, error: LookupError) -> Self {
        match error {
            LookupError::ClassNotFound { class } => BindingError::UnresolvableClass {
                service: service.clone(),
                class,
            },
            LookupError::MethodNotFound { class, method } => BindingError::MissingMethod {
                service: service.clone(),
                class,
                method,
            },
            LookupError::CircularInheritance { class } => BindingError::CircularInheritance {
                service: service.clone(),
                class,
            },
        }
    }

    /// The service this error is attributed to, if any.
    pub fn service(&self) -> Option<&ServiceId> {
        match self {
            BindingError::UnusedBinding { service, .. } => service.as_ref(),
            BindingError::MissingMethod { service, .. }
            | BindingError::UnresolvableClass { service, .. }
            | BindingError::CircularInheritance { service, .. }
            | BindingError::UnknownParent { service, .. }
            | BindingError::CircularParent { service, .. }
            | BindingError::InvalidBindingValue { service, .. } => Some(service),
        }
    }

    pub fn is_unused_binding(&self) -> bool {
        matches!(self, BindingError::UnusedBinding { .. })
    }
}

fn unused_binding_message(
    service: &Option<ServiceId>,
    key: &BindingKey,
    origin: &BindingSource,
) -> String {
    let mut subject = String::new();
    if let Some(ty) = key.type_name() {
        subject.push_str(&format!("of type \"{ty}\" "));
    }
    if let Some(name) = key.param_name() {
        subject.push_str(&format!("named \"${name}\" "));
    }
    match (origin, service) {
        (BindingSource::Service, Some(service)) => {
            subject.push_str(&format!("for service \"{service}\""));
        }
        _ => subject.push_str("under the container defaults"),
    }
    format!(
        "A binding is configured for an argument {subject}, but no corresponding argument has been found. It may be unused and should be removed, or it may have a typo."
    )
}

// ============================================================================
// Aggregate
// ============================================================================

/// Every problem found by a compiler pass.
///
/// Displayed as one error per line, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationError {
    errors: Vec<BindingError>,
}

impl ConfigurationError {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: BindingError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindingError> {
        self.errors.iter()
    }

    /// Only the unused-binding errors.
    pub fn unused_bindings(&self) -> impl Iterator<Item = &BindingError> {
        self.errors.iter().filter(|e| e.is_unused_binding())
    }

    pub fn into_vec(self) -> Vec<BindingError> {
        self.errors
    }

    /// `Ok(())` if nothing was collected, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ConfigurationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<BindingError> for ConfigurationError {
    fn from(error: BindingError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<BindingError>> for ConfigurationError {
    fn from(errors: Vec<BindingError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ConfigurationError {
    type Item = BindingError;
    type IntoIter = std::vec::IntoIter<BindingError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigurationError {
    type Item = &'a BindingError;
    type IntoIter = std::slice::Iter<'a, BindingError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigurationError {}

// ============================================================================
// Top-level
// ============================================================================

/// Errors surfaced by the container builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The builder was compiled; definitions can no longer change.
    #[error("cannot modify service \"{id}\": the container is already compiled")]
    Frozen { id: ServiceId },

    #[error("cannot modify the container defaults: the container is already compiled")]
    FrozenDefaults,

    #[error("service \"{0}\" not found")]
    ServiceNotFound(ServiceId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_name_binding_message() {
        let error = BindingError::UnusedBinding {
            service: Some(ServiceId::new("foo")),
            key: BindingKey::parse("$quz"),
            origin: BindingSource::Service,
        };
        assert_eq!(
            error.to_string(),
            "A binding is configured for an argument named \"$quz\" for service \"foo\", but no corresponding argument has been found. It may be unused and should be removed, or it may have a typo."
        );
    }

    #[test]
    fn unused_typed_binding_message() {
        let error = BindingError::UnusedBinding {
            service: Some(ServiceId::new("foo")),
            key: BindingKey::parse("string $locale"),
            origin: BindingSource::Service,
        };
        assert!(
            error
                .to_string()
                .contains("of type \"string\" named \"$locale\" for service \"foo\"")
        );
    }

    #[test]
    fn unused_defaults_binding_message() {
        let error = BindingError::UnusedBinding {
            service: None,
            key: BindingKey::parse("App::Logger"),
            origin: BindingSource::Defaults,
        };
        assert!(
            error
                .to_string()
                .contains("of type \"App::Logger\" under the container defaults")
        );
        assert_eq!(error.service(), None);
    }

    #[test]
    fn missing_method_message() {
        let error = BindingError::from_lookup(
            &ServiceId::new("mailer"),
            LookupError::MethodNotFound {
                class: ClassName::new("App::Mailer"),
                method: "setLogger".into(),
            },
        );
        assert_eq!(
            error.to_string(),
            "Invalid service \"mailer\": method \"setLogger()\" does not exist."
        );
    }

    #[test]
    fn circular_inheritance_from_lookup() {
        let error = BindingError::from_lookup(
            &ServiceId::new("a"),
            LookupError::CircularInheritance {
                class: ClassName::new("App::A"),
            },
        );
        assert_eq!(
            error.to_string(),
            "Invalid service \"a\": circular inheritance for class \"App::A\"."
        );
        assert_eq!(error.service(), Some(&ServiceId::new("a")));
    }

    #[test]
    fn aggregate_display_one_per_line() {
        let mut errors = ConfigurationError::new();
        errors.push(BindingError::UnresolvableClass {
            service: ServiceId::new("a"),
            class: ClassName::new("Missing"),
        });
        errors.push(BindingError::UnknownParent {
            service: ServiceId::new("b"),
            parent: ServiceId::new("base"),
        });

        let text = errors.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("Invalid service \"a\": class \"Missing\" not found."));
        assert_eq!(errors.unused_bindings().count(), 0);
    }

    #[test]
    fn empty_aggregate_is_ok() {
        assert!(ConfigurationError::new().into_result().is_ok());
    }
}

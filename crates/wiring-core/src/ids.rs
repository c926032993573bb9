//! Identifier types for service definitions and bindings.

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a service definition in the registry.
///
/// Service ids are free-form strings; class names are commonly used as ids.
///
/// # Example
///
/// ```
/// use wiring_core::ServiceId;
///
/// let id = ServiceId::new("mailer");
/// assert_eq!(id.as_str(), "mailer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(String);

impl ServiceId {
    /// Create a new service id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ServiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ServiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ServiceId> for ServiceId {
    fn from(id: &ServiceId) -> Self {
        id.clone()
    }
}

static NEXT_BINDING_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a single declared binding.
///
/// Every [`BoundArgument`](crate::BoundArgument) receives a fresh id on
/// creation. Clones keep the id, so a binding shared between several
/// definitions is tracked as one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u64);

impl BindingId {
    /// Allocate a fresh, process-unique binding id.
    pub fn next() -> Self {
        Self(NEXT_BINDING_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding_{}", self.0)
    }
}

//! Bindings: explicit parameter overrides declared on definitions.
//!
//! A binding associates a [`BindingKey`] with a [`BoundArgument`]. Keys come in
//! three shapes:
//!
//! | Literal key          | Shape                                   |
//! |----------------------|-----------------------------------------|
//! | `$locale`            | [`BindingKey::Name`]: any parameter named `locale` |
//! | `App::Logger`        | [`BindingKey::Type`]: any parameter typed `App::Logger` |
//! | `string $locale`     | [`BindingKey::Typed`]: parameter `locale` declared as `string` |

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{Argument, BindingId, BuiltinType, ClassName};

/// Key under which a binding is declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindingKey {
    /// A bare parameter name, stored without the leading `$`.
    Name(String),
    /// A bare type name.
    Type(String),
    /// A parameter name qualified by its declared type.
    Typed { ty: String, name: String },
}

impl BindingKey {
    /// Parse the literal key text.
    ///
    /// `"$name"` is a name key, `"Type $name"` a typed key, anything else a
    /// type key. Type names are normalized like [`ClassName`].
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        if let Some(name) = key.strip_prefix('$') {
            return BindingKey::Name(name.to_string());
        }
        if let Some((ty, name)) = key.split_once(" $") {
            return BindingKey::Typed {
                ty: normalize_type(ty),
                name: name.trim().to_string(),
            };
        }
        BindingKey::Type(normalize_type(key))
    }

    pub fn name(name: impl Into<String>) -> Self {
        BindingKey::Name(name.into())
    }

    pub fn ty(ty: impl AsRef<str>) -> Self {
        BindingKey::Type(normalize_type(ty.as_ref()))
    }

    pub fn typed(ty: impl AsRef<str>, name: impl Into<String>) -> Self {
        BindingKey::Typed {
            ty: normalize_type(ty.as_ref()),
            name: name.into(),
        }
    }

    /// Parameter name targeted by this key, if any.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            BindingKey::Name(name) | BindingKey::Typed { name, .. } => Some(name),
            BindingKey::Type(_) => None,
        }
    }

    /// Type targeted by this key, if any.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            BindingKey::Type(ty) | BindingKey::Typed { ty, .. } => Some(ty),
            BindingKey::Name(_) => None,
        }
    }

    /// Check whether the key's type is a class rather than a builtin.
    ///
    /// Bindings under such keys must hold something injectable as an object.
    pub fn targets_class(&self) -> bool {
        self.type_name()
            .is_some_and(|ty| BuiltinType::from_name(ty).is_none())
    }
}

fn normalize_type(ty: &str) -> String {
    ClassName::new(ty.trim()).to_string()
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKey::Name(name) => write!(f, "${name}"),
            BindingKey::Type(ty) => f.write_str(ty),
            BindingKey::Typed { ty, name } => write!(f, "{ty} ${name}"),
        }
    }
}

impl From<&str> for BindingKey {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

impl From<String> for BindingKey {
    fn from(key: String) -> Self {
        Self::parse(&key)
    }
}

/// Where a binding was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BindingSource {
    /// Declared on a single service definition.
    #[default]
    Service,
    /// Declared container-wide and inherited by every definition.
    Defaults,
}

/// A bound value together with its binding identity.
///
/// Whether a binding has been consumed is not stored here; the usage set is
/// kept by the registry, keyed by [`BindingId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundArgument {
    id: BindingId,
    value: Argument,
    source: BindingSource,
}

impl BoundArgument {
    /// Create a service-local binding with a fresh identity.
    pub fn new(value: impl Into<Argument>) -> Self {
        Self {
            id: BindingId::next(),
            value: value.into(),
            source: BindingSource::Service,
        }
    }

    /// Create a container-wide binding with a fresh identity.
    pub fn defaults(value: impl Into<Argument>) -> Self {
        Self {
            id: BindingId::next(),
            value: value.into(),
            source: BindingSource::Defaults,
        }
    }

    pub fn id(&self) -> BindingId {
        self.id
    }

    pub fn value(&self) -> &Argument {
        &self.value
    }

    pub fn source(&self) -> BindingSource {
        self.source
    }
}

/// Ordered map of binding key to bound argument.
///
/// Iteration follows declaration order. Re-declaring a key replaces the
/// binding in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<(BindingKey, BoundArgument)>,
    index: FxHashMap<BindingKey, usize>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a binding, replacing any existing one under the same key.
    pub fn insert(&mut self, key: impl Into<BindingKey>, bound: BoundArgument) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = bound,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, bound));
            }
        }
    }

    /// Bind a value under `key` with a fresh service-local identity.
    pub fn bind(&mut self, key: impl Into<BindingKey>, value: impl Into<Argument>) -> BindingId {
        let bound = BoundArgument::new(value);
        let id = bound.id();
        self.insert(key, bound);
        id
    }

    /// Builder-style [`bind`](Self::bind).
    pub fn with(mut self, key: impl Into<BindingKey>, value: impl Into<Argument>) -> Self {
        self.bind(key, value);
        self
    }

    pub fn get(&self, key: &BindingKey) -> Option<&BoundArgument> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &BindingKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BindingKey, &BoundArgument)> {
        self.entries.iter().map(|(key, bound)| (key, bound))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<BindingKey>> FromIterator<(K, BoundArgument)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, BoundArgument)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (key, bound) in iter {
            bindings.insert(key, bound);
        }
        bindings
    }
}

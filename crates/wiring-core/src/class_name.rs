use std::fmt;

/// Qualified class name used to look up constructor and method signatures.
///
/// Segments are separated by `::`. The last segment is the simple name, the
/// rest is the namespace path.
///
/// # Examples
///
/// ```
/// use wiring_core::ClassName;
///
/// let mailer = ClassName::new("App::Mail::Mailer");
/// assert_eq!(mailer.simple_name(), "Mailer");
/// assert_eq!(mailer.namespace_string(), "App::Mail");
///
/// // Absolute paths are normalized
/// assert_eq!(ClassName::new("::App::Mail::Mailer"), mailer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    /// Create a class name from its qualified string form.
    ///
    /// Empty segments are dropped, so `"::App::Mailer"` and `"App::Mailer"`
    /// name the same class.
    pub fn new(name: impl AsRef<str>) -> Self {
        let normalized = name
            .as_ref()
            .split("::")
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("::");
        Self(normalized)
    }

    /// The full qualified name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or_default()
    }

    /// Namespace segments, excluding the simple name.
    pub fn namespace_path(&self) -> Vec<&str> {
        let mut parts: Vec<&str> = self.0.split("::").collect();
        parts.pop();
        parts
    }

    /// Namespace as a joined string (empty for the global namespace).
    pub fn namespace_string(&self) -> String {
        self.namespace_path().join("::")
    }

    /// Check if the class lives in the global namespace.
    pub fn is_global(&self) -> bool {
        !self.0.contains("::")
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClassName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&ClassName> for ClassName {
    fn from(name: &ClassName) -> Self {
        name.clone()
    }
}

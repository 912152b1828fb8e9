//! Marker kind identifiers.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Identifier for one kind of marker (e.g. `binds-view`).
///
/// Kinds are open: a new kind exists as soon as a validator or processor is
/// registered for it. Built-in kinds are `const` values built with
/// [`MarkerKind::from_static`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerKind(Cow<'static, str>);

impl MarkerKind {
    /// Create a marker kind from a static name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a marker kind from an owned name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The marker name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<&str> for MarkerKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

//! Resource types and symbol table entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A kind of symbolic resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Layout,
    Id,
    String,
    Color,
    Dimen,
    Bool,
    Integer,
    Anim,
    Drawable,
    Menu,
}

impl ResourceType {
    /// All known resource types.
    pub const ALL: [ResourceType; 10] = [
        Self::Layout,
        Self::Id,
        Self::String,
        Self::Color,
        Self::Dimen,
        Self::Bool,
        Self::Integer,
        Self::Anim,
        Self::Drawable,
        Self::Menu,
    ];

    /// The symbol table section name (e.g. `layout`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Id => "id",
            Self::String => "string",
            Self::Color => "color",
            Self::Dimen => "dimen",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Anim => "anim",
            Self::Drawable => "drawable",
            Self::Menu => "menu",
        }
    }

    /// Parse a symbol table section name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resource symbol is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceScope {
    /// The compilation unit's own resources.
    Project,
    /// The platform's built-in resources.
    Platform,
}

impl ResourceScope {
    /// Name of the symbol class generated code refers to.
    pub fn symbol_class(&self) -> &'static str {
        match self {
            Self::Project => "R",
            Self::Platform => "android.R",
        }
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::Platform => f.write_str("platform"),
        }
    }
}

/// One raw entry of a resource symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Resource type section, as written by the host (may be unknown).
    pub ty: String,
    pub name: String,
    pub value: i64,
}

impl SymbolEntry {
    pub fn new(ty: impl Into<String>, name: impl Into<String>, value: i64) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            value,
        }
    }
}

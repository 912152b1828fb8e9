//! Host element model.
//!
//! An [`Element`] is the host compiler's description of one declaration
//! (a type, a method or a field). Elements are plain data: the host adapter
//! fills them in and nothing in tagsmith mutates them afterwards.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of a host declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Class,
    Interface,
    Method,
    Field,
}

impl ElementKind {
    /// Returns true for classes and interfaces.
    pub fn is_type(&self) -> bool {
        matches!(self, Self::Class | Self::Interface)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Method => "method",
            Self::Field => "field",
        };
        f.write_str(name)
    }
}

/// A declaration modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Signature of a method declared by a type element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    /// Return type (None for void).
    #[serde(default)]
    pub returns: Option<String>,
}

/// One host declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Declaration kind.
    pub kind: ElementKind,
    /// Simple name.
    pub name: String,
    /// Package for types, qualified name of the enclosing type for members.
    #[serde(default)]
    pub owner: String,
    /// Field type or method return type (None for void methods and types).
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    /// Method parameters.
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Checked exceptions declared by a method.
    #[serde(default)]
    pub throws: Vec<String>,
    /// Direct supertypes of a type.
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Methods declared by a type.
    #[serde(default)]
    pub methods: Vec<MethodSig>,
}

impl Element {
    /// Create an element with no type, params or modifiers.
    pub fn new(kind: ElementKind, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            owner: owner.into(),
            ty: None,
            params: Vec::new(),
            modifiers: Vec::new(),
            throws: Vec::new(),
            supertypes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Fully qualified name: `pkg.Type` for types, `pkg.Type#member` for members.
    pub fn qualified_name(&self) -> String {
        if self.kind.is_type() {
            if self.owner.is_empty() {
                self.name.clone()
            } else {
                format!("{}.{}", self.owner, self.name)
            }
        } else {
            format!("{}#{}", self.owner, self.name)
        }
    }

    /// Qualified name of the enclosing type (members only).
    pub fn enclosing_type(&self) -> Option<&str> {
        if self.kind.is_type() || self.owner.is_empty() {
            None
        } else {
            Some(&self.owner)
        }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_private(&self) -> bool {
        self.has_modifier(Modifier::Private)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.has_modifier(Modifier::Final)
    }

    pub fn is_abstract(&self) -> bool {
        self.has_modifier(Modifier::Abstract)
    }

    /// Returns true for methods declared `void`.
    pub fn returns_void(&self) -> bool {
        matches!(self.ty.as_deref(), None | Some("void"))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.qualified_name())
    }
}

/// A literal marker argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<ArgValue>),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Strings of a list value. A single string is a one-element list.
    pub fn as_str_list(&self) -> Option<Vec<&str>> {
        match self {
            Self::Str(s) => Some(vec![s.as_str()]),
            Self::List(items) => items.iter().map(ArgValue::as_str).collect(),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "\"{}\"", s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A declaration as handed over by the host, before extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDeclaration {
    pub element: Element,
    /// Marker arguments in source order.
    #[serde(default)]
    pub args: IndexMap<String, ArgValue>,
}

impl RawDeclaration {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            args: IndexMap::new(),
        }
    }

    /// Add a marker argument.
    pub fn arg(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.args.insert(name.into(), value);
        self
    }
}

//! Type references for generated code.

use std::fmt;

use serde::Serialize;

/// A type reference in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A primitive type (int, boolean, ...).
    Primitive { name: PrimitiveType },
    /// A named type (class or interface), qualified or simple.
    Named { name: String },
    /// A generic type with type arguments.
    Generic { base: String, args: Vec<TypeRef> },
    /// An array type.
    Array { element: Box<TypeRef> },
}

impl TypeRef {
    /// Create a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    /// Create a primitive type reference.
    pub fn primitive(name: PrimitiveType) -> Self {
        Self::Primitive { name }
    }

    /// Create a generic type reference.
    pub fn generic(base: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Generic {
            base: base.into(),
            args,
        }
    }

    /// Create an array type reference.
    pub fn array(element: TypeRef) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    /// Convenience: the `void` type.
    pub fn void() -> Self {
        Self::primitive(PrimitiveType::Void)
    }

    /// Convenience: the `boolean` type.
    pub fn boolean() -> Self {
        Self::primitive(PrimitiveType::Boolean)
    }

    /// Convenience: the `String` type.
    pub fn string() -> Self {
        Self::named("java.lang.String")
    }

    /// Parse a host type string such as `int`, `String[]` or `java.util.List<Note>`.
    pub fn parse(source: &str) -> Self {
        let source = source.trim();

        if let Some(element) = source.strip_suffix("[]") {
            return Self::array(Self::parse(element));
        }

        if let Some(primitive) = PrimitiveType::parse(source) {
            return Self::primitive(primitive);
        }

        if let Some((base, rest)) = source.split_once('<')
            && let Some(args) = rest.strip_suffix('>')
        {
            return Self::generic(
                base.trim(),
                split_type_args(args).into_iter().map(Self::parse).collect(),
            );
        }

        Self::named(source)
    }

    /// Returns true for the `void` type.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            Self::Primitive {
                name: PrimitiveType::Void
            }
        )
    }
}

/// Split generic arguments on top-level commas.
fn split_type_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in args.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive { name } => f.write_str(name.as_str()),
            Self::Named { name } => f.write_str(name),
            Self::Generic { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            Self::Array { element } => write!(f, "{}[]", element),
        }
    }
}

/// Primitive types of the host language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    const ALL: [PrimitiveType; 9] = [
        Self::Void,
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    /// Get the keyword for this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Parse a primitive keyword.
    pub fn parse(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == keyword)
    }
}

/// Access level for generated types and members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    /// No modifier.
    Package,
    Private,
}

impl Visibility {
    /// Check if this is a public visibility.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Check if this is a private visibility.
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives_and_named() {
        assert_eq!(TypeRef::parse("int"), TypeRef::primitive(PrimitiveType::Int));
        assert!(TypeRef::parse("void").is_void());
        assert_eq!(
            TypeRef::parse("android.widget.TextView"),
            TypeRef::named("android.widget.TextView")
        );
    }

    #[test]
    fn test_parse_nested_generics() {
        let ty = TypeRef::parse("java.util.Map<String, java.util.List<Note>>");
        assert_eq!(
            ty,
            TypeRef::generic(
                "java.util.Map",
                vec![
                    TypeRef::named("String"),
                    TypeRef::generic("java.util.List", vec![TypeRef::named("Note")]),
                ]
            )
        );
        assert_eq!(ty.to_string(), "java.util.Map<String, java.util.List<Note>>");
    }

    #[test]
    fn test_parse_arrays() {
        let ty = TypeRef::parse("int[][]");
        assert_eq!(
            ty,
            TypeRef::array(TypeRef::array(TypeRef::primitive(PrimitiveType::Int)))
        );
        assert_eq!(ty.to_string(), "int[][]");
    }

    #[test]
    fn test_visibility() {
        assert!(Visibility::Public.is_public());
        assert!(!Visibility::Package.is_public());
        assert!(Visibility::Private.is_private());
    }
}

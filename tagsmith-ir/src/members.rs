//! Members of generated types.
//!
//! Builders follow the consuming `fn x(mut self, ..) -> Self` style so
//! processors can describe a member in one expression.

use serde::Serialize;

use crate::{
    fragment::{Expr, Statement},
    types::{TypeRef, Visibility},
};

/// A field of a generated type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: TypeRef,
    /// Visibility modifier.
    pub visibility: Visibility,
    pub is_final: bool,
    pub is_static: bool,
    /// Initializer expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<Expr>,
}

impl FieldSpec {
    /// Create a new private instance field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Private,
            is_final: false,
            is_static: false,
            init: None,
        }
    }

    /// Set visibility.
    pub fn visibility(mut self, vis: Visibility) -> Self {
        self.visibility = vis;
        self
    }

    /// Mark as final.
    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Mark as static.
    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the initializer.
    pub fn init(mut self, value: Expr) -> Self {
        self.init = Some(value);
        self
    }
}

/// A constructor or method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeRef,
    /// Whether the parameter is declared final.
    pub is_final: bool,
}

impl ParamSpec {
    /// Create a new parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_final: false,
        }
    }

    /// Mark as final (captured by anonymous classes).
    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }
}

/// A method of a generated type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSpec {
    /// Method name.
    pub name: String,
    /// Documentation comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Visibility modifier.
    pub visibility: Visibility,
    /// Whether the method overrides a supertype method.
    pub is_override: bool,
    pub is_static: bool,
    /// Parameters.
    pub params: Vec<ParamSpec>,
    /// Return type.
    pub return_type: TypeRef,
    /// Checked exceptions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<TypeRef>,
    /// Method body as statements.
    pub body: Vec<Statement>,
}

impl MethodSpec {
    /// Create a new public void method.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            visibility: Visibility::Public,
            is_override: false,
            is_static: false,
            params: Vec::new(),
            return_type: TypeRef::void(),
            throws: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Set documentation comment.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set visibility.
    pub fn visibility(mut self, vis: Visibility) -> Self {
        self.visibility = vis;
        self
    }

    /// Mark as overriding.
    pub fn override_(mut self) -> Self {
        self.is_override = true;
        self
    }

    /// Add a parameter.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Add multiple parameters.
    pub fn params(mut self, params: impl IntoIterator<Item = ParamSpec>) -> Self {
        self.params.extend(params);
        self
    }

    /// Set return type.
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = ty;
        self
    }

    /// Add a checked exception.
    pub fn throws(mut self, ty: TypeRef) -> Self {
        self.throws.push(ty);
        self
    }

    /// Add a statement to the body.
    pub fn statement(mut self, stmt: Statement) -> Self {
        self.body.push(stmt);
        self
    }

    /// Add multiple statements to the body.
    pub fn statements(mut self, stmts: impl IntoIterator<Item = Statement>) -> Self {
        self.body.extend(stmts);
        self
    }

    /// Body of a top-level [`Statement::Section`] by label.
    pub fn section_mut(&mut self, label: &str) -> Option<&mut Vec<Statement>> {
        self.body.iter_mut().find_map(|stmt| match stmt {
            Statement::Section { label: l, body } if l == label => Some(body),
            _ => None,
        })
    }

    /// Number of statements in the body, sections flattened.
    pub fn statement_count(&self) -> usize {
        self.body.iter().map(Statement::count).sum()
    }
}

/// A constructor of a generated type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorSpec {
    pub visibility: Visibility,
    pub params: Vec<ParamSpec>,
    pub body: Vec<Statement>,
}

impl ConstructorSpec {
    /// Create a new public constructor.
    pub fn new() -> Self {
        Self {
            visibility: Visibility::Public,
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Add a statement to the body.
    pub fn statement(mut self, stmt: Statement) -> Self {
        self.body.push(stmt);
        self
    }
}

impl Default for ConstructorSpec {
    fn default() -> Self {
        Self::new()
    }
}

//! Structured body fragments.
//!
//! Method bodies in the generation model are trees of [`Statement`]s and
//! [`Expr`]essions. A [`Statement::Section`] is a labelled, initially empty
//! block that later processors append to (e.g. the `bind-views` section of a
//! component's `onCreate`).

use serde::Serialize;
use tagsmith_core::{ResourceScope, ResourceType};

use crate::{members::MethodSpec, types::TypeRef};

/// A statement in a generated body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// Expression statement.
    Expr { expr: Expr },
    /// Assignment to an existing target.
    Assign { target: Expr, value: Expr },
    /// Local variable declaration.
    Local { ty: TypeRef, name: String, value: Expr },
    /// Return statement.
    Return { value: Option<Expr> },
    /// Conditional block.
    If {
        condition: Expr,
        then: Vec<Statement>,
    },
    /// `try { body } finally { finally }`.
    TryFinally {
        body: Vec<Statement>,
        finally: Vec<Statement>,
    },
    /// Labelled block other processors contribute to.
    Section { label: String, body: Vec<Statement> },
}

impl Statement {
    /// Expression statement.
    pub fn expr(expr: Expr) -> Self {
        Self::Expr { expr }
    }

    /// Assignment.
    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign { target, value }
    }

    /// Local variable declaration.
    pub fn local(ty: TypeRef, name: impl Into<String>, value: Expr) -> Self {
        Self::Local {
            ty,
            name: name.into(),
            value,
        }
    }

    /// Return with a value.
    pub fn return_(value: Expr) -> Self {
        Self::Return { value: Some(value) }
    }

    /// Empty labelled section.
    pub fn section(label: impl Into<String>) -> Self {
        Self::Section {
            label: label.into(),
            body: Vec::new(),
        }
    }

    /// Count statements, descending into nested blocks.
    pub fn count(&self) -> usize {
        let nested: usize = match self {
            Self::If { then, .. } => then.iter().map(Statement::count).sum(),
            Self::TryFinally { body, finally } => body
                .iter()
                .chain(finally.iter())
                .map(Statement::count)
                .sum(),
            Self::Section { body, .. } => body.iter().map(Statement::count).sum(),
            _ => 0,
        };
        // Sections are containers, not statements of their own
        if matches!(self, Self::Section { .. }) {
            nested
        } else {
            1 + nested
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// A reference to a resolved resource symbol (e.g. `R.id.title`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    pub scope: ResourceScope,
    pub ty: ResourceType,
    pub name: String,
    /// Numeric identifier at generation time.
    pub id: i64,
}

impl ResourceRef {
    /// Symbol path as generated code spells it (e.g. `android.R.id.list`).
    pub fn symbol_path(&self) -> String {
        format!("{}.{}.{}", self.scope.symbol_class(), self.ty, self.name)
    }
}

/// An anonymous class instance (listeners, runnables).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnonymousClass {
    pub implements: TypeRef,
    pub methods: Vec<MethodSpec>,
}

/// An expression in a generated body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    This,
    Super,
    Null,
    /// Local variable or parameter.
    Ident { name: String },
    Literal { value: Literal },
    /// Instance field access.
    Field { target: Box<Expr>, name: String },
    /// Static field access (e.g. `Context.LAYOUT_INFLATER_SERVICE`).
    StaticField { owner: TypeRef, name: String },
    /// Method call, unqualified when `target` is None.
    Call {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    /// Object creation.
    New { ty: TypeRef, args: Vec<Expr> },
    Cast { ty: TypeRef, expr: Box<Expr> },
    /// Class literal (e.g. `Note.class`).
    ClassLiteral { ty: TypeRef },
    /// String concatenation.
    Concat { parts: Vec<Expr> },
    /// `left != null`.
    NotNull { expr: Box<Expr> },
    /// `left == right`.
    Equals { left: Box<Expr>, right: Box<Expr> },
    Resource { resource: ResourceRef },
    Anonymous { class: Box<AnonymousClass> },
}

impl Expr {
    /// Identifier expression.
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident { name: name.into() }
    }

    /// String literal.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::Str(value.into()),
        }
    }

    /// Integer literal.
    pub fn int(value: i64) -> Self {
        Self::Literal {
            value: Literal::Int(value),
        }
    }

    /// Boolean literal.
    pub fn bool(value: bool) -> Self {
        Self::Literal {
            value: Literal::Bool(value),
        }
    }

    /// `this.name`.
    pub fn this_field(name: impl Into<String>) -> Self {
        Self::Field {
            target: Box::new(Self::This),
            name: name.into(),
        }
    }

    /// Unqualified call (`method(args)`).
    pub fn call(method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: None,
            method: method.into(),
            args,
        }
    }

    /// Call on a target (`target.method(args)`).
    pub fn call_on(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: Some(Box::new(target)),
            method: method.into(),
            args,
        }
    }

    /// Object creation.
    pub fn new_(ty: TypeRef, args: Vec<Expr>) -> Self {
        Self::New { ty, args }
    }

    /// Cast.
    pub fn cast(ty: TypeRef, expr: Expr) -> Self {
        Self::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    /// Static field access.
    pub fn static_field(owner: TypeRef, name: impl Into<String>) -> Self {
        Self::StaticField {
            owner,
            name: name.into(),
        }
    }

    /// Equality comparison.
    pub fn equals(left: Expr, right: Expr) -> Self {
        Self::Equals {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Resource symbol reference.
    pub fn resource(resource: ResourceRef) -> Self {
        Self::Resource { resource }
    }

    /// Anonymous class instance.
    pub fn anonymous(implements: TypeRef, methods: Vec<MethodSpec>) -> Self {
        Self::Anonymous {
            class: Box::new(AnonymousClass {
                implements,
                methods,
            }),
        }
    }

    /// Collect every resource reference in this expression tree.
    pub fn resources(&self) -> Vec<&ResourceRef> {
        let mut out = Vec::new();
        self.collect_resources(&mut out);
        out
    }

    fn collect_resources<'a>(&'a self, out: &mut Vec<&'a ResourceRef>) {
        match self {
            Self::Resource { resource } => out.push(resource),
            Self::Field { target, .. } => target.collect_resources(out),
            Self::Call { target, args, .. } => {
                if let Some(target) = target {
                    target.collect_resources(out);
                }
                args.iter().for_each(|a| a.collect_resources(out));
            }
            Self::New { args, .. } => args.iter().for_each(|a| a.collect_resources(out)),
            Self::Cast { expr, .. } | Self::NotNull { expr } => expr.collect_resources(out),
            Self::Concat { parts } => parts.iter().for_each(|p| p.collect_resources(out)),
            Self::Equals { left, right } => {
                left.collect_resources(out);
                right.collect_resources(out);
            }
            _ => {}
        }
    }
}

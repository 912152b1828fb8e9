//! Built-in processors.

mod component;
mod injection;
mod listeners;
mod menu;
mod methods;
mod rest;
mod shared_pref;

pub use component::EnhancedComponentProcessor;
pub use injection::{
    ApplicationProcessor, BindsViewProcessor, ExtraProcessor, FromHtmlProcessor, PrefProcessor,
    ResourceProcessor, SystemServiceProcessor,
};
pub use listeners::ListenerProcessor;
pub use menu::{OptionsItemProcessor, OptionsMenuProcessor};
pub use methods::{LifecycleProcessor, ThreadingProcessor, TransactionalProcessor};
pub use rest::{RestMethodProcessor, RestProcessor};
pub use shared_pref::SharedPrefProcessor;

use tagsmith_core::{Element, Modifier, simple_name};
use tagsmith_ir::{Expr, MethodSpec, ParamSpec, TypeRef, Visibility};

/// Generated `onCreate` override of a component subclass.
pub(crate) const ON_CREATE: &str = "onCreate";

/// Sections of the generated `onCreate`, in body order.
pub mod sections {
    pub const BEFORE_CREATE: &str = "before-create";
    pub const INJECT: &str = "inject";
    pub const BIND_VIEWS: &str = "bind-views";
    pub const BIND_LISTENERS: &str = "bind-listeners";
    pub const AFTER_VIEWS: &str = "after-views";
}

/// Return type of a host method.
fn return_type(element: &Element) -> TypeRef {
    match element.ty.as_deref() {
        Some(ty) => TypeRef::parse(ty),
        None => TypeRef::void(),
    }
}

fn visibility(element: &Element) -> Visibility {
    if element.has_modifier(Modifier::Public) {
        Visibility::Public
    } else if element.has_modifier(Modifier::Protected) {
        Visibility::Protected
    } else {
        Visibility::Package
    }
}

/// Override of a host method with the same signature and final parameters.
fn override_of(element: &Element) -> MethodSpec {
    let mut method = MethodSpec::new(&element.name)
        .visibility(visibility(element))
        .override_()
        .returns(return_type(element))
        .params(
            element
                .params
                .iter()
                .map(|p| ParamSpec::new(&p.name, TypeRef::parse(&p.ty)).final_()),
        );
    for ty in &element.throws {
        method = method.throws(TypeRef::parse(ty));
    }
    method
}

/// Parameter names as call arguments.
fn forward_args(element: &Element) -> Vec<Expr> {
    element.params.iter().map(|p| Expr::ident(&p.name)).collect()
}

/// `Generated.this` or `Generated.super` seen from an anonymous class.
fn outer(generated: &str, keyword: &str) -> Expr {
    Expr::Field {
        target: Box::new(Expr::ident(simple_name(generated))),
        name: keyword.to_string(),
    }
}

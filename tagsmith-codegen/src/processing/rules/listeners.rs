use eyre::Result;
use tagsmith_core::{Element, MarkerKind, ResourceType};
use tagsmith_ir::{Expr, MethodSpec, ParamSpec, Statement, TypeRef};

use super::{outer, sections};
use crate::{
    markers::{ListenerKind, type_matches},
    model::AnnotatedDeclaration,
    processing::{ProcessingContext, Processor},
};

const VIEW: &str = "android.view.View";
const MOTION_EVENT: &str = "android.view.MotionEvent";
const ADAPTER_VIEW: &str = "android.widget.AdapterView";

fn adapter_view() -> TypeRef {
    TypeRef::generic(ADAPTER_VIEW, vec![TypeRef::named("?")])
}

/// `(AdapterView<?> parent, View view, int position, long id)`.
fn item_params() -> Vec<ParamSpec> {
    vec![
        ParamSpec::new("parent", adapter_view()),
        ParamSpec::new("view", TypeRef::named(VIEW)),
        ParamSpec::new("position", TypeRef::parse("int")),
        ParamSpec::new("id", TypeRef::parse("long")),
    ]
}

/// The adapter item for a handler parameter of type `ty`; `int` receives the
/// position.
fn item_arg(ty: &str) -> Expr {
    if type_matches(ty, "int") {
        return Expr::ident("position");
    }
    let adapter = Expr::call_on(Expr::ident("parent"), "getAdapter", vec![]);
    Expr::cast(
        TypeRef::parse(ty),
        Expr::call_on(adapter, "getItem", vec![Expr::ident("position")]),
    )
}

/// Registers anonymous listeners for one [`ListenerKind`].
pub struct ListenerProcessor(pub ListenerKind);

impl ListenerProcessor {
    /// Arguments for the handler method, read from the callback parameters.
    fn handler_args(&self, element: &Element) -> Vec<Expr> {
        element
            .params
            .iter()
            .map(|p| match self.0 {
                ListenerKind::ItemClick | ListenerKind::ItemLongClick => item_arg(&p.ty),
                _ if type_matches(&p.ty, VIEW) => Expr::ident("view"),
                _ => Expr::ident("event"),
            })
            .collect()
    }

    /// The listener callbacks, delegating to the handler method.
    fn callbacks(&self, declaration: &AnnotatedDeclaration, generated: &str) -> Vec<MethodSpec> {
        let element = &declaration.element;
        let handler = |args| Expr::call_on(outer(generated, "this"), &element.name, args);

        if matches!(self.0, ListenerKind::ItemSelected) {
            let item = element.params.get(1).map(|p| p.ty.as_str());
            let mut selected = vec![Expr::bool(true)];
            let mut nothing = vec![Expr::bool(false)];
            if let Some(ty) = item {
                selected.push(item_arg(ty));
                nothing.push(if type_matches(ty, "int") {
                    Expr::int(-1)
                } else {
                    Expr::Null
                });
            }
            return vec![
                MethodSpec::new(self.0.callback())
                    .override_()
                    .params(item_params())
                    .statement(Statement::expr(handler(selected))),
                MethodSpec::new("onNothingSelected")
                    .override_()
                    .param(ParamSpec::new("parent", adapter_view()))
                    .statement(Statement::expr(handler(nothing))),
            ];
        }

        let call = handler(self.handler_args(element));
        let mut callback = MethodSpec::new(self.0.callback()).override_();
        callback = match self.0 {
            ListenerKind::ItemClick | ListenerKind::ItemLongClick => callback.params(item_params()),
            ListenerKind::Touch => callback
                .param(ParamSpec::new("view", TypeRef::named(VIEW)))
                .param(ParamSpec::new("event", TypeRef::named(MOTION_EVENT))),
            _ => callback.param(ParamSpec::new("view", TypeRef::named(VIEW))),
        };

        if !self.0.returns_boolean() {
            return vec![callback.statement(Statement::expr(call))];
        }
        let callback = callback.returns(TypeRef::boolean());
        let callback = if element.returns_void() {
            callback
                .statement(Statement::expr(call))
                .statement(Statement::return_(Expr::bool(true)))
        } else {
            callback.statement(Statement::return_(call))
        };
        vec![callback]
    }

    /// Type of the local holding the looked-up view.
    fn target_type(&self) -> TypeRef {
        if self.0.on_adapter_view() {
            adapter_view()
        } else {
            TypeRef::named(VIEW)
        }
    }
}

impl Processor for ListenerProcessor {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Registers an anonymous listener on each view in the bind-listeners section"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let ids: Vec<&str> = match declaration.arg("ids").and_then(|ids| ids.as_str_list()) {
            Some(ids) => ids,
            None => vec![self.0.default_id(&element.name)],
        };
        let resources = ids
            .into_iter()
            .map(|id| ctx.resource(ResourceType::Id, id))
            .collect::<Result<Vec<_>>>()?;

        let generated = ctx.component_type(&element.owner)?.name.clone();
        let callbacks = self.callbacks(declaration, &generated);
        let section = ctx.section(&element.owner, sections::BIND_LISTENERS)?;

        for resource in resources {
            let local = format!("view{}", section.len());
            let listener = Expr::anonymous(TypeRef::named(self.0.interface()), callbacks.clone());
            let lookup = Expr::call("findViewById", vec![Expr::resource(resource)]);
            let lookup = if self.0.on_adapter_view() {
                Expr::cast(self.target_type(), lookup)
            } else {
                lookup
            };
            section.push(Statement::local(self.target_type(), &local, lookup));
            section.push(Statement::If {
                condition: Expr::NotNull {
                    expr: Box::new(Expr::ident(&local)),
                },
                then: vec![Statement::expr(Expr::call_on(
                    Expr::ident(&local),
                    self.0.setter(),
                    vec![listener],
                ))],
            });
        }
        Ok(())
    }
}

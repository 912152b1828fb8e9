use eyre::Result;
use tagsmith_core::{MarkerKind, ResourceType};
use tagsmith_ir::{Expr, MethodSpec, ParamSpec, Statement, TypeRef, Visibility};

use crate::{
    markers::{OPTIONS_ITEM, OPTIONS_MENU},
    model::AnnotatedDeclaration,
    processing::{ProcessingContext, Processor},
    validation::rules::default_item_id,
};

const ON_CREATE_OPTIONS_MENU: &str = "onCreateOptionsMenu";
const ON_OPTIONS_ITEM_SELECTED: &str = "onOptionsItemSelected";

/// Inflates the options menu of a component.
pub struct OptionsMenuProcessor;

impl Processor for OptionsMenuProcessor {
    fn kind(&self) -> MarkerKind {
        OPTIONS_MENU
    }

    fn description(&self) -> &'static str {
        "Overrides onCreateOptionsMenu to inflate the menu resource"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let menu = declaration.arg_str("menu").unwrap_or_default();
        let resource = ctx.resource(ResourceType::Menu, menu)?;

        let method = MethodSpec::new(ON_CREATE_OPTIONS_MENU)
            .visibility(Visibility::Public)
            .override_()
            .returns(TypeRef::boolean())
            .param(ParamSpec::new("menu", TypeRef::named("android.view.Menu")))
            .statement(Statement::expr(Expr::call_on(
                Expr::call("getMenuInflater", vec![]),
                "inflate",
                vec![Expr::resource(resource), Expr::ident("menu")],
            )))
            .statement(Statement::return_(Expr::call_on(
                Expr::Super,
                ON_CREATE_OPTIONS_MENU,
                vec![Expr::ident("menu")],
            )));

        ctx.component_type(&declaration.qualified_name())?
            .methods
            .push(method);
        Ok(())
    }
}

/// Dispatches selected menu items to their handler methods.
pub struct OptionsItemProcessor;

impl Processor for OptionsItemProcessor {
    fn kind(&self) -> MarkerKind {
        OPTIONS_ITEM
    }

    fn description(&self) -> &'static str {
        "Adds an item id branch to onOptionsItemSelected for each handler"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let ids: Vec<&str> = match declaration.arg("ids").and_then(|ids| ids.as_str_list()) {
            Some(ids) => ids,
            None => vec![default_item_id(&element.name)],
        };
        let resources = ids
            .into_iter()
            .map(|id| ctx.resource(ResourceType::Id, id))
            .collect::<Result<Vec<_>>>()?;

        let args = if element.params.is_empty() {
            vec![]
        } else {
            vec![Expr::ident("item")]
        };
        let call = Expr::call(&element.name, args);
        let then = if element.returns_void() {
            vec![
                Statement::expr(call),
                Statement::return_(Expr::bool(true)),
            ]
        } else {
            vec![Statement::return_(call)]
        };

        let dispatch = ctx
            .component_type(&element.owner)?
            .ensure_method(ON_OPTIONS_ITEM_SELECTED, || {
                MethodSpec::new(ON_OPTIONS_ITEM_SELECTED)
                    .visibility(Visibility::Public)
                    .override_()
                    .returns(TypeRef::boolean())
                    .param(ParamSpec::new("item", TypeRef::named("android.view.MenuItem")))
                    .statement(Statement::return_(Expr::call_on(
                        Expr::Super,
                        ON_OPTIONS_ITEM_SELECTED,
                        vec![Expr::ident("item")],
                    )))
            });

        // Branches go before the trailing super call
        for resource in resources {
            let at = dispatch.body.len().saturating_sub(1);
            dispatch.body.insert(
                at,
                Statement::If {
                    condition: Expr::equals(
                        Expr::call_on(Expr::ident("item"), "getItemId", vec![]),
                        Expr::resource(resource),
                    ),
                    then: then.clone(),
                },
            );
        }
        Ok(())
    }
}

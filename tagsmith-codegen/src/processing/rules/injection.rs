use eyre::{Result, eyre};
use tagsmith_core::{MarkerKind, ResourceType};
use tagsmith_ir::{Expr, MethodSpec, Statement, TypeRef, Visibility};

use super::sections;
use crate::{
    markers::{APPLICATION, BINDS_VIEW, EXTRA, FROM_HTML, PREF, ResourceKind, SYSTEM_SERVICE},
    model::AnnotatedDeclaration,
    processing::{ProcessingContext, Processor},
};

const INJECT_EXTRAS: &str = "injectExtras";
const EXTRAS: &str = "extras_";

fn field_type(declaration: &AnnotatedDeclaration) -> Result<TypeRef> {
    declaration
        .element
        .ty
        .as_deref()
        .map(TypeRef::parse)
        .ok_or_else(|| eyre!("{} has no declared type", declaration.element))
}

fn assign_field(declaration: &AnnotatedDeclaration, value: Expr) -> Statement {
    Statement::assign(Expr::this_field(&declaration.element.name), value)
}

/// Binds view fields after the content view is set.
pub struct BindsViewProcessor;

impl Processor for BindsViewProcessor {
    fn kind(&self) -> MarkerKind {
        BINDS_VIEW
    }

    fn description(&self) -> &'static str {
        "Assigns the field from findViewById in the bind-views section"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let id = declaration.arg_str("id").unwrap_or(&element.name);
        let resource = ctx.resource(ResourceType::Id, id)?;
        let view = Expr::cast(
            field_type(declaration)?,
            Expr::call("findViewById", vec![Expr::resource(resource)]),
        );

        ctx.section(&element.owner, sections::BIND_VIEWS)?
            .push(assign_field(declaration, view));
        Ok(())
    }
}

/// Sets HTML string resources on bound text views.
pub struct FromHtmlProcessor;

impl Processor for FromHtmlProcessor {
    fn kind(&self) -> MarkerKind {
        FROM_HTML
    }

    fn description(&self) -> &'static str {
        "Sets the bound view's text from an HTML string resource in the bind-views section"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let name = declaration.arg_str("name").unwrap_or(&element.name);
        let resource = ctx.resource(ResourceType::String, name)?;
        let html = Expr::call_on(
            Expr::ident("android.text.Html"),
            "fromHtml",
            vec![Expr::call("getString", vec![Expr::resource(resource)])],
        );

        ctx.section(&element.owner, sections::BIND_VIEWS)?
            .push(Statement::expr(Expr::call_on(
                Expr::this_field(&element.name),
                "setText",
                vec![html],
            )));
        Ok(())
    }
}

/// Loads resource fields for one [`ResourceKind`].
pub struct ResourceProcessor(pub ResourceKind);

impl Processor for ResourceProcessor {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Assigns the field from the matching Resources accessor in the inject section"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let name = declaration.arg_str("name").unwrap_or(&element.name);
        let resource = Expr::resource(ctx.resource(self.0.resource_type(), name)?);
        let accessor = self.0.accessor(element.ty.as_deref().unwrap_or_default());

        let value = match self.0 {
            ResourceKind::Anim => Expr::call_on(
                Expr::ident("android.view.animation.AnimationUtils"),
                accessor,
                vec![Expr::This, resource],
            ),
            _ => Expr::call_on(Expr::call("getResources", vec![]), accessor, vec![resource]),
        };

        ctx.section(&element.owner, sections::INJECT)?
            .push(assign_field(declaration, value));
        Ok(())
    }
}

/// Reads intent extras into fields.
pub struct ExtraProcessor;

impl ExtraProcessor {
    /// The `injectExtras` method, created and called from `inject` on first use.
    fn inject_extras<'m>(
        ctx: &'m mut ProcessingContext<'_>,
        owner: &str,
    ) -> Result<&'m mut Vec<Statement>> {
        let ty = ctx.component_type(owner)?;
        let created = ty.method_mut(INJECT_EXTRAS).is_none();
        if created {
            let extras = Expr::call_on(Expr::call("getIntent", vec![]), "getExtras", vec![]);
            ty.methods.push(
                MethodSpec::new(INJECT_EXTRAS)
                    .visibility(Visibility::Private)
                    .statement(Statement::local(
                        TypeRef::named("android.os.Bundle"),
                        EXTRAS,
                        extras,
                    ))
                    .statement(Statement::If {
                        condition: Expr::NotNull {
                            expr: Box::new(Expr::ident(EXTRAS)),
                        },
                        then: Vec::new(),
                    }),
            );
            ctx.section(owner, sections::INJECT)?
                .push(Statement::expr(Expr::call(INJECT_EXTRAS, vec![])));
        }

        let ty = ctx.component_type(owner)?;
        let name = ty.name.clone();
        ty.method_mut(INJECT_EXTRAS)
            .and_then(|method| match method.body.last_mut() {
                Some(Statement::If { then, .. }) => Some(then),
                _ => None,
            })
            .ok_or_else(|| eyre!("{}.{} lost its extras guard", name, INJECT_EXTRAS))
    }
}

impl Processor for ExtraProcessor {
    fn kind(&self) -> MarkerKind {
        EXTRA
    }

    fn description(&self) -> &'static str {
        "Assigns the field from the intent extras when the key is present"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let key = declaration.arg_str("key").unwrap_or(&element.name);
        let value = Expr::cast(
            field_type(declaration)?,
            Expr::call_on(Expr::ident(EXTRAS), "get", vec![Expr::str(key)]),
        );

        Self::inject_extras(ctx, &element.owner)?.push(Statement::If {
            condition: Expr::call_on(Expr::ident(EXTRAS), "containsKey", vec![Expr::str(key)]),
            then: vec![assign_field(declaration, value)],
        });
        Ok(())
    }
}

/// Creates preference helpers.
pub struct PrefProcessor;

impl Processor for PrefProcessor {
    fn kind(&self) -> MarkerKind {
        PREF
    }

    fn description(&self) -> &'static str {
        "Assigns a new preference helper bound to the component in the inject section"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let helper = Expr::new_(field_type(declaration)?, vec![Expr::This]);
        ctx.section(&declaration.element.owner, sections::INJECT)?
            .push(assign_field(declaration, helper));
        Ok(())
    }
}

/// Looks system services up by their `Context` constant.
pub struct SystemServiceProcessor;

impl Processor for SystemServiceProcessor {
    fn kind(&self) -> MarkerKind {
        SYSTEM_SERVICE
    }

    fn description(&self) -> &'static str {
        "Assigns the field from getSystemService in the inject section"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let ty = element.ty.as_deref().unwrap_or_default();
        let services = &ctx.project().services;
        let constant = services
            .constant_for(ty)
            .ok_or_else(|| eyre!("{} is not a known system service", ty))?;
        let service_type = TypeRef::named(services.qualified(ty).unwrap_or(ty));

        let value = Expr::cast(
            service_type,
            Expr::call(
                "getSystemService",
                vec![Expr::static_field(
                    TypeRef::named("android.content.Context"),
                    constant,
                )],
            ),
        );

        ctx.section(&element.owner, sections::INJECT)?
            .push(assign_field(declaration, value));
        Ok(())
    }
}

/// Injects the application instance.
pub struct ApplicationProcessor;

impl Processor for ApplicationProcessor {
    fn kind(&self) -> MarkerKind {
        APPLICATION
    }

    fn description(&self) -> &'static str {
        "Assigns the field from getApplication in the inject section"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let application = ctx
            .project()
            .application
            .as_deref()
            .ok_or_else(|| eyre!("no application class is declared"))?;
        let value = Expr::cast(
            TypeRef::named(application),
            Expr::call("getApplication", vec![]),
        );

        ctx.section(&declaration.element.owner, sections::INJECT)?
            .push(assign_field(declaration, value));
        Ok(())
    }
}
